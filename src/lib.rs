//! cgr-planner: contact graph routing over scheduled DTN contact plans.
//!
//! Finds every feasible route between two nodes of a contact plan and the
//! one with the earliest delivery time.

pub mod traits;
pub mod contact;
pub mod plan;
pub mod route;
pub mod solver;
pub mod loader;
pub mod batch;
pub mod report;
pub mod error;

pub use batch::{QueryMode, QueryResult, run_queries};
pub use contact::{Contact, ContactId, Ident, NodeId};
pub use error::{PlanError, RouteError, SearchError};
pub use plan::ContactPlan;
pub use route::{Hop, Route, RouteSet};
pub use solver::{SearchOptions, SearchState, Suppressions, find_routes};
