//! Error types for plan loading, route construction and search.

use std::time::Duration;

use thiserror::Error;

use crate::contact::{ContactId, NodeId};

/// Errors raised while loading or mutating a contact plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read contact plan: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed contact plan: {0}")]
    Json(#[from] serde_json::Error),

    /// A contact record is present but violates a field constraint.
    #[error("invalid contact {id}: {reason}")]
    InvalidContact { id: ContactId, reason: String },

    #[error("duplicate contact id {0}")]
    DuplicateContact(ContactId),

    #[error("unknown contact id {0}")]
    UnknownContact(ContactId),

    #[error("priority class {priority} out of range (classes: {classes})")]
    InvalidPriority { priority: usize, classes: usize },
}

/// Errors raised while building a route hop by hop.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("hop from {next} does not continue a route ending at {previous}")]
    Discontiguous { previous: NodeId, next: NodeId },
}

/// Errors raised by the route search.
///
/// A search that finds nothing is not an error; see [`crate::solver::find_routes`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("node {0} does not appear in the contact plan")]
    UnknownNode(NodeId),

    #[error("search exceeded {limit} iterations")]
    IterationLimit { limit: usize },

    #[error("search exceeded its time limit after {elapsed:?}")]
    TimeLimit { elapsed: Duration },

    #[error(transparent)]
    Route(#[from] RouteError),
}
