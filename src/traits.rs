//! Seams between the route search and its collaborators.
//!
//! The search only needs contacts in and results out. Loading and
//! presentation live behind these traits so they can be swapped freely.

use crate::batch::QueryResult;
use crate::contact::Contact;
use crate::error::PlanError;

/// Supplies the contacts of a plan.
///
/// Implementations must fail on malformed records rather than skipping them;
/// the search never sees a partially-formed contact.
pub trait ContactSource {
    fn contacts(&self) -> Result<Vec<Contact>, PlanError>;
}

/// Accepts the outcome of one (source, destination) query.
pub trait RouteConsumer {
    type Error;

    fn consume(&mut self, result: &QueryResult) -> Result<(), Self::Error>;
}
