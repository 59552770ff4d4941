//! Routes: contiguous sequences of contacts produced by the search.

use serde::Serialize;

use crate::contact::{Contact, NodeId};
use crate::error::RouteError;

/// One hop of a route: the contact taken and the arrival time at its
/// destination node computed when the route was discovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub contact: Contact,
    pub arrival_time: f64,
}

impl Hop {
    pub fn new(contact: Contact, arrival_time: f64) -> Self {
        Self {
            contact,
            arrival_time,
        }
    }
}

/// An ordered, non-empty, contiguous sequence of hops.
///
/// Built hop by hop with [`Route::append`]; consumers only read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    hops: Vec<Hop>,
}

impl Route {
    pub fn new(first: Hop) -> Self {
        Self { hops: vec![first] }
    }

    /// Appends a hop that departs from the node the route currently ends at.
    pub fn append(&mut self, hop: Hop) -> Result<(), RouteError> {
        let last = self.last();
        if last.contact.to != hop.contact.from {
            return Err(RouteError::Discontiguous {
                previous: last.contact.to.clone(),
                next: hop.contact.from.clone(),
            });
        }
        self.hops.push(hop);
        Ok(())
    }

    /// Builds a route from hops in travel order. `None` if `hops` is empty.
    pub fn from_hops(hops: impl IntoIterator<Item = Hop>) -> Result<Option<Self>, RouteError> {
        let mut hops = hops.into_iter();
        let Some(first) = hops.next() else {
            return Ok(None);
        };
        let mut route = Self::new(first);
        for hop in hops {
            route.append(hop)?;
        }
        Ok(Some(route))
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    fn first(&self) -> &Hop {
        &self.hops[0]
    }

    fn last(&self) -> &Hop {
        &self.hops[self.hops.len() - 1]
    }

    /// Arrival time at the final hop's destination.
    pub fn best_delivery_time(&self) -> f64 {
        self.last().arrival_time
    }

    /// Opening time of the first contact.
    pub fn from_time(&self) -> f64 {
        self.first().contact.start
    }

    /// Earliest closing time along the route.
    pub fn to_time(&self) -> f64 {
        self.hops
            .iter()
            .map(|hop| hop.contact.end)
            .fold(f64::INFINITY, f64::min)
    }

    /// Bottleneck volume: the smallest per-hop residual volume.
    pub fn volume(&self) -> f64 {
        self.hops
            .iter()
            .map(|hop| hop.contact.max_residual_volume())
            .fold(f64::INFINITY, f64::min)
    }

    /// The neighbour of the source this route forwards to.
    pub fn next_node(&self) -> &NodeId {
        &self.first().contact.to
    }

    pub fn source(&self) -> &NodeId {
        &self.first().contact.from
    }

    pub fn destination(&self) -> &NodeId {
        &self.last().contact.to
    }

    /// Source node followed by every hop's destination node.
    pub fn nodes(&self) -> Vec<&NodeId> {
        std::iter::once(self.source())
            .chain(self.hops.iter().map(|hop| &hop.contact.to))
            .collect()
    }
}

/// Every route found by one search, in discovery order, plus the best one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSet {
    pub all_routes: Vec<Route>,
    pub best: Route,
}
