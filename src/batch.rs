//! Batch queries over every relevant (source, destination) pair.
//!
//! Each pair runs as an independent search with its own state table, so
//! pairs are evaluated in parallel against the shared plan.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::contact::NodeId;
use crate::error::SearchError;
use crate::plan::ContactPlan;
use crate::route::RouteSet;
use crate::solver::{SearchOptions, SearchState, Suppressions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// A single source and destination.
    Pair { source: NodeId, destination: NodeId },
    /// From one source to every other node.
    FromSource(NodeId),
    /// From every other node to one destination.
    ToDestination(NodeId),
    /// Every ordered pair of distinct nodes.
    AllPairs,
}

impl QueryMode {
    /// Picks the mode implied by which endpoints are given.
    pub fn from_endpoints(source: Option<NodeId>, destination: Option<NodeId>) -> Self {
        match (source, destination) {
            (Some(source), Some(destination)) => QueryMode::Pair {
                source,
                destination,
            },
            (Some(source), None) => QueryMode::FromSource(source),
            (None, Some(destination)) => QueryMode::ToDestination(destination),
            (None, None) => QueryMode::AllPairs,
        }
    }

    /// Ordered (source, destination) pairs, following the plan's sorted node order.
    pub fn pairs(&self, plan: &ContactPlan) -> Vec<(NodeId, NodeId)> {
        match self {
            QueryMode::Pair {
                source,
                destination,
            } => vec![(source.clone(), destination.clone())],
            QueryMode::FromSource(source) => plan
                .nodes()
                .filter(|node| *node != source)
                .map(|node| (source.clone(), node.clone()))
                .collect(),
            QueryMode::ToDestination(destination) => plan
                .nodes()
                .filter(|node| *node != destination)
                .map(|node| (node.clone(), destination.clone()))
                .collect(),
            QueryMode::AllPairs => plan
                .nodes()
                .flat_map(|source| {
                    plan.nodes()
                        .filter(move |destination| *destination != source)
                        .map(move |destination| (source.clone(), destination.clone()))
                })
                .collect(),
        }
    }
}

/// Outcome of one pairwise search. `routes` is `None` when no route exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub source: NodeId,
    pub destination: NodeId,
    pub routes: Option<RouteSet>,
}

/// Runs every query of `mode`, returning results in pair order.
///
/// The first failing search aborts the batch.
pub fn run_queries(
    plan: &ContactPlan,
    mode: &QueryMode,
    suppressions: &Suppressions,
    options: &SearchOptions,
) -> Result<Vec<QueryResult>, SearchError> {
    let pairs = mode.pairs(plan);
    info!(?mode, queries = pairs.len(), "running route queries");

    let results = pairs
        .into_par_iter()
        .map_init(
            SearchState::new,
            |state, (source, destination)| -> Result<QueryResult, SearchError> {
                let routes = state.search(plan, &source, &destination, suppressions, options)?;
                Ok(QueryResult {
                    source,
                    destination,
                    routes,
                })
            },
        )
        .collect::<Result<Vec<_>, SearchError>>()?;

    let found = results.iter().filter(|result| result.routes.is_some()).count();
    info!(found, queries = results.len(), "route queries finished");
    Ok(results)
}
