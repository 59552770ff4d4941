//! Contact graph route search.
//!
//! A Dijkstra variant over contacts rather than nodes: a contact's cost is
//! the earliest arrival time at its destination node. The next contact to
//! expand is found by rescanning the whole plan, and every route that reaches
//! the destination during the search is collected, not only the best one.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::contact::{Contact, ContactId, NodeId};
use crate::error::{RouteError, SearchError};
use crate::plan::{ContactIndex, ContactPlan};
use crate::route::{Hop, Route, RouteSet};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum expansions before the search aborts. `None` uses the number
    /// of contacts plus one, which a terminating search never exceeds.
    pub max_iterations: Option<usize>,
    /// Wall-clock budget for a single search.
    pub time_limit: Option<Duration>,
}

/// Contacts and next hops excluded from searches.
///
/// Unlike [`SearchState`], suppressions persist across searches so repeated
/// queries can force alternate routes.
#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    contacts: HashSet<ContactId>,
    // `None` keys the synthetic root contact.
    next_hops: HashMap<Option<ContactId>, HashSet<ContactId>>,
}

impl Suppressions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes a contact from every subsequent search.
    pub fn suppress(&mut self, contact: impl Into<ContactId>) {
        self.contacts.insert(contact.into());
    }

    /// Forbids `next` as the immediate successor of `after`.
    pub fn suppress_next_hop(&mut self, after: impl Into<ContactId>, next: impl Into<ContactId>) {
        self.next_hops
            .entry(Some(after.into()))
            .or_default()
            .insert(next.into());
    }

    /// Forbids `next` as the first hop out of the source.
    pub fn suppress_first_hop(&mut self, next: impl Into<ContactId>) {
        self.next_hops.entry(None).or_default().insert(next.into());
    }

    pub fn is_suppressed(&self, contact: &ContactId) -> bool {
        self.contacts.contains(contact)
    }

    pub fn is_next_hop_suppressed(&self, after: Option<&ContactId>, next: &ContactId) -> bool {
        self.next_hops
            .get(&after.cloned())
            .is_some_and(|hops| hops.contains(next))
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.next_hops.clear();
    }
}

/// Per-contact bookkeeping owned by one search.
#[derive(Debug, Clone)]
struct WorkingState {
    arrival_time: f64,
    predecessor: Option<usize>,
    visited: bool,
    visited_nodes: Vec<NodeId>,
}

impl Default for WorkingState {
    fn default() -> Self {
        Self {
            arrival_time: f64::INFINITY,
            predecessor: None,
            visited: false,
            visited_nodes: Vec::new(),
        }
    }
}

impl WorkingState {
    fn clear(&mut self) {
        self.arrival_time = f64::INFINITY;
        self.predecessor = None;
        self.visited = false;
        self.visited_nodes.clear();
    }
}

/// Why a candidate contact was not relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    SuppressedNextHop,
    Suppressed,
    Visited,
    NodeVisited,
    Closed,
    NoVolume,
    Reversal,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::SuppressedNextHop => "suppressed next hop",
            Skip::Suppressed => "suppressed",
            Skip::Visited => "contact visited",
            Skip::NodeVisited => "node visited",
            Skip::Closed => "contact ends before arrival",
            Skip::NoVolume => "no residual volume",
            Skip::Reversal => "return to previous node",
        };
        f.write_str(reason)
    }
}

/// Working state table for a search over one plan.
///
/// Slot `i` belongs to contact `i` of the plan; the final slot belongs to the
/// synthetic root contact. Every search resets the whole table on entry, so
/// no search observes state left by another.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    slots: Vec<WorkingState>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, contacts: usize) {
        self.slots.resize_with(contacts + 1, WorkingState::default);
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    fn root(&self) -> usize {
        self.slots.len() - 1
    }

    /// Earliest arrival recorded for a contact by the last search.
    pub fn arrival_time(&self, contact: ContactIndex) -> Option<f64> {
        self.contact_slot(contact).map(|slot| slot.arrival_time)
    }

    /// Whether the last search finalized a contact.
    pub fn is_visited(&self, contact: ContactIndex) -> bool {
        self.contact_slot(contact).is_some_and(|slot| slot.visited)
    }

    /// Nodes traversed on the best known path through a contact.
    pub fn visited_nodes(&self, contact: ContactIndex) -> &[NodeId] {
        self.contact_slot(contact)
            .map(|slot| slot.visited_nodes.as_slice())
            .unwrap_or(&[])
    }

    fn contact_slot(&self, contact: ContactIndex) -> Option<&WorkingState> {
        // The last slot is the root, which is not a plan contact.
        if contact + 1 < self.slots.len() {
            self.slots.get(contact)
        } else {
            None
        }
    }

    /// Runs one search from `source` to `destination`.
    ///
    /// Returns `Ok(None)` when no feasible route exists, including when the
    /// destination never appears in the plan. An unknown source is an error.
    pub fn search(
        &mut self,
        plan: &ContactPlan,
        source: &NodeId,
        destination: &NodeId,
        suppressions: &Suppressions,
        options: &SearchOptions,
    ) -> Result<Option<RouteSet>, SearchError> {
        if !plan.contains_node(source) {
            return Err(SearchError::UnknownNode(source.clone()));
        }

        let contacts = plan.contacts();
        self.reset(contacts.len());
        let root = self.root();
        self.slots[root].arrival_time = 0.0;
        self.slots[root].visited_nodes.push(source.clone());

        let suppressed: Vec<bool> = contacts
            .iter()
            .map(|contact| suppressions.is_suppressed(&contact.id))
            .collect();

        let limit = options.max_iterations.unwrap_or(contacts.len() + 1);
        let started = Instant::now();

        debug!(%source, %destination, contacts = contacts.len(), "searching for routes");

        let mut current = root;
        let mut earliest_final_arrival = f64::INFINITY;
        let mut best_final: Option<ContactIndex> = None;
        let mut all_routes = Vec::new();
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > limit {
                return Err(SearchError::IterationLimit { limit });
            }
            if let Some(time_limit) = options.time_limit {
                let elapsed = started.elapsed();
                if elapsed >= time_limit {
                    return Err(SearchError::TimeLimit { elapsed });
                }
            }

            // The root stands for the source node and has no plan contact.
            let current_contact = (current != root).then(|| &contacts[current]);
            let current_to = current_contact.map_or(source, |contact| &contact.to);
            let current_arrival = self.slots[current].arrival_time;

            for &candidate in plan.adjacency(current_to) {
                let contact = &contacts[candidate];
                let skip = self.skip_reason(
                    contact,
                    candidate,
                    current,
                    current_contact,
                    suppressed[candidate],
                    suppressions,
                );
                if let Some(reason) = skip {
                    trace!(contact = %contact, %reason, "ignoring contact");
                    continue;
                }

                let arrival = if contact.start < current_arrival {
                    current_arrival + contact.owlt
                } else {
                    contact.start + contact.owlt
                };

                // Equal-cost paths overwrite: the last one discovered wins.
                if arrival > self.slots[candidate].arrival_time {
                    continue;
                }

                let mut visited_nodes = self.slots[current].visited_nodes.clone();
                visited_nodes.push(contact.to.clone());
                let slot = &mut self.slots[candidate];
                slot.arrival_time = arrival;
                slot.predecessor = Some(current);
                slot.visited_nodes = visited_nodes;
                trace!(contact = %contact, arrival, "relaxed contact");

                if contact.to == *destination {
                    all_routes.push(self.route_to(plan, candidate)?);
                    if arrival < earliest_final_arrival {
                        debug!(contact = %contact, arrival, "new best final contact");
                        earliest_final_arrival = arrival;
                        best_final = Some(candidate);
                    }
                }
            }

            self.slots[current].visited = true;

            match self.next_current(&suppressed, earliest_final_arrival) {
                Some(next) => current = next,
                None => break,
            }
        }

        debug!(routes = all_routes.len(), iterations, "search finished");

        match best_final {
            Some(best_final) => Ok(Some(RouteSet {
                all_routes,
                best: self.route_to(plan, best_final)?,
            })),
            None => Ok(None),
        }
    }

    fn skip_reason(
        &self,
        contact: &Contact,
        candidate: ContactIndex,
        current: usize,
        current_contact: Option<&Contact>,
        suppressed: bool,
        suppressions: &Suppressions,
    ) -> Option<Skip> {
        let current_state = &self.slots[current];
        let current_id = current_contact.map(|previous| &previous.id);
        if suppressions.is_next_hop_suppressed(current_id, &contact.id) {
            Some(Skip::SuppressedNextHop)
        } else if suppressed {
            Some(Skip::Suppressed)
        } else if self.slots[candidate].visited {
            Some(Skip::Visited)
        } else if current_state.visited_nodes.contains(&contact.to) {
            Some(Skip::NodeVisited)
        } else if contact.end <= current_state.arrival_time {
            Some(Skip::Closed)
        } else if !contact.has_residual_volume() {
            Some(Skip::NoVolume)
        } else if current_contact.is_some_and(|previous| contact.reverses(previous)) {
            Some(Skip::Reversal)
        } else {
            None
        }
    }

    /// Unvisited, unsuppressed contact with the smallest arrival time that
    /// could still beat the best known arrival at the destination. Ties go
    /// to the contact earliest in plan order.
    fn next_current(&self, suppressed: &[bool], earliest_final_arrival: f64) -> Option<ContactIndex> {
        let mut earliest = f64::INFINITY;
        let mut next = None;
        for (index, slot) in self.slots[..self.root()].iter().enumerate() {
            if suppressed[index] || slot.visited {
                continue;
            }
            if slot.arrival_time > earliest_final_arrival {
                continue;
            }
            if slot.arrival_time < earliest {
                earliest = slot.arrival_time;
                next = Some(index);
            }
        }
        next
    }

    /// Walks predecessors from `end` back to the root.
    fn route_to(&self, plan: &ContactPlan, end: ContactIndex) -> Result<Route, RouteError> {
        let root = self.root();
        let mut chain = vec![end];
        let mut cursor = end;
        while let Some(previous) = self.slots[cursor].predecessor {
            if previous == root {
                break;
            }
            chain.push(previous);
            cursor = previous;
        }

        let hop = |index: ContactIndex| {
            Hop::new(plan.contacts()[index].clone(), self.slots[index].arrival_time)
        };
        let mut route = Route::new(hop(cursor));
        for &index in chain.iter().rev().skip(1) {
            route.append(hop(index))?;
        }
        Ok(route)
    }
}

/// Finds every route from `source` to `destination` with a fresh state table.
///
/// Returns `Ok(None)` when no feasible route exists under the plan's
/// schedule, capacity and the given suppressions.
pub fn find_routes(
    plan: &ContactPlan,
    source: &NodeId,
    destination: &NodeId,
    suppressions: &Suppressions,
    options: &SearchOptions,
) -> Result<Option<RouteSet>, SearchError> {
    SearchState::new().search(plan, source, destination, suppressions, options)
}
