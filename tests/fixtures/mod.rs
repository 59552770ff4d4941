//! Test fixtures for cgr-planner.
//!
//! Provides:
//! - A builder for contacts with sensible defaults
//! - Search shortcuts and route inspection helpers
//! - JSON contact plans in the loader's file format

#![allow(dead_code)]

pub mod contact_plans;

use cgr_planner::{
    Contact, ContactPlan, Ident, Route, RouteSet, SearchOptions, Suppressions, find_routes,
};

/// Builder for test contacts: open over [0, 100), owlt 1, rate 1.
#[derive(Clone, Debug)]
pub struct TestContact {
    id: i64,
    from: String,
    to: String,
    start: f64,
    end: f64,
    owlt: f64,
    rate: f64,
}

impl TestContact {
    pub fn new(id: i64, from: &str, to: &str) -> Self {
        Self {
            id,
            from: from.to_string(),
            to: to.to_string(),
            start: 0.0,
            end: 100.0,
            owlt: 1.0,
            rate: 1.0,
        }
    }

    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn owlt(mut self, owlt: f64) -> Self {
        self.owlt = owlt;
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn build(self) -> Contact {
        Contact::new(
            self.id,
            self.from,
            self.to,
            self.start,
            self.end,
            self.owlt,
            self.rate,
        )
        .expect("test contact should be valid")
    }
}

pub fn plan(contacts: Vec<TestContact>) -> ContactPlan {
    ContactPlan::new(contacts.into_iter().map(TestContact::build).collect())
        .expect("test plan should be valid")
}

pub fn node(name: &str) -> Ident {
    Ident::from(name)
}

pub fn search(plan: &ContactPlan, source: &str, destination: &str) -> Option<RouteSet> {
    search_with(plan, source, destination, &Suppressions::new())
}

pub fn search_with(
    plan: &ContactPlan,
    source: &str,
    destination: &str,
    suppressions: &Suppressions,
) -> Option<RouteSet> {
    find_routes(
        plan,
        &node(source),
        &node(destination),
        suppressions,
        &SearchOptions::default(),
    )
    .expect("search should not fail")
}

/// Numeric contact ids of a route's hops, in travel order.
pub fn hop_ids(route: &Route) -> Vec<i64> {
    route
        .hops()
        .iter()
        .map(|hop| match hop.contact.id {
            Ident::Number(id) => id,
            Ident::Name(ref name) => panic!("expected numeric contact id, got {}", name),
        })
        .collect()
}

pub fn all_hop_ids(routes: &RouteSet) -> Vec<Vec<i64>> {
    routes.all_routes.iter().map(hop_ids).collect()
}
