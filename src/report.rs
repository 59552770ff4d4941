//! Plain-text presentation of query results.

use std::io::{self, Write};

use crate::batch::QueryResult;
use crate::route::Route;
use crate::traits::RouteConsumer;

/// Writes one block per query: a header line, then one line per discovered
/// route with the fastest routes marked `*`.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn describe(route: &Route) -> String {
    route
        .hops()
        .iter()
        .map(|hop| hop.contact.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl<W: Write> RouteConsumer for TextReport<W> {
    type Error = io::Error;

    fn consume(&mut self, result: &QueryResult) -> io::Result<()> {
        let Some(routes) = &result.routes else {
            return writeln!(
                self.out,
                "routes from {} to {}: no route",
                result.source, result.destination
            );
        };

        let best_time = routes.best.best_delivery_time();
        writeln!(
            self.out,
            "routes from {} to {}: {} found, best delivery at {}",
            result.source,
            result.destination,
            routes.all_routes.len(),
            best_time
        )?;
        for route in &routes.all_routes {
            let marker = if route.best_delivery_time() == best_time { '*' } else { ' ' };
            writeln!(
                self.out,
                "  {} {}  (delivery {}, {} hops)",
                marker,
                describe(route),
                route.best_delivery_time(),
                route.hop_count()
            )?;
        }
        Ok(())
    }
}
