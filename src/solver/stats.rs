use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Instrumentation counters gathered while solving.
///
/// Purely observational: none of these affect what the solver returns.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Recursive search invocations.
    pub nodes_visited: u64,
    /// Branches that exhausted every candidate value without success.
    pub backtracks: u64,
    /// Arcs popped and revised by the propagation loop.
    pub revisions: u64,
    /// Revisions that actually removed at least one value.
    pub prunings: u64,
    /// Whether the search was abandoned via a cancellation token.
    pub cancelled: bool,
}

/// Renders the counters as a two-column table for human inspection.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new("Nodes visited"),
        Cell::new(&stats.nodes_visited.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Backtracks"),
        Cell::new(&stats.backtracks.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Revise calls"),
        Cell::new(&stats.revisions.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Prunings"),
        Cell::new(&stats.prunings.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Cancelled"),
        Cell::new(&stats.cancelled.to_string()),
    ]));
    table.to_string()
}
