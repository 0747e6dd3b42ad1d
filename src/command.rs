//! Command and Outcome types for the engine.
//!
//! Commands are inputs from a shell (menu, CLI, TUI).
//! Outcomes carry the statistics the shell displays.

use std::time::Duration;

use crate::persist::MalformedLine;
use crate::record::OrderRecord;
use crate::report::{Report, ReportKind};
use crate::search::{SearchMethod, SearchOutcome, SearchQuery};
use crate::sort::{SortAlgorithm, SortComparison, SortStats};

// ============================================================================
// Input Commands
// ============================================================================

/// Commands accepted by [`Engine::process_command`](crate::engine::Engine::process_command).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the first records of the store, quick sorting first if `sorted`
    List { sorted: bool },
    /// Sort the store with one algorithm
    Sort(SortAlgorithm),
    /// Run both algorithms on the same starting order
    CompareSorts,
    /// Look up an order by ID and customer name
    Search(SearchMethod, SearchQuery),
    /// Build an aggregate report
    Report(ReportKind),
    /// Replace the store with the data file's contents
    Reload,
    /// Write the store, in current order, to the data file
    Save,
}

impl Command {
    /// Returns true if the command is meaningless on an empty store.
    pub const fn needs_data(&self) -> bool {
        !matches!(self, Command::Reload)
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Owned copy of a [`SearchOutcome`], detached from the store.
#[derive(Clone, Debug)]
pub struct SearchHit {
    pub method: SearchMethod,
    pub query: SearchQuery,
    /// 1-based position of the match
    pub position: Option<usize>,
    pub record: Option<OrderRecord>,
    pub comparisons: u64,
    pub elapsed: Duration,
    pub presort: Option<SortStats>,
}

impl SearchHit {
    pub fn from_outcome(query: &SearchQuery, outcome: &SearchOutcome<'_>) -> Self {
        Self {
            method: outcome.method,
            query: query.clone(),
            position: outcome.position,
            record: outcome.record.cloned(),
            comparisons: outcome.comparisons,
            elapsed: outcome.elapsed,
            presort: outcome.presort,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.position.is_some()
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Reasons a command was not executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The store is empty
    NoData,
}

/// Results produced by the engine.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The first `shown` of `total` records are ready to display
    Listed {
        shown: usize,
        total: usize,
        presort: Option<SortStats>,
    },
    /// Store sorted
    Sorted(SortStats),
    /// Both algorithms ran
    Compared(SortComparison),
    /// Search finished (found or not)
    Searched(SearchHit),
    /// Report built
    Reported(Report),
    /// Store replaced from the data file
    Loaded {
        count: usize,
        skipped: Vec<MalformedLine>,
    },
    /// Store written to the data file
    Saved { count: usize },
    /// Command refused
    Rejected(RejectReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_data() {
        assert!(Command::List { sorted: false }.needs_data());
        assert!(Command::Sort(SortAlgorithm::Quick).needs_data());
        assert!(Command::Save.needs_data());
        assert!(!Command::Reload.needs_data());
    }

    #[test]
    fn test_command_variants() {
        let search = Command::Search(SearchMethod::Linear, SearchQuery::new(1, "Alice"));

        match search {
            Command::Search(method, query) => {
                assert_eq!(method, SearchMethod::Linear);
                assert_eq!(query.order_id, 1);
            }
            _ => panic!("Expected Search"),
        }
    }
}
