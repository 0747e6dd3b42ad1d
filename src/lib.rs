//! # OSOMS
//!
//! An order management console: load delimited order records, sort them by
//! revenue, look them up by ID and customer, and summarise sales.
//!
//! ## Design Principles
//!
//! - **One owner**: records live in a single [`RecordStore`]; nothing global
//! - **Views, not copies**: sorts and the sentinel scan work on an
//!   [`ArrayView`] of positions and commit a permutation back in place
//! - **Instrumented**: every sort reports moves and elapsed time, every
//!   search reports comparisons and elapsed time
//!
//! ## Architecture
//!
//! ```text
//! [Console / CLI / TUI] --Command--> [Engine] --Outcome--> [display]
//!                                       |
//!                          [RecordStore] <--> [persist]
//!                              |
//!                  [sort]  [search]  [report]
//! ```

pub mod command;
pub mod compare;
pub mod config;
pub mod console;
pub mod display;
pub mod engine;
pub mod error;
pub mod persist;
pub mod record;
pub mod report;
pub mod search;
pub mod sort;
pub mod store;
pub mod synth;
pub mod view;

// Re-exports for convenience
pub use command::{Command, Outcome, RejectReason, SearchHit};
pub use config::Config;
pub use console::Console;
pub use engine::Engine;
pub use error::{ConsoleError, PersistError, StoreError};
pub use persist::{LoadPolicy, LoadReport};
pub use record::{OrderRecord, MAX_RECORDS};
pub use report::{Report, ReportKind};
pub use search::{SearchMethod, SearchOutcome, SearchQuery};
pub use sort::{SortAlgorithm, SortComparison, SortStats};
pub use store::RecordStore;
pub use view::ArrayView;
