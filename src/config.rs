//! Runtime configuration shared by the console, CLI and TUI.

use std::path::PathBuf;

use crate::persist::{LoadPolicy, DEFAULT_DATA_FILE};
use crate::record::MAX_RECORDS;

/// Records shown by list commands unless configured otherwise.
pub const DISPLAY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Order file read on start and reload, written on save
    pub data_file: PathBuf,
    /// Records shown by list commands
    pub display_limit: usize,
    /// Store capacity
    pub max_records: usize,
    /// How malformed lines are handled on load
    pub load_policy: LoadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            display_limit: DISPLAY_LIMIT,
            max_records: MAX_RECORDS,
            load_policy: LoadPolicy::Strict,
        }
    }
}
