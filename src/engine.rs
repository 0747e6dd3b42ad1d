//! Engine - owns the record store and executes shell commands.
//!
//! Every shell (menu console, one-shot CLI, TUI) drives the store through
//! [`Engine::process_command`], so they all share one set of rules for
//! empty stores, reloads and saves.

use tracing::{info, warn};

use crate::command::{Command, Outcome, RejectReason, SearchHit};
use crate::config::Config;
use crate::error::{PersistError, StoreError};
use crate::persist;
use crate::report;
use crate::search;
use crate::sort::{self, quick_sort};
use crate::store::RecordStore;

/// Command dispatcher over a single [`RecordStore`].
pub struct Engine {
    store: RecordStore,
    config: Config,
}

impl Engine {
    /// Create an engine with an empty store.
    pub fn new(config: Config) -> Self {
        Self {
            store: RecordStore::with_capacity(config.max_records),
            config,
        }
    }

    /// Create an engine around an existing store.
    ///
    /// The store is rebuilt with `config.max_records` as its capacity, so
    /// pushes and reloads agree on the limit. Fails if the store already
    /// holds more records than that.
    pub fn with_store(store: RecordStore, config: Config) -> Result<Self, StoreError> {
        let store = RecordStore::from_records(store.into_records(), config.max_records)?;
        Ok(Self { store, config })
    }

    /// Create an engine, loading the data file if it exists.
    ///
    /// A missing file yields an empty store; any other failure is returned.
    pub fn open(config: Config) -> Result<Self, PersistError> {
        let mut engine = Self::new(config);
        if engine.config.data_file.exists() {
            engine.reload()?;
        } else {
            info!(path = %engine.config.data_file.display(), "no data file, starting empty");
        }
        Ok(engine)
    }

    /// Process a single command and return its outcome.
    ///
    /// This is the main entry point for every shell.
    pub fn process_command(&mut self, cmd: Command) -> Result<Outcome, PersistError> {
        if cmd.needs_data() && self.store.is_empty() {
            warn!(?cmd, "rejected: no data loaded");
            return Ok(Outcome::Rejected(RejectReason::NoData));
        }

        let outcome = match cmd {
            Command::List { sorted } => {
                let presort = sorted.then(|| quick_sort(&mut self.store));
                Outcome::Listed {
                    shown: self.store.len().min(self.config.display_limit),
                    total: self.store.len(),
                    presort,
                }
            }
            Command::Sort(algorithm) => Outcome::Sorted(algorithm.run(&mut self.store)),
            Command::CompareSorts => Outcome::Compared(sort::compare_sorts(&mut self.store)),
            Command::Search(method, query) => {
                let outcome = search::search(&mut self.store, method, &query);
                Outcome::Searched(SearchHit::from_outcome(&query, &outcome))
            }
            Command::Report(kind) => Outcome::Reported(report::build(&self.store, kind)),
            Command::Reload => self.reload()?,
            Command::Save => {
                let count = persist::save_all(&self.config.data_file, self.store.records())?;
                Outcome::Saved { count }
            }
        };

        Ok(outcome)
    }

    fn reload(&mut self) -> Result<Outcome, PersistError> {
        let report = persist::load_all(
            &self.config.data_file,
            self.config.load_policy,
            self.config.max_records,
        )?;
        let count = report.records.len();
        self.store.replace_all(report.records)?;
        Ok(Outcome::Loaded {
            count,
            skipped: report.skipped,
        })
    }

    /// The store, in its current order.
    #[inline]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Mutable access for shells that manage the store directly.
    #[inline]
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total record count.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.store.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
