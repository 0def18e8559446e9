//! Ledger session: the event store plus the package and client indices.
//!
//! A [`Ledger`] owns every event it ingests. The indices hold
//! [`EventId`] handles into the store, so the whole structure is dropped as a
//! unit and no index entry can outlive its event.
//!
//! Records are applied strictly in arrival order. A query sees exactly the
//! events ingested before it, whatever their timestamps:
//!
//! ```rust
//! use parcelog::{Event, Ledger};
//!
//! let mut ledger = Ledger::new();
//! let early = ledger.query_package(500, 1);
//! assert!(early.is_empty());
//!
//! ledger.ingest(Event::register(100, 1, "alice", "bob", 10, 20));
//! let later = ledger.query_package(500, 1);
//! assert_eq!(later.len(), 1);
//! ```

use crate::builder::LedgerBuilder;
use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::event::{Event, PackageId};
use crate::index::{ClientIndex, ClientPackages, PackageIndex};
use crate::stats::LedgerStats;
use crate::store::{EventId, EventStore};

mod ingest;
mod query;
mod run;

pub use query::QueryAnswer;
pub use run::RunSummary;

/// Ingestion and as-of query session over one event log.
#[derive(Debug)]
pub struct Ledger {
    pub(crate) inner: LedgerInner,
}

#[derive(Debug)]
pub(crate) struct LedgerInner {
    /// Owner of every ingested event, in ingestion order
    pub store: EventStore,
    /// Package id -> handles
    pub packages: PackageIndex,
    /// Client name -> packages sent / to receive
    pub clients: ClientIndex,
    pub stats: LedgerStats,
    pub config: Config,
}

impl LedgerInner {
    fn new(config: Config, capacity: usize) -> Self {
        Self {
            store: EventStore::with_capacity(capacity),
            packages: PackageIndex::new(),
            clients: ClientIndex::new(),
            stats: LedgerStats::new(),
            config,
        }
    }
}

impl Ledger {
    /// Empty ledger with the default configuration.
    pub fn new() -> Self {
        Self {
            inner: LedgerInner::new(Config::default(), 0),
        }
    }

    /// Empty ledger with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_config_and_capacity(config, 0)
    }

    pub(crate) fn with_config_and_capacity(config: Config, capacity: usize) -> Result<Self> {
        config.validate().map_err(LedgerError::InvalidConfig)?;
        Ok(Self {
            inner: LedgerInner::new(config, capacity),
        })
    }

    /// Create a ledger builder for advanced configuration.
    ///
    /// ```rust
    /// use parcelog::Ledger;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let ledger = Ledger::builder()
    ///     .missing_field_value(0)
    ///     .capacity(1024)
    ///     .build()?;
    /// assert_eq!(ledger.config().missing_field_value, 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get ledger statistics
    pub fn stats(&self) -> LedgerStats {
        self.inner.stats.clone()
    }

    /// Number of events held by the store
    pub fn event_count(&self) -> usize {
        self.inner.store.len()
    }

    /// Number of distinct packages indexed
    pub fn package_count(&self) -> usize {
        self.inner.packages.len()
    }

    /// Number of distinct clients indexed
    pub fn client_count(&self) -> usize {
        self.inner.clients.len()
    }

    /// Resolve a handle returned by [`Ledger::ingest`].
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.inner.store.try_get(id)
    }

    /// Every event of a package in ingestion order, regardless of time.
    pub fn package_events(&self, package_id: PackageId) -> Vec<&Event> {
        self.inner
            .packages
            .get(package_id)
            .map(|ids| ids.iter().map(|&id| &self.inner.store[id]).collect())
            .unwrap_or_default()
    }

    /// Packages a client sent or is due to receive.
    pub fn client_packages(&self, client: &str) -> Option<&ClientPackages> {
        self.inner.clients.get(client)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.event_count(), 0);
        assert_eq!(ledger.package_count(), 0);
        assert_eq!(ledger.client_count(), 0);
        assert_eq!(ledger.stats(), LedgerStats::default());
        assert!(ledger.package_events(1).is_empty());
        assert!(ledger.client_packages("alice").is_none());
    }

    #[test]
    fn test_with_config_validates() {
        let bad = Config::default().with_output(OutputConfig::default().with_field_width(0));
        assert!(matches!(
            Ledger::with_config(bad),
            Err(LedgerError::InvalidConfig(_))
        ));
        assert!(Ledger::with_config(Config::default()).is_ok());
    }

    #[test]
    fn test_package_events_returns_all_times() {
        let mut ledger = Ledger::new();
        ledger.ingest(Event::deliver(300, 4, 1));
        ledger.ingest(Event::register(100, 4, "a", "b", 1, 1));

        let events = ledger.package_events(4);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp(), 300);
    }
}
