use serde::{Deserialize, Serialize};

/// Ledger statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Events stored and indexed
    pub events_indexed: u64,
    /// Events dropped because their kind was not recognized
    pub events_discarded: u64,
    /// Records skipped because they could not be parsed
    pub malformed_records: u64,
    pub package_queries: u64,
    pub client_queries: u64,
    pub blank_lines: u64,
}

impl LedgerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_indexed(&mut self) {
        self.events_indexed += 1;
    }

    pub fn record_discarded(&mut self) {
        self.events_discarded += 1;
    }

    pub fn record_malformed(&mut self) {
        self.malformed_records += 1;
    }

    pub fn record_blank(&mut self) {
        self.blank_lines += 1;
    }

    pub fn record_package_query(&mut self) {
        self.package_queries += 1;
    }

    pub fn record_client_query(&mut self) {
        self.client_queries += 1;
    }

    pub fn queries(&self) -> u64 {
        self.package_queries + self.client_queries
    }
}
