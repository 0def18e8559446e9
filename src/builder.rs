//! Ledger builder for flexible configuration

use crate::config::{Config, OutputConfig};
use crate::error::Result;
use crate::ledger::Ledger;
use std::path::Path;

/// Builder for ledger configuration and capacity hints.
#[derive(Debug)]
pub struct LedgerBuilder {
    config: Config,
    capacity: usize,
}

impl LedgerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            capacity: 0,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a JSON or TOML file.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = Config::load(path)?;
        Ok(self)
    }

    /// Value for integer fields missing from a record.
    pub fn missing_field_value(mut self, value: i64) -> Self {
        self.config = self.config.with_missing_field_value(value);
        self
    }

    pub fn output(mut self, output: OutputConfig) -> Self {
        self.config = self.config.with_output(output);
        self
    }

    /// Expected number of events, used to pre-size the store.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build the ledger, validating the configuration.
    pub fn build(self) -> Result<Ledger> {
        Ledger::with_config_and_capacity(self.config, self.capacity)
    }
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
