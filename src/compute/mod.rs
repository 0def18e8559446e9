//! Compute layer for query processing.
//!
//! Query logic is kept apart from ingestion and storage: functions here read
//! the event store and index slices and return handles. Nothing in this layer
//! mutates state or produces text.

pub mod temporal;
