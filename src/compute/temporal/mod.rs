//! Temporal computation and as-of query processing.
//!
//! - visibility: which events a query at time `t` may see
//! - recency: which of two events counts as more recent
//! - `queries`: per-package snapshots and client result ordering

pub mod queries;

use crate::event::{Event, Timestamp};
use crate::store::{EventId, EventStore};
use std::cmp::Ordering;

/// An event is visible to an as-of query when it happened at or before `as_of`.
#[inline]
pub fn is_visible(event: &Event, as_of: Timestamp) -> bool {
    event.timestamp() <= as_of
}

/// Handles from `handles` whose events are visible at `as_of`, in the given order.
pub fn visible<'a>(
    store: &'a EventStore,
    handles: &'a [EventId],
    as_of: Timestamp,
) -> impl Iterator<Item = EventId> + 'a {
    handles
        .iter()
        .copied()
        .filter(move |&id| is_visible(&store[id], as_of))
}

/// Compare two events by recency: timestamp first, then lifecycle stage.
///
/// Of two events at the same instant, the one with the later kind
/// (register < store < remove < unload < transit < deliver) is more recent.
pub fn recency(a: &Event, b: &Event) -> Ordering {
    a.timestamp()
        .cmp(&b.timestamp())
        .then_with(|| a.kind().cmp(&b.kind()))
}

/// Total output order for client answers: timestamp, then package id.
pub fn chronological(a: &Event, b: &Event) -> Ordering {
    a.timestamp()
        .cmp(&b.timestamp())
        .then_with(|| a.package_id().cmp(&b.package_id()))
}
