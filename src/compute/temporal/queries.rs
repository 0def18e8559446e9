//! As-of query computations over indexed handles.
//!
//! These functions read the store and index slices handed to them and return
//! handles; they never format or copy events.

use super::{chronological, recency, visible};
use crate::event::{EventKind, Timestamp};
use crate::store::{EventId, EventStore};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// What a client query surfaces for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageSnapshot {
    /// First visible register event, in ingestion order
    pub registration: Option<EventId>,
    /// Most recent visible event by [`recency`]
    pub latest: EventId,
}

impl PackageSnapshot {
    /// Registration then latest, with the latest dropped when it is the same event.
    pub fn event_ids(&self) -> SmallVec<[EventId; 2]> {
        let mut ids = SmallVec::new();
        if let Some(registration) = self.registration {
            ids.push(registration);
        }
        if self.registration != Some(self.latest) {
            ids.push(self.latest);
        }
        ids
    }
}

/// Every visible event of one package, in ingestion order.
pub fn package_history(store: &EventStore, handles: &[EventId], as_of: Timestamp) -> Vec<EventId> {
    visible(store, handles, as_of).collect()
}

/// Registration and latest event of one package as of `as_of`.
///
/// Returns `None` when nothing is visible yet. On an exact recency tie the
/// earlier-ingested event is kept.
pub fn package_snapshot(
    store: &EventStore,
    handles: &[EventId],
    as_of: Timestamp,
) -> Option<PackageSnapshot> {
    let mut registration = None;
    let mut latest: Option<EventId> = None;

    for id in visible(store, handles, as_of) {
        let event = &store[id];

        if registration.is_none() && event.kind() == EventKind::Register {
            registration = Some(id);
        }

        latest = match latest {
            Some(current) if recency(event, &store[current]) != Ordering::Greater => Some(current),
            _ => Some(id),
        };
    }

    latest.map(|latest| PackageSnapshot {
        registration,
        latest,
    })
}

/// Stable sort of handles into output order: timestamp, then package id.
pub fn sort_chronologically(store: &EventStore, ids: &mut [EventId]) {
    ids.sort_by(|&a, &b| chronological(&store[a], &store[b]));
}
