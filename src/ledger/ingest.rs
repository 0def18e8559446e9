//! Ingestion: storing events and maintaining both indices.

use super::{Ledger, LedgerInner};
use crate::event::{Event, EventPayload};
use crate::store::EventId;

impl Ledger {
    /// Store an event and index it.
    ///
    /// The event is appended to the store and to its package's history. A
    /// register event also adds the package to the sender's "sent" set and the
    /// recipient's "to receive" set. Events of an unrecognized kind are
    /// dropped without touching the store or the indices; `None` is returned
    /// for them.
    ///
    /// ```rust
    /// use parcelog::{Event, EventPayload, Ledger};
    ///
    /// let mut ledger = Ledger::new();
    /// assert!(ledger.ingest(Event::register(1, 7, "alice", "bob", 1, 2)).is_some());
    ///
    /// let unknown = Event::new(2, 7, EventPayload::Unknown { code: "ZZ".into() });
    /// assert!(ledger.ingest(unknown).is_none());
    /// assert_eq!(ledger.event_count(), 1);
    /// ```
    pub fn ingest(&mut self, event: Event) -> Option<EventId> {
        if !event.is_known() {
            log::debug!(
                "Discarding event of unknown kind '{}' for package {} at {}",
                event.code(),
                event.package_id(),
                event.timestamp()
            );
            self.inner.stats.record_discarded();
            return None;
        }

        Some(self.inner.index_event(event))
    }
}

impl LedgerInner {
    pub(super) fn index_event(&mut self, event: Event) -> EventId {
        let package_id = event.package_id();

        if let EventPayload::Register(registration) = event.payload() {
            self.clients.insert_sent(&registration.sender, package_id);
            self.clients
                .insert_to_receive(&registration.recipient, package_id);
        }

        let id = self.store.append(event);
        self.packages.insert(package_id, id);
        self.stats.record_indexed();

        log::trace!("Indexed event {} for package {}", id.index(), package_id);
        id
    }
}
