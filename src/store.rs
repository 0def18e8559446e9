//! Event store: the single owner of every ingested event.
//!
//! Events are appended and never removed, so the position of an event in the
//! store is a stable handle. Indices keep [`EventId`]s instead of copies.

use crate::event::Event;

/// Stable handle to an event inside an [`EventStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(usize);

impl EventId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only arena of events in ingestion order
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Take ownership of an event and return its handle.
    pub fn append(&mut self, event: Event) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(event);
        id
    }

    /// Handles only come from `append` on this store, so lookups always hit.
    /// Indexing with a handle from another store panics.
    #[inline]
    pub fn get(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    pub fn try_get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl std::ops::Index<EventId> for EventStore {
    type Output = Event;

    fn index(&self, id: EventId) -> &Event {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequential_handles() {
        let mut store = EventStore::with_capacity(4);
        assert!(store.is_empty());

        let a = store.append(Event::deliver(3, 1, 2));
        let b = store.append(Event::store(1, 1, 2, 3));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store[a].timestamp(), 3);
        assert_eq!(store.get(b).timestamp(), 1);
        assert!(store.try_get(EventId(2)).is_none());
    }

    #[test]
    fn test_handles_follow_ingestion_order() {
        let mut store = EventStore::new();
        for ts in [30, 10, 20] {
            store.append(Event::deliver(ts, 1, 1));
        }
        let order: Vec<_> = (0..store.len())
            .map(|i| store[EventId(i)].timestamp())
            .collect();
        assert_eq!(order, vec![30, 10, 20]);
    }
}
