//! Derived lookup structures over the event store.
//!
//! [`PackageIndex`] lists, per package, the handles of its events in
//! ingestion order. [`ClientIndex`] records, per client name, which packages
//! the client sent and which it is due to receive. Both hold handles or ids
//! only; the events themselves stay in the [`EventStore`](crate::store::EventStore).

use crate::event::PackageId;
use crate::store::EventId;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Package id -> event handles, insertion-ordered
#[derive(Debug, Default)]
pub struct PackageIndex {
    entries: FxHashMap<PackageId, Vec<EventId>>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle under `package_id`, creating the entry on first use.
    pub fn insert(&mut self, package_id: PackageId, id: EventId) {
        self.entries.entry(package_id).or_default().push(id);
    }

    /// Handles for a package, or `None` if the package was never seen.
    pub fn get(&self, package_id: PackageId) -> Option<&[EventId]> {
        self.entries.get(&package_id).map(Vec::as_slice)
    }

    /// Number of distinct packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Packages a client is involved with, split by role
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientPackages {
    pub sent: BTreeSet<PackageId>,
    pub to_receive: BTreeSet<PackageId>,
}

impl ClientPackages {
    /// Every package the client touched in either role, ascending, each once.
    pub fn touched(&self) -> BTreeSet<PackageId> {
        self.sent.union(&self.to_receive).copied().collect()
    }
}

/// Client name -> packages sent and to receive
#[derive(Debug, Default)]
pub struct ClientIndex {
    entries: FxHashMap<String, ClientPackages>,
}

impl ClientIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `client` sent `package_id`. Returns false if already recorded.
    pub fn insert_sent(&mut self, client: &str, package_id: PackageId) -> bool {
        self.entry(client).sent.insert(package_id)
    }

    /// Record that `client` is due to receive `package_id`. Returns false if already recorded.
    pub fn insert_to_receive(&mut self, client: &str, package_id: PackageId) -> bool {
        self.entry(client).to_receive.insert(package_id)
    }

    fn entry(&mut self, client: &str) -> &mut ClientPackages {
        self.entries.entry(client.to_string()).or_default()
    }

    pub fn get(&self, client: &str) -> Option<&ClientPackages> {
        self.entries.get(client)
    }

    /// Number of distinct clients
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
