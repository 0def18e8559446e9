//! Logistics event model.
//!
//! An [`Event`] is immutable once built: a timestamp, the package it refers to
//! and a kind-specific [`EventPayload`]. Every variant carries exactly the
//! fields its kind has, so there are no "unused" placeholder fields.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Timestamp = i64;
pub type PackageId = i64;
pub type FacilityId = i64;
pub type SectionId = i64;

/// Category of an event.
///
/// Variant order is the lifecycle order used to break timestamp ties: a later
/// variant is treated as more recent than an earlier one at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Register,
    Store,
    Remove,
    Unload,
    Transit,
    Deliver,
    Unknown,
}

impl EventKind {
    /// Parse a two-letter kind code. Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RG" => Some(EventKind::Register),
            "AR" => Some(EventKind::Store),
            "RM" => Some(EventKind::Remove),
            "UR" => Some(EventKind::Unload),
            "TR" => Some(EventKind::Transit),
            "EN" => Some(EventKind::Deliver),
            _ => None,
        }
    }

    /// Wire code of a recognized kind; `None` for [`EventKind::Unknown`].
    pub fn code(self) -> Option<&'static str> {
        match self {
            EventKind::Register => Some("RG"),
            EventKind::Store => Some("AR"),
            EventKind::Remove => Some("RM"),
            EventKind::Unload => Some("UR"),
            EventKind::Transit => Some("TR"),
            EventKind::Deliver => Some("EN"),
            EventKind::Unknown => None,
        }
    }
}

/// Warehouse position used by store, remove and unload events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub facility: FacilityId,
    pub section: SectionId,
}

/// Package registration: who sends it, who receives it, and the route endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub sender: String,
    pub recipient: String,
    pub origin: FacilityId,
    pub destination: FacilityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Register(Registration),
    Store(Slot),
    Remove(Slot),
    Unload(Slot),
    Transit {
        origin: FacilityId,
        destination: FacilityId,
    },
    Deliver {
        destination: FacilityId,
    },
    /// Unrecognized kind; keeps the raw code for diagnostics.
    Unknown {
        code: String,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Register(_) => EventKind::Register,
            EventPayload::Store(_) => EventKind::Store,
            EventPayload::Remove(_) => EventKind::Remove,
            EventPayload::Unload(_) => EventKind::Unload,
            EventPayload::Transit { .. } => EventKind::Transit,
            EventPayload::Deliver { .. } => EventKind::Deliver,
            EventPayload::Unknown { .. } => EventKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    timestamp: Timestamp,
    package_id: PackageId,
    payload: EventPayload,
}

impl Event {
    pub fn new(timestamp: Timestamp, package_id: PackageId, payload: EventPayload) -> Self {
        Self {
            timestamp,
            package_id,
            payload,
        }
    }

    pub fn register(
        timestamp: Timestamp,
        package_id: PackageId,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        origin: FacilityId,
        destination: FacilityId,
    ) -> Self {
        Self::new(
            timestamp,
            package_id,
            EventPayload::Register(Registration {
                sender: sender.into(),
                recipient: recipient.into(),
                origin,
                destination,
            }),
        )
    }

    pub fn store(
        timestamp: Timestamp,
        package_id: PackageId,
        facility: FacilityId,
        section: SectionId,
    ) -> Self {
        Self::new(
            timestamp,
            package_id,
            EventPayload::Store(Slot { facility, section }),
        )
    }

    pub fn remove(
        timestamp: Timestamp,
        package_id: PackageId,
        facility: FacilityId,
        section: SectionId,
    ) -> Self {
        Self::new(
            timestamp,
            package_id,
            EventPayload::Remove(Slot { facility, section }),
        )
    }

    pub fn unload(
        timestamp: Timestamp,
        package_id: PackageId,
        facility: FacilityId,
        section: SectionId,
    ) -> Self {
        Self::new(
            timestamp,
            package_id,
            EventPayload::Unload(Slot { facility, section }),
        )
    }

    pub fn transit(
        timestamp: Timestamp,
        package_id: PackageId,
        origin: FacilityId,
        destination: FacilityId,
    ) -> Self {
        Self::new(
            timestamp,
            package_id,
            EventPayload::Transit {
                origin,
                destination,
            },
        )
    }

    pub fn deliver(timestamp: Timestamp, package_id: PackageId, destination: FacilityId) -> Self {
        Self::new(timestamp, package_id, EventPayload::Deliver { destination })
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Registration details, if this is a register event.
    pub fn registration(&self) -> Option<&Registration> {
        match &self.payload {
            EventPayload::Register(registration) => Some(registration),
            _ => None,
        }
    }

    /// Warehouse slot, if this is a store, remove or unload event.
    pub fn slot(&self) -> Option<Slot> {
        match self.payload {
            EventPayload::Store(slot) | EventPayload::Remove(slot) | EventPayload::Unload(slot) => {
                Some(slot)
            }
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.kind() != EventKind::Unknown
    }

    /// Code printed after `EV`: the kind code, or the raw code of an unknown kind.
    pub fn code(&self) -> &str {
        match &self.payload {
            EventPayload::Unknown { code } => code.as_str(),
            payload => payload.kind().code().unwrap_or_default(),
        }
    }

    /// Canonical text form with the default padding widths.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = crate::config::OutputConfig::default();
        fmt::Display::fmt(&crate::format::EventLine::new(self, &output), f)
    }
}
