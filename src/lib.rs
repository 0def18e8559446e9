//! As-of query engine over an unordered stream of parcel logistics events.
//!
//! ## Features
//! - **Event log**: register, store, remove, unload, transit and deliver events
//!   owned by a single append-only store
//! - **Package index**: every event of a package, in ingestion order
//! - **Client index**: packages each client sent or is due to receive
//! - **As-of queries**: answers use only events ingested so far whose
//!   timestamp is at or before the query's own
//!
//! Records arrive in file order, not time order. A query sees exactly the
//! events that came before it in the input.
//!
//! ```rust
//! use parcelog::Ledger;
//!
//! let input = "100 EV RG 001 alice bob 010 020\n110 EV EN 001 020\n200 CL alice\n";
//! let mut out = Vec::new();
//! Ledger::new().run(input.as_bytes(), &mut out)?;
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "0000200 CL alice\n2\n0000100 EV RG 001 alice bob 010 020\n0000110 EV EN 001 020\n"
//! );
//! # Ok::<(), parcelog::LedgerError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod index;
pub mod ledger;
pub mod record;
pub mod stats;
pub mod store;

pub use builder::LedgerBuilder;
pub use config::{Config, OutputConfig};
pub use error::{LedgerError, Result};
pub use event::{
    Event, EventKind, EventPayload, FacilityId, PackageId, Registration, SectionId, Slot, Timestamp,
};
pub use format::{AnswerWriter, EventLine, render_answer};
pub use index::{ClientIndex, ClientPackages, PackageIndex};
pub use ledger::{Ledger, QueryAnswer, RunSummary};
pub use record::{Query, QueryTarget, Record, parse_record};
pub use stats::LedgerStats;
pub use store::{EventId, EventStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Ledger, LedgerBuilder, LedgerError, OutputConfig, Result};

    pub use crate::{Event, EventKind, EventPayload, PackageId, Timestamp};

    pub use crate::{Query, QueryAnswer, QueryTarget, Record};
}
