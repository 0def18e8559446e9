//! Line-record codec.
//!
//! One input line holds one record, whitespace-tokenized:
//!
//! ```text
//! <timestamp> EV <KIND> <packageId> <kind fields...>
//! <timestamp> CL <clientName>
//! <timestamp> PC <packageId>
//! ```
//!
//! Parsing is best effort. A missing timestamp or discriminator makes the
//! record unusable; anything after that is filled in: missing integers take
//! the configured sentinel, missing names are empty and an absent or
//! unrecognized kind code yields an [`EventPayload::Unknown`] event.

use crate::error::{LedgerError, Result};
use crate::event::{Event, EventKind, EventPayload, PackageId, Registration, Slot, Timestamp};
use std::str::SplitWhitespace;

/// What a query asks about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryTarget {
    Client(String),
    Package(PackageId),
}

/// An as-of query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub timestamp: Timestamp,
    pub target: QueryTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Event(Event),
    Query(Query),
}

/// Parse one line. `missing` fills integer fields that are absent or unparsable.
pub fn parse_record(line: &str, missing: i64) -> Result<Record> {
    let mut fields = Fields {
        tokens: line.split_whitespace(),
        missing,
    };

    let timestamp = match fields.next_token() {
        Some(token) => token.parse::<Timestamp>().map_err(|_| {
            LedgerError::MalformedRecord(format!("invalid timestamp '{}'", token))
        })?,
        None => return Err(LedgerError::MalformedRecord("empty record".to_string())),
    };

    let discriminator = fields
        .next_token()
        .ok_or_else(|| LedgerError::MalformedRecord(format!("no record type after {}", timestamp)))?;

    match discriminator {
        "EV" => Ok(Record::Event(fields.event(timestamp))),
        "CL" => Ok(Record::Query(Query {
            timestamp,
            target: QueryTarget::Client(fields.string()),
        })),
        "PC" => Ok(Record::Query(Query {
            timestamp,
            target: QueryTarget::Package(fields.int()),
        })),
        other => Err(LedgerError::UnknownDiscriminator(other.to_string())),
    }
}

struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    missing: i64,
}

impl<'a> Fields<'a> {
    fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    fn int(&mut self) -> i64 {
        self.next_token()
            .and_then(|token| token.parse().ok())
            .unwrap_or(self.missing)
    }

    fn string(&mut self) -> String {
        self.next_token().unwrap_or_default().to_string()
    }

    fn slot(&mut self) -> Slot {
        Slot {
            facility: self.int(),
            section: self.int(),
        }
    }

    fn event(&mut self, timestamp: Timestamp) -> Event {
        let code = self.next_token().unwrap_or_default();
        let kind = EventKind::from_code(code);
        let package_id = self.int();

        let payload = match kind {
            Some(EventKind::Register) => EventPayload::Register(Registration {
                sender: self.string(),
                recipient: self.string(),
                origin: self.int(),
                destination: self.int(),
            }),
            Some(EventKind::Store) => EventPayload::Store(self.slot()),
            Some(EventKind::Remove) => EventPayload::Remove(self.slot()),
            Some(EventKind::Unload) => EventPayload::Unload(self.slot()),
            Some(EventKind::Transit) => EventPayload::Transit {
                origin: self.int(),
                destination: self.int(),
            },
            Some(EventKind::Deliver) => EventPayload::Deliver {
                destination: self.int(),
            },
            Some(EventKind::Unknown) | None => EventPayload::Unknown {
                code: code.to_string(),
            },
        };

        Event::new(timestamp, package_id, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> Event {
        match parse_record(line, -1).unwrap() {
            Record::Event(ev) => ev,
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_register() {
        let ev = event("100 EV RG 001 alice bob 010 020");
        assert_eq!(ev, Event::register(100, 1, "alice", "bob", 10, 20));
    }

    #[test]
    fn test_parse_every_kind() {
        assert_eq!(event("5 EV AR 2 3 4"), Event::store(5, 2, 3, 4));
        assert_eq!(event("5 EV RM 2 3 4"), Event::remove(5, 2, 3, 4));
        assert_eq!(event("5 EV UR 2 3 4"), Event::unload(5, 2, 3, 4));
        assert_eq!(event("5 EV TR 2 3 4"), Event::transit(5, 2, 3, 4));
        assert_eq!(event("5 EV EN 2 4"), Event::deliver(5, 2, 4));
    }

    #[test]
    fn test_parse_queries() {
        assert_eq!(
            parse_record("0000200 CL alice", -1).unwrap(),
            Record::Query(Query {
                timestamp: 200,
                target: QueryTarget::Client("alice".to_string()),
            })
        );
        assert_eq!(
            parse_record("  150\tPC   007  ", -1).unwrap(),
            Record::Query(Query {
                timestamp: 150,
                target: QueryTarget::Package(7),
            })
        );
    }

    #[test]
    fn test_truncated_fields_use_sentinel() {
        assert_eq!(event("5 EV TR 2 3"), Event::transit(5, 2, 3, -1));
        assert_eq!(event("5 EV AR 2 x 9"), Event::store(5, 2, -1, 9));
        assert_eq!(event("5 EV RG 2 alice"), Event::register(5, 2, "alice", "", -1, -1));

        match parse_record("5 EV EN", 0).unwrap() {
            Record::Event(ev) => assert_eq!(ev, Event::deliver(5, 0, 0)),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(
            parse_record("9 PC", -1).unwrap(),
            Record::Query(Query {
                timestamp: 9,
                target: QueryTarget::Package(-1),
            })
        );
    }

    #[test]
    fn test_unknown_kind_is_still_an_event() {
        let ev = event("5 EV XX 2 3 4");
        assert_eq!(ev.kind(), EventKind::Unknown);
        assert_eq!(ev.package_id(), 2);
        assert_eq!(ev.code(), "XX");

        let ev = event("5 EV");
        assert_eq!(ev.kind(), EventKind::Unknown);
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            parse_record("", -1),
            Err(LedgerError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_record("abc EV RG 1", -1),
            Err(LedgerError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_record("100", -1),
            Err(LedgerError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_record("100 XY 1", -1),
            Err(LedgerError::UnknownDiscriminator(code)) if code == "XY"
        ));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        assert_eq!(event("5 EV EN 2 4 trailing junk"), Event::deliver(5, 2, 4));
    }
}
