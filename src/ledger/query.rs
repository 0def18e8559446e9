//! As-of queries over the package and client indices.

use super::Ledger;
use crate::compute::temporal::queries::{package_history, package_snapshot, sort_chronologically};
use crate::event::{Event, PackageId, Timestamp};
use crate::record::{Query, QueryTarget};
use crate::store::EventId;

/// Result of one query: the events to report, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer<'a> {
    /// Time the query was asked at
    pub timestamp: Timestamp,
    pub target: QueryTarget,
    pub events: Vec<&'a Event>,
}

impl QueryAnswer<'_> {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Ledger {
    /// Answer a parsed query and count it in the statistics.
    pub fn answer(&mut self, query: Query) -> QueryAnswer<'_> {
        match query.target {
            QueryTarget::Package(package_id) => {
                self.inner.stats.record_package_query();
                self.query_package(query.timestamp, package_id)
            }
            QueryTarget::Client(client) => {
                self.inner.stats.record_client_query();
                self.query_client(query.timestamp, &client)
            }
        }
    }

    /// Every event of `package_id` with timestamp at or before `as_of`.
    ///
    /// Events keep the order in which they were ingested; they are not
    /// sorted by time. An unknown package yields an empty answer.
    pub fn query_package(&self, as_of: Timestamp, package_id: PackageId) -> QueryAnswer<'_> {
        let ids = self
            .inner
            .packages
            .get(package_id)
            .map(|handles| package_history(&self.inner.store, handles, as_of))
            .unwrap_or_default();

        log::debug!(
            "PC {} as of {}: {} event(s)",
            package_id,
            as_of,
            ids.len()
        );

        self.answer_from(as_of, QueryTarget::Package(package_id), ids)
    }

    /// Registration and latest event of every package `client` is involved
    /// with, as of `as_of`.
    ///
    /// Each package contributes its first visible register event and its
    /// most recent visible event (timestamp first, later lifecycle stage on
    /// ties), or a single entry when those are the same event. The result is
    /// ordered by timestamp, then package id. An unknown client yields an
    /// empty answer.
    pub fn query_client(&self, as_of: Timestamp, client: &str) -> QueryAnswer<'_> {
        let mut ids: Vec<EventId> = Vec::new();

        if let Some(packages) = self.inner.clients.get(client) {
            for package_id in packages.touched() {
                let Some(handles) = self.inner.packages.get(package_id) else {
                    continue;
                };
                if let Some(snapshot) = package_snapshot(&self.inner.store, handles, as_of) {
                    ids.extend(snapshot.event_ids());
                }
            }
        }

        sort_chronologically(&self.inner.store, &mut ids);

        log::debug!("CL {} as of {}: {} event(s)", client, as_of, ids.len());

        self.answer_from(as_of, QueryTarget::Client(client.to_string()), ids)
    }

    fn answer_from(
        &self,
        timestamp: Timestamp,
        target: QueryTarget,
        ids: Vec<EventId>,
    ) -> QueryAnswer<'_> {
        QueryAnswer {
            timestamp,
            target,
            events: ids.into_iter().map(|id| &self.inner.store[id]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn timestamps(answer: &QueryAnswer<'_>) -> Vec<Timestamp> {
        answer.events.iter().map(|ev| ev.timestamp()).collect()
    }

    #[test]
    fn test_package_query_subsequence_in_ingestion_order() {
        let mut ledger = Ledger::new();
        ledger.ingest(Event::transit(300, 1, 10, 20));
        ledger.ingest(Event::register(100, 1, "alice", "bob", 10, 20));
        ledger.ingest(Event::store(200, 1, 10, 2));
        ledger.ingest(Event::deliver(400, 1, 20));

        assert_eq!(timestamps(&ledger.query_package(250, 1)), vec![100, 200]);
        assert_eq!(timestamps(&ledger.query_package(350, 1)), vec![300, 100, 200]);
        assert!(ledger.query_package(99, 1).is_empty());
    }

    #[test]
    fn test_package_query_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.ingest(Event::register(100, 1, "alice", "bob", 10, 20));
        ledger.ingest(Event::store(150, 1, 10, 2));

        let first = ledger.query_package(160, 1);
        let second = ledger.query_package(160, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_targets_are_empty() {
        let ledger = Ledger::new();
        let answer = ledger.query_package(100, 42);
        assert!(answer.is_empty());
        assert_eq!(answer.target, QueryTarget::Package(42));

        let answer = ledger.query_client(100, "nobody");
        assert!(answer.is_empty());
        assert_eq!(answer.target, QueryTarget::Client("nobody".to_string()));
    }

    #[test]
    fn test_client_query_register_and_latest() {
        let mut ledger = Ledger::new();
        ledger.ingest(Event::register(100, 1, "alice", "bob", 10, 20));
        ledger.ingest(Event::deliver(110, 1, 20));

        let answer = ledger.query_client(200, "alice");
        assert_eq!(answer.len(), 2);
        assert_eq!(answer.events[0].kind(), EventKind::Register);
        assert_eq!(answer.events[1].kind(), EventKind::Deliver);

        let answer = ledger.query_client(105, "bob");
        assert_eq!(answer.len(), 1);
        assert_eq!(answer.events[0].kind(), EventKind::Register);
    }

    #[test]
    fn test_client_query_tie_break_and_sort() {
        let mut ledger = Ledger::new();
        ledger.ingest(Event::register(10, 2, "alice", "bob", 1, 2));
        ledger.ingest(Event::register(10, 1, "carol", "alice", 1, 2));
        ledger.ingest(Event::transit(50, 2, 1, 2));
        ledger.ingest(Event::unload(50, 2, 2, 7));
        ledger.ingest(Event::store(20, 1, 1, 3));
        ledger.ingest(Event::remove(20, 1, 1, 3));

        let answer = ledger.query_client(60, "alice");
        let rows: Vec<_> = answer
            .events
            .iter()
            .map(|ev| (ev.timestamp(), ev.package_id(), ev.kind()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (10, 1, EventKind::Register),
                (10, 2, EventKind::Register),
                (20, 1, EventKind::Remove),
                (50, 2, EventKind::Transit),
            ]
        );
    }

    #[test]
    fn test_client_query_bounded_and_unique() {
        let mut ledger = Ledger::new();
        for package in 0..5 {
            ledger.ingest(Event::register(package, package, "dave", "erin", 1, 2));
            ledger.ingest(Event::store(package + 10, package, 1, 1));
            ledger.ingest(Event::transit(package + 20, package, 1, 2));
        }

        let answer = ledger.query_client(1_000, "erin");
        assert!(answer.len() <= 2 * 5);
        for (i, a) in answer.events.iter().enumerate() {
            for b in &answer.events[i + 1..] {
                assert!(!std::ptr::eq(*a, *b));
            }
        }

        let ts = timestamps(&answer);
        let mut sorted = ts.clone();
        sorted.sort();
        assert_eq!(ts, sorted);
    }

    #[test]
    fn test_answer_counts_queries() {
        let mut ledger = Ledger::new();
        ledger.answer(Query {
            timestamp: 1,
            target: QueryTarget::Package(1),
        });
        ledger.answer(Query {
            timestamp: 1,
            target: QueryTarget::Client("x".to_string()),
        });

        let stats = ledger.stats();
        assert_eq!(stats.package_queries, 1);
        assert_eq!(stats.client_queries, 1);
    }
}
