//! Applying a reconciliation to a destination store.

use tracing::{info, warn};

use crate::error::SyncError;
use crate::event::Event;
use crate::sync::{ActionKind, EventStore, Reconciliation};

/// Result of a single insert or delete.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub event: Event,
    /// Error message when the store rejected the action
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Every action attempted during a run, in the order it was attempted.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<ActionOutcome>,
}

impl SyncReport {
    fn count(&self, kind: ActionKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.kind == kind && o.is_success())
            .count()
    }

    pub fn inserted(&self) -> usize {
        self.count(ActionKind::Insert)
    }

    pub fn deleted(&self) -> usize {
        self.count(ActionKind::Delete)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Apply deletes (destination order) then inserts (source order), one at a time.
///
/// A failed action is recorded and the remaining actions are still attempted.
pub async fn apply<S: EventStore>(store: &S, plan: &Reconciliation) -> SyncReport {
    let mut report = SyncReport::default();

    for event in &plan.to_delete {
        let result = match event.id.as_deref() {
            Some(id) => store.delete(id).await,
            None => Err(SyncError::MissingEventId(event.summary.clone())),
        };
        report.outcomes.push(outcome(ActionKind::Delete, event, result.map(|_| ())));
    }

    for event in &plan.to_insert {
        let result = store.insert(event).await;
        report.outcomes.push(outcome(ActionKind::Insert, event, result.map(|_| ())));
    }

    report
}

fn outcome(kind: ActionKind, event: &Event, result: Result<(), SyncError>) -> ActionOutcome {
    let when = event.render_time();

    let error = match result {
        Ok(()) => {
            info!(action = ?kind, summary = %event.summary, %when, "Applied");
            None
        }
        Err(e) => {
            warn!(action = ?kind, summary = %event.summary, %when, error = %e, "Failed");
            Some(e.to_string())
        }
    };

    ActionOutcome {
        kind,
        event: event.clone(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRange;
    use crate::error::SyncResult;
    use crate::sync::reconcile;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    /// In-memory store that rejects a configurable summary.
    #[derive(Default)]
    struct MemoryStore {
        events: RefCell<Vec<Event>>,
        calls: RefCell<Vec<String>>,
        reject: Option<String>,
        next_id: RefCell<u32>,
    }

    impl MemoryStore {
        fn with(events: Vec<Event>) -> Self {
            MemoryStore {
                events: RefCell::new(events),
                ..Default::default()
            }
        }

        fn rejecting(mut self, summary: &str) -> Self {
            self.reject = Some(summary.to_string());
            self
        }
    }

    impl EventStore for MemoryStore {
        async fn list(&self, _range: &DateRange) -> SyncResult<Vec<Event>> {
            Ok(self.events.borrow().clone())
        }

        async fn insert(&self, event: &Event) -> SyncResult<Event> {
            self.calls.borrow_mut().push(format!("insert {}", event.summary));
            if self.reject.as_deref() == Some(event.summary.as_str()) {
                return Err(SyncError::Provider("quota exceeded".into()));
            }

            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            let stored = event.clone().with_id(format!("new{}", *next_id));
            self.events.borrow_mut().push(stored.clone());
            Ok(stored)
        }

        async fn delete(&self, event_id: &str) -> SyncResult<()> {
            self.calls.borrow_mut().push(format!("delete {event_id}"));
            let mut events = self.events.borrow_mut();
            let before = events.len();
            events.retain(|e| e.id.as_deref() != Some(event_id));
            if events.len() == before {
                return Err(SyncError::Provider(format!("no event {event_id}")));
            }
            Ok(())
        }
    }

    fn all_day(summary: &str, d: u32) -> Event {
        let start = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        Event::all_day(summary, start, start.succ_opt().unwrap())
    }

    #[tokio::test]
    async fn applies_deletes_then_inserts_in_order() {
        let store = MemoryStore::with(vec![
            all_day("Old 1", 10).with_id("o1"),
            all_day("Keep", 11).with_id("k"),
            all_day("Old 2", 12).with_id("o2"),
        ]);
        let source = vec![all_day("New 1", 13), all_day("Keep", 11), all_day("New 2", 14)];

        let destination = store.list(&DateRange::default()).await.unwrap();
        let plan = reconcile(&source, &destination);
        let report = apply(&store, &plan).await;

        assert_eq!(
            *store.calls.borrow(),
            ["delete o1", "delete o2", "insert New 1", "insert New 2"]
        );
        assert_eq!(report.inserted(), 2);
        assert_eq!(report.deleted(), 2);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn failures_do_not_stop_remaining_actions() {
        let store = MemoryStore::with(vec![]).rejecting("B");
        let plan = Reconciliation {
            to_insert: vec![all_day("A", 10), all_day("B", 11), all_day("C", 12)],
            to_delete: vec![all_day("Gone", 9).with_id("missing")],
        };

        let report = apply(&store, &plan).await;

        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.inserted(), 2);
        assert_eq!(report.deleted(), 0);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());

        let failed: Vec<_> = report.failures().map(|o| o.event.summary.as_str()).collect();
        assert_eq!(failed, ["Gone", "B"]);
    }

    #[tokio::test]
    async fn delete_without_id_is_a_failed_outcome() {
        let store = MemoryStore::default();
        let plan = Reconciliation {
            to_insert: vec![],
            to_delete: vec![all_day("Orphan", 10)],
        };

        let report = apply(&store, &plan).await;

        assert_eq!(report.failed(), 1);
        assert!(store.calls.borrow().is_empty());
        assert!(report.outcomes[0].error.as_deref().unwrap().contains("Orphan"));
    }

    #[tokio::test]
    async fn second_run_converges() {
        let store = MemoryStore::with(vec![all_day("Stale", 9).with_id("s")]);
        let source = vec![all_day("A", 10), all_day("B", 11)];

        let first = reconcile(&source, &store.list(&DateRange::default()).await.unwrap());
        apply(&store, &first).await;

        let second = reconcile(&source, &store.list(&DateRange::default()).await.unwrap());
        assert!(second.is_empty());
    }
}
