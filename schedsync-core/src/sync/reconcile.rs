//! Diff between the source events and what the destination already holds.

use std::collections::{HashMap, HashSet};

use crate::event::Event;

/// What has to change in the destination so it mirrors the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Source events with no matching destination event, in source order
    pub to_insert: Vec<Event>,
    /// Destination events with no matching source event, in destination order
    pub to_delete: Vec<Event>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }

    /// Whether applying would delete destination events although the source
    /// came back empty.
    pub fn needs_force(&self, source: &[Event]) -> bool {
        source.is_empty() && !self.to_delete.is_empty()
    }
}

/// Compute inserts and deletes.
///
/// An event is matched when any event on the other side is the same
/// occurrence (see [`Event::same_occurrence`]). Matching is existence-based:
/// one destination event can satisfy several identical source events and
/// the other way round. Matched events are never touched, even when their
/// description or location differ.
pub fn reconcile(source: &[Event], destination: &[Event]) -> Reconciliation {
    // Occurrences only match on equal summaries, so each source event only
    // needs to be compared against the destination events sharing its summary.
    let mut by_summary: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, event) in destination.iter().enumerate() {
        by_summary.entry(event.summary.as_str()).or_default().push(i);
    }

    let mut matched_source = HashSet::new();
    let mut matched_destination = HashSet::new();

    for (i, event) in source.iter().enumerate() {
        let Some(candidates) = by_summary.get(event.summary.as_str()) else {
            continue;
        };

        for &j in candidates {
            if event.same_occurrence(&destination[j]) {
                matched_source.insert(i);
                matched_destination.insert(j);
            }
        }
    }

    let to_insert = source
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_source.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    let to_delete = destination
        .iter()
        .enumerate()
        .filter(|(j, _)| !matched_destination.contains(j))
        .map(|(_, e)| e.clone())
        .collect();

    Reconciliation {
        to_insert,
        to_delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn all_day(summary: &str, d: u32) -> Event {
        Event::all_day(summary, date(d), date(d + 1))
    }

    fn timed(summary: &str, offset_hours: i32, h: u32) -> Event {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        Event::timed(
            summary,
            tz.with_ymd_and_hms(2024, 1, 10, h, 0, 0).unwrap(),
            tz.with_ymd_and_hms(2024, 1, 10, h + 1, 0, 0).unwrap(),
        )
    }

    fn summaries(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.summary.as_str()).collect()
    }

    #[test]
    fn inserts_new_and_deletes_stale() {
        let a = all_day("A", 10);
        let b = all_day("B", 11);
        let c = all_day("C", 12);

        let source = vec![a, b.clone()];
        let destination = vec![b.with_id("b1"), c.with_id("c1")];

        let plan = reconcile(&source, &destination);

        assert_eq!(summaries(&plan.to_insert), ["A"]);
        assert_eq!(summaries(&plan.to_delete), ["C"]);
        assert_eq!(plan.to_delete[0].id.as_deref(), Some("c1"));
    }

    #[test]
    fn identical_sets_need_no_changes() {
        let source = vec![all_day("A", 10), timed("B", 9, 14), all_day("C", 12)];
        let destination: Vec<Event> = source
            .iter()
            .enumerate()
            .map(|(i, e)| e.clone().with_id(format!("id{i}")))
            .collect();

        let plan = reconcile(&source, &destination);

        assert!(plan.is_empty());
    }

    #[test]
    fn offsets_do_not_matter_for_timed_events() {
        // 14:00+09:00 is 05:00Z
        let source = vec![timed("Planning", 9, 14)];
        let destination = vec![timed("Planning", 0, 5).with_id("x")];

        assert!(reconcile(&source, &destination).is_empty());
    }

    #[test]
    fn all_day_and_timed_never_match() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let source = vec![all_day("Offsite", 10)];
        let destination = vec![
            Event::timed(
                "Offsite",
                tz.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
                tz.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap(),
            )
            .with_id("x"),
        ];

        let plan = reconcile(&source, &destination);

        assert_eq!(plan.to_insert.len(), 1);
        assert_eq!(plan.to_delete.len(), 1);
    }

    #[test]
    fn description_and_location_drift_is_ignored() {
        let source = vec![all_day("A", 10).with_description("new notes").with_location("Room 2")];
        let destination = vec![all_day("A", 10).with_description("old notes").with_id("a1")];

        assert!(reconcile(&source, &destination).is_empty());
    }

    #[test]
    fn same_title_at_different_times_is_distinct() {
        let source = vec![timed("Standup", 9, 9), timed("Standup", 9, 15)];
        let destination = vec![timed("Standup", 9, 9).with_id("s1"), timed("Standup", 9, 11).with_id("s2")];

        let plan = reconcile(&source, &destination);

        assert_eq!(plan.to_insert, vec![timed("Standup", 9, 15)]);
        assert_eq!(plan.to_delete.len(), 1);
        assert_eq!(plan.to_delete[0].id.as_deref(), Some("s2"));
    }

    #[test]
    fn duplicates_match_without_multiplicity() {
        // Two identical source rows against one stored copy: nothing to do.
        let source = vec![all_day("A", 10), all_day("A", 10)];
        let destination = vec![all_day("A", 10).with_id("a1")];
        assert!(reconcile(&source, &destination).is_empty());

        // One source row against two stored copies: both are kept.
        let source = vec![all_day("A", 10)];
        let destination = vec![all_day("A", 10).with_id("a1"), all_day("A", 10).with_id("a2")];
        assert!(reconcile(&source, &destination).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let source = vec![all_day("Z", 10), all_day("M", 11), all_day("A", 12)];
        let destination = vec![all_day("Y", 13).with_id("1"), all_day("B", 14).with_id("2")];

        let plan = reconcile(&source, &destination);

        assert_eq!(summaries(&plan.to_insert), ["Z", "M", "A"]);
        assert_eq!(summaries(&plan.to_delete), ["Y", "B"]);
    }

    #[test]
    fn empty_source_with_pending_deletes_needs_force() {
        let destination = vec![all_day("A", 10).with_id("1")];
        let plan = reconcile(&[], &destination);
        assert!(plan.needs_force(&[]));

        let plan = reconcile(&[], &[]);
        assert!(!plan.needs_force(&[]));

        let source = vec![all_day("B", 11)];
        let plan = reconcile(&source, &destination);
        assert_eq!(plan.to_delete.len(), 1);
        assert!(!plan.needs_force(&source));
    }

    #[test]
    fn empty_source_deletes_everything() {
        let destination = vec![all_day("A", 10).with_id("1")];
        let plan = reconcile(&[], &destination);

        assert!(plan.to_insert.is_empty());
        assert_eq!(plan.to_delete.len(), 1);
    }
}
