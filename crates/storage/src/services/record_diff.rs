//! Snapshot comparison: which records in the new snapshot are newly set or
//! newly tied relative to the old one.

use std::collections::HashSet;

use crate::models::{Event, Record, ResultKind};
use crate::snapshot::RecordSnapshot;

/// Compares two snapshots event by event, singles then averages, and returns
/// every record that represents a record-setting change, in event order.
///
/// For each (event, kind) pair, with both lists best-first:
/// - a strictly better new best reports the whole new list (all tied holders),
/// - no improvement but a longer list reports only the added holders,
/// - an empty old or new list reports nothing. An empty old side could mean
///   "no prior data" just as well as "no prior record", so it is never treated
///   as all-new.
pub fn new_records(old: &RecordSnapshot, new: &RecordSnapshot) -> Vec<Record> {
    let mut found = Vec::new();
    for event in Event::ALL {
        for kind in [ResultKind::Single, ResultKind::Average] {
            compare_lists(
                old.records_for(event),
                new.records_for(event),
                kind,
                &mut found,
            );
        }
    }
    found
}

fn compare_lists(old: &[Record], new: &[Record], kind: ResultKind, out: &mut Vec<Record>) {
    let new_list: Vec<&Record> = new.iter().filter(|r| r.kind == kind).collect();
    let old_list: Vec<&Record> = old.iter().filter(|r| r.kind == kind).collect();

    let (Some(new_best), Some(old_best)) = (new_list.first(), old_list.first()) else {
        return;
    };

    if new_best.result < old_best.result {
        // Lower is better for every event (times or move counts). A strict
        // improvement reports the entire new list, ties included.
        out.extend(new_list.into_iter().cloned());
    } else if new_list.len() > old_list.len() {
        // Same best, more holders: report only the added ones, in list order.
        let old_set: HashSet<&Record> = old_list.into_iter().collect();
        out.extend(
            new_list
                .into_iter()
                .filter(|r| !old_set.contains(*r))
                .cloned(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn record(person_id: &str, event: Event, kind: ResultKind, result: i64) -> Record {
        Record {
            person_id: person_id.to_string(),
            name: format!("Person {person_id}"),
            gender: Gender::Male,
            result,
            event,
            kind,
        }
    }

    fn snapshot(records: Vec<Record>) -> RecordSnapshot {
        let mut snapshot = RecordSnapshot::empty();
        for rec in records {
            snapshot.push(rec);
        }
        snapshot
    }

    #[test]
    fn test_new_record_reports_whole_list() {
        let old = snapshot(vec![record("A", Event::ThreeByThree, ResultKind::Single, 650)]);
        let new = snapshot(vec![
            record("B", Event::ThreeByThree, ResultKind::Single, 600),
            record("C", Event::ThreeByThree, ResultKind::Single, 600),
        ]);

        let found = new_records(&old, &new);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].person_id, "B");
        assert_eq!(found[1].person_id, "C");
    }

    #[test]
    fn test_tied_record_reports_only_added_holder() {
        let old = snapshot(vec![record("A", Event::ThreeByThree, ResultKind::Single, 600)]);
        let new = snapshot(vec![
            record("A", Event::ThreeByThree, ResultKind::Single, 600),
            record("B", Event::ThreeByThree, ResultKind::Single, 600),
        ]);

        let found = new_records(&old, &new);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].person_id, "B");
    }

    #[test]
    fn test_no_change_reports_nothing() {
        let records = vec![
            record("A", Event::ThreeByThree, ResultKind::Single, 600),
            record("A", Event::ThreeByThree, ResultKind::Average, 750),
        ];
        let old = snapshot(records.clone());
        let new = snapshot(records);

        assert!(new_records(&old, &new).is_empty());
    }

    #[test]
    fn test_empty_old_list_is_not_all_new() {
        let old = RecordSnapshot::empty();
        let new = snapshot(vec![record("A", Event::ThreeByThree, ResultKind::Single, 600)]);

        assert!(new_records(&old, &new).is_empty());
    }

    #[test]
    fn test_empty_new_list_reports_nothing() {
        let old = snapshot(vec![record("A", Event::ThreeByThree, ResultKind::Single, 600)]);
        let new = RecordSnapshot::empty();

        assert!(new_records(&old, &new).is_empty());
    }

    #[test]
    fn test_kinds_compared_independently() {
        let old = snapshot(vec![
            record("A", Event::ThreeByThree, ResultKind::Single, 600),
            record("A", Event::ThreeByThree, ResultKind::Average, 800),
        ]);
        let new = snapshot(vec![
            record("A", Event::ThreeByThree, ResultKind::Single, 600),
            record("B", Event::ThreeByThree, ResultKind::Average, 750),
        ]);

        let found = new_records(&old, &new);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].person_id, "B");
        assert_eq!(found[0].kind, ResultKind::Average);
    }

    #[test]
    fn test_events_compared_independently_in_event_order() {
        let old = snapshot(vec![
            record("A", Event::Pyraminx, ResultKind::Single, 300),
            record("B", Event::TwoByTwo, ResultKind::Single, 200),
        ]);
        let new = snapshot(vec![
            record("C", Event::Pyraminx, ResultKind::Single, 250),
            record("D", Event::TwoByTwo, ResultKind::Single, 150),
        ]);

        let found = new_records(&old, &new);
        assert_eq!(found.len(), 2);
        // 2x2 precedes Pyraminx in event order.
        assert_eq!(found[0].person_id, "D");
        assert_eq!(found[1].person_id, "C");
    }

    #[test]
    fn test_slower_new_best_reports_nothing() {
        // A removed or invalidated old best must not announce the runner-up.
        let old = snapshot(vec![record("A", Event::ThreeByThree, ResultKind::Single, 600)]);
        let new = snapshot(vec![record("B", Event::ThreeByThree, ResultKind::Single, 650)]);

        assert!(new_records(&old, &new).is_empty());
    }
}
