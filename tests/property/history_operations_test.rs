//! Property-based tests for History Manager operations.
//!
//! For arbitrary sequences of `add` and `remove` calls, the stored list must
//! match a straightforward model: bounded, unique keys, most recent first.

use std::sync::Arc;

use proptest::prelude::*;
use recent_history::managers::history_manager::{
    project_history, HistoryManagerTrait, HISTORY_LIMIT,
};
use recent_history::services::storage_adapter::Storage;
use recent_history::types::history::ProjectHistoryEntry;

#[derive(Debug, Clone)]
enum Op {
    Add(ProjectHistoryEntry),
    Remove(String),
}

/// Keys are drawn from a small pool so that re-adds and removals of present
/// keys happen often.
fn arb_key() -> impl Strategy<Value = String> {
    (0u8..16).prop_map(|i| format!("project-{}", i))
}

fn arb_entry() -> impl Strategy<Value = ProjectHistoryEntry> {
    (
        arb_key(),
        "[A-Za-z][A-Za-z0-9 ]{0,20}",
        proptest::option::of("[a-z]{3,8}"),
        prop_oneof![Just("TRK"), Just("VW"), Just("APP")],
    )
        .prop_map(|(key, name, organization, qualifier)| ProjectHistoryEntry {
            key,
            name,
            organization,
            qualifier: qualifier.to_string(),
        })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_entry().prop_map(Op::Add),
        1 => arb_key().prop_map(Op::Remove),
    ]
}

fn apply_model(model: &mut Vec<ProjectHistoryEntry>, op: &Op) {
    match op {
        Op::Add(entry) => {
            model.retain(|e| e.key != entry.key);
            model.insert(0, entry.clone());
            model.truncate(HISTORY_LIMIT);
        }
        Op::Remove(key) => model.retain(|e| &e.key != key),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_matches_model(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mgr = project_history(Arc::new(Storage::in_memory()));
        let mut model = Vec::new();

        for op in &ops {
            match op {
                Op::Add(entry) => mgr.add(entry.clone()),
                Op::Remove(key) => mgr.remove(key),
            }
            apply_model(&mut model, op);

            let stored = mgr.get();
            prop_assert!(stored.len() <= HISTORY_LIMIT);
            prop_assert_eq!(&stored, &model);
        }
    }

    #[test]
    fn re_add_keeps_single_newest_copy(first in arb_entry(), name in "[A-Za-z]{1,10}") {
        let mgr = project_history(Arc::new(Storage::in_memory()));
        let updated = ProjectHistoryEntry { name, ..first.clone() };

        mgr.add(first);
        mgr.add(updated.clone());

        let stored = mgr.get();
        prop_assert_eq!(stored.iter().filter(|e| e.key == updated.key).count(), 1);
        prop_assert_eq!(&stored[0], &updated);
    }
}
