//! Property-Based Tests for the Store Module
//!
//! Uses proptest to check the store's invariants over arbitrary operation
//! sequences.

use proptest::prelude::*;
use std::cmp::Ordering;

use crate::error::TaskError;
use crate::models::{
    CreateTaskRequest, ListQuery, SortField, SortOrder, TaskStatus, UpdateTaskRequest,
};
use crate::store::query::locale_cmp;
use crate::store::TaskStore;

// == Strategies ==
fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,24}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Create {
        title: String,
        description: String,
        status: TaskStatus,
    },
    SetStatus {
        id: u64,
        status: TaskStatus,
    },
    Delete {
        id: u64,
    },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (text_strategy(), text_strategy(), status_strategy()).prop_map(
            |(title, description, status)| StoreOp::Create {
                title,
                description,
                status
            }
        ),
        (1u64..20, status_strategy()).prop_map(|(id, status)| StoreOp::SetStatus { id, status }),
        (1u64..20).prop_map(|id| StoreOp::Delete { id }),
    ]
}

fn run_ops(ops: Vec<StoreOp>) -> TaskStore {
    let mut store = TaskStore::seeded();
    for op in ops {
        match op {
            StoreOp::Create {
                title,
                description,
                status,
            } => {
                store
                    .create(CreateTaskRequest::new(title, description).with_status(status))
                    .unwrap();
            }
            StoreOp::SetStatus { id, status } => {
                let _ = store.update(id, UpdateTaskRequest::status(status));
            }
            StoreOp::Delete { id } => {
                let _ = store.delete(id);
            }
        }
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every created id exceeds every id assigned before it.
    #[test]
    fn prop_ids_strictly_increase(ops in prop::collection::vec(store_op_strategy(), 1..40)) {
        let mut store = TaskStore::seeded();
        let mut max_id = 3u64;

        for op in ops {
            match op {
                StoreOp::Create { title, description, status } => {
                    let task = store
                        .create(CreateTaskRequest::new(title, description).with_status(status))
                        .unwrap();
                    prop_assert!(task.id > max_id, "id {} not above {}", task.id, max_id);
                    max_id = task.id;
                }
                StoreOp::SetStatus { id, status } => {
                    let _ = store.update(id, UpdateTaskRequest::status(status));
                }
                StoreOp::Delete { id } => {
                    let _ = store.delete(id);
                }
            }
        }
    }

    // Filtering returns only matching records and the summary agrees with it.
    #[test]
    fn prop_filter_and_summary_agree(
        ops in prop::collection::vec(store_op_strategy(), 0..40),
        status in status_strategy()
    ) {
        let store = run_ops(ops);
        let filtered = store.list(&ListQuery::new().with_status(status));

        prop_assert!(filtered.iter().all(|t| t.status == status));

        let summary = store.summary();
        let expected = match status {
            TaskStatus::Todo => summary.todo,
            TaskStatus::InProgress => summary.in_progress,
            TaskStatus::Done => summary.done,
        };
        prop_assert_eq!(filtered.len(), expected);
        prop_assert_eq!(summary.total, store.len());
        prop_assert_eq!(summary.todo + summary.in_progress + summary.done, summary.total);
    }

    // Title-ascending listings are non-decreasing under the listing comparator.
    #[test]
    fn prop_title_ascending_is_ordered(ops in prop::collection::vec(store_op_strategy(), 0..40)) {
        let store = run_ops(ops);
        let query = ListQuery::new().sorted_by(SortField::Title, SortOrder::Asc);
        let listed = store.list(&query);

        prop_assert_eq!(listed.len(), store.len());
        for pair in listed.windows(2) {
            prop_assert_ne!(locale_cmp(&pair[0].title, &pair[1].title), Ordering::Greater);
        }
    }

    // Updating a missing id changes nothing.
    #[test]
    fn prop_update_missing_id_is_noop(
        ops in prop::collection::vec(store_op_strategy(), 0..20),
        title in text_strategy()
    ) {
        let mut store = run_ops(ops);
        let before = store.tasks().to_vec();

        let result = store.update(10_000, UpdateTaskRequest::default().with_title(title));
        prop_assert!(matches!(result, Err(TaskError::NotFound(_))));
        prop_assert_eq!(store.tasks(), before.as_slice());
    }

    // Deleting removes exactly one record.
    #[test]
    fn prop_delete_removes_exactly_one(ops in prop::collection::vec(store_op_strategy(), 0..20)) {
        let mut store = run_ops(ops);
        prop_assume!(!store.is_empty());

        let id = store.tasks()[0].id;
        let before = store.len();
        store.delete(id).unwrap();

        prop_assert_eq!(store.len(), before - 1);
        prop_assert!(store.get(id).is_err());
    }
}
