//! List Query Module
//!
//! Filtering and ordering of task listings.

use std::cmp::Ordering;

use crate::models::{ListQuery, SortField, SortOrder, Task};

/// Compares two strings the way a human-facing listing expects.
///
/// Letters compare case-insensitively first; a case-only difference puts
/// the lowercase form first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

/// Ascending comparison of two tasks on a single field.
pub fn compare_by(field: SortField, a: &Task, b: &Task) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => locale_cmp(&a.title, &b.title),
        SortField::Status => locale_cmp(a.status.as_str(), b.status.as_str()),
    }
}

/// Applies a query's status filter and ordering to a collection.
///
/// The sort is stable in both directions: equal elements keep their
/// insertion order.
pub fn apply(tasks: &[Task], query: &ListQuery) -> Vec<Task> {
    let status = query.status_filter();
    let field = query.sort_field();
    let order = query.sort_order();

    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|task| status.map_or(true, |s| task.status == s))
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ordering = compare_by(field, a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{Duration, Utc};

    fn task(id: u64, title: &str, status: TaskStatus, offset_secs: i64) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: "d".to_string(),
            status,
            created_at: Utc::now() + Duration::seconds(offset_secs),
            updated_at: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_default_is_newest_first() {
        let tasks = vec![
            task(1, "a", TaskStatus::Todo, 0),
            task(2, "b", TaskStatus::Todo, 10),
            task(3, "c", TaskStatus::Todo, 20),
        ];
        assert_eq!(ids(&apply(&tasks, &ListQuery::new())), vec![3, 2, 1]);
    }

    #[test]
    fn test_filter_by_status() {
        let tasks = vec![
            task(1, "a", TaskStatus::Todo, 0),
            task(2, "b", TaskStatus::Done, 0),
            task(3, "c", TaskStatus::InProgress, 0),
            task(4, "d", TaskStatus::Done, 0),
        ];
        let result = apply(&tasks, &ListQuery::new().with_status(TaskStatus::Done));
        assert!(result.iter().all(|t| t.status == TaskStatus::Done));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let tasks = vec![
            task(1, "charlie", TaskStatus::Todo, 0),
            task(2, "Alpha", TaskStatus::Todo, 0),
            task(3, "bravo", TaskStatus::Todo, 0),
        ];
        let query = ListQuery::new().sorted_by(SortField::Title, SortOrder::Asc);
        assert_eq!(ids(&apply(&tasks, &query)), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_status_descending() {
        let tasks = vec![
            task(1, "a", TaskStatus::Done, 0),
            task(2, "b", TaskStatus::Todo, 0),
            task(3, "c", TaskStatus::InProgress, 0),
        ];
        let query = ListQuery::new().sorted_by(SortField::Status, SortOrder::Desc);
        assert_eq!(ids(&apply(&tasks, &query)), vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_insertion_order_in_both_directions() {
        let now = Utc::now();
        let mut tasks = vec![
            task(1, "a", TaskStatus::Todo, 0),
            task(2, "b", TaskStatus::Todo, 0),
            task(3, "c", TaskStatus::Todo, 0),
        ];
        for t in &mut tasks {
            t.created_at = now;
        }
        assert_eq!(ids(&apply(&tasks, &ListQuery::new())), vec![1, 2, 3]);
        let asc = ListQuery::new().sorted_by(SortField::CreatedAt, SortOrder::Asc);
        assert_eq!(ids(&apply(&tasks, &asc)), vec![1, 2, 3]);
    }
}
