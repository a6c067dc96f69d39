//! Pure reorder/move operations.
//!
//! These leave their input untouched and return the updated store.
//! See the in-place counterparts on [`TaskStore`] for details on their semantics.

use crate::day::DayId;
use crate::store::TaskStore;
use crate::task::TaskId;

/// Returns a store where the tasks of `day` follow `new_order`, positions renumbered accordingly.
///
/// In case `new_order` is not a permutation of the tasks of this day, the returned store equals the input.
pub fn reorder_within_day(store: &TaskStore, day: &DayId, new_order: &[TaskId]) -> TaskStore {
    let mut result = store.clone();
    result.reorder_day(day, new_order);
    result
}

/// Returns a store where `dragged` has been moved to the current index of `target`, within `day`
pub fn move_within_day(store: &TaskStore, day: &DayId, dragged: &TaskId, target: &TaskId) -> TaskStore {
    let mut result = store.clone();
    result.move_within_day(day, dragged, target);
    result
}

/// Returns a store where the task has been moved from `source` to the end of `target`.
///
/// This is the identity when `source == target`, or when the task is not found in `source`.
pub fn move_across_days(store: &TaskStore, task: &TaskId, source: &DayId, target: &DayId) -> TaskStore {
    let mut result = store.clone();
    result.move_task(task, source, target);
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    /// A few stores of various shapes, on a handful of days
    fn sample_stores() -> Vec<TaskStore> {
        let days = ["2024-03-05", "2024-03-06", "2024-03-07"];
        let mut stores = Vec::new();
        for sizes in &[[1, 0, 0], [3, 0, 1], [2, 2, 2], [5, 1, 0], [0, 4, 3]] {
            let mut store = TaskStore::new();
            for (d, size) in days.iter().zip(sizes.iter()) {
                for n in 0..*size {
                    store.add_task(&format!("task {} of {}", n, d), day(d), Vec::new());
                }
            }
            stores.push(store);
        }
        stores
    }

    #[test]
    fn reorder_leaves_input_untouched() {
        let d = day("2024-03-05");
        let store = sample_stores().remove(1);
        let mut ids = store.task_ids_on(&d);
        ids.reverse();

        let reordered = reorder_within_day(&store, &d, &ids);
        assert_eq!(reordered.task_ids_on(&d), ids);
        assert_ne!(store.task_ids_on(&d), ids);
    }

    #[test]
    fn reorder_positions_follow_given_order() {
        for store in sample_stores() {
            for (d, tasks) in store.days() {
                let mut ids: Vec<TaskId> = tasks.iter().map(|t| t.id().clone()).collect();
                ids.rotate_left(1);

                let result = reorder_within_day(&store, d, &ids);
                let positions: Vec<usize> = result.tasks_on(d).iter().map(|t| t.position()).collect();
                assert_eq!(result.task_ids_on(d), ids);
                assert_eq!(positions, (0..ids.len()).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn move_across_days_properties() {
        let all_days = [day("2024-03-05"), day("2024-03-06"), day("2024-03-07"), day("2024-04-01")];

        for store in sample_stores() {
            for (source, tasks) in store.days() {
                for task in tasks {
                    for target in all_days.iter().filter(|t| *t != source) {
                        let result = move_across_days(&store, task.id(), source, target);

                        assert!(result.get_task(source, task.id()).is_none());
                        if tasks.len() == 1 {
                            assert!(result.contains_day(source) == false);
                        }

                        let moved = result.get_task(target, task.id()).unwrap();
                        assert_eq!(moved.date(), *target);
                        assert_eq!(moved.text(), task.text());
                        assert_eq!(moved.position(), store.tasks_on(target).len());

                        assert!(result.is_well_formed());
                        assert_eq!(result.task_count(), store.task_count());
                    }
                }
            }
        }
    }

    #[test]
    fn move_to_same_day_is_identity() {
        for store in sample_stores() {
            for (d, tasks) in store.days() {
                for task in tasks {
                    assert_eq!(move_across_days(&store, task.id(), d, d), store);
                }
            }
        }
    }

    #[test]
    fn move_within_day_keeps_input() {
        let d = day("2024-03-06");
        let store = sample_stores().remove(2);
        let ids = store.task_ids_on(&d);

        let result = move_within_day(&store, &d, &ids[1], &ids[0]);
        assert_eq!(result.task_ids_on(&d), vec![ids[1].clone(), ids[0].clone()]);
        assert_eq!(store.task_ids_on(&d), ids);
    }
}
