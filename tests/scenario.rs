//! The life of a few tasks on a board, from creation to deletion

use chrono::NaiveDate;

use calendar_board::client::MockHolidaySource;
use calendar_board::drag::{DragEvent, DragOutcome};
use calendar_board::labels::LabelPicker;
use calendar_board::storage::MemoryStorage;
use calendar_board::traits::TaskPersistence;
use calendar_board::{Board, DayId, TaskId, TaskStore};

fn day(s: &str) -> DayId {
    s.parse().unwrap()
}

fn positions(store: &TaskStore, d: &DayId) -> Vec<usize> {
    store.tasks_on(d).iter().map(|t| t.position()).collect()
}

#[test]
fn add_move_reorder_delete() {
    let _ = env_logger::builder().is_test(true).try_init();

    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let mut board = Board::new(MemoryStorage::new(), MockHolidaySource::new(), today)
        .with_label_picker(LabelPicker::seeded(2024));
    assert!(board.store().is_empty());

    // Add a task
    let first_day = day("2024-03-05");
    let report = board.add_task("Write report", first_day).unwrap();
    let tasks = board.store().tasks_on(&first_day);
    assert_eq!(board.store().days().count(), 1);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text(), "Write report");
    assert_eq!(tasks[0].position(), 0);
    assert!(tasks[0].labels().len() >= 2);

    // Move it to the next day
    let second_day = day("2024-03-06");
    assert!(board.move_task(&report, &first_day, &second_day));
    assert!(board.store().contains_day(&first_day) == false);
    let tasks = board.store().tasks_on(&second_day);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].position(), 0);
    assert_eq!(tasks[0].date(), second_day);

    // Add two more, and reverse the order
    let slides = board.add_task("Prepare slides", second_day).unwrap();
    let coffee = board.add_task("Buy coffee", second_day).unwrap();
    let reversed: Vec<TaskId> = vec![coffee.clone(), slides.clone(), report.clone()];
    assert!(board.reorder_day(&second_day, &reversed));
    assert_eq!(board.store().task_ids_on(&second_day), reversed);
    assert_eq!(positions(board.store(), &second_day), vec![0, 1, 2]);

    // Delete the middle one
    assert!(board.delete_task(&second_day, &slides));
    assert_eq!(board.store().task_ids_on(&second_day), vec![coffee, report]);
    assert_eq!(positions(board.store(), &second_day), vec![0, 1]);

    // Everything has been persisted along the way
    let mut storage = board.persistence().clone();
    assert_eq!(storage.load(), *board.store());
    assert!(board.take_warnings().is_empty());
}

#[test]
fn drag_gestures_on_a_reloaded_board() {
    let _ = env_logger::builder().is_test(true).try_init();

    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let monday = day("2024-03-04");
    let friday = day("2024-03-08");

    let mut board = Board::new(MemoryStorage::new(), MockHolidaySource::new(), today);
    let a = board.add_task("a", monday).unwrap();
    let b = board.add_task("b", monday).unwrap();

    // A new session starts from what the previous one persisted
    let storage = board.persistence().clone();
    let mut board = Board::new(storage, MockHolidaySource::new(), today);
    assert_eq!(board.store().task_ids_on(&monday), vec![a.clone(), b.clone()]);

    // A cancelled gesture changes nothing
    assert_eq!(board.handle_drag(DragEvent::Start{ task: b.clone(), source: monday }), DragOutcome::Started);
    board.handle_drag(DragEvent::Over(friday));
    assert_eq!(board.handle_drag(DragEvent::DropOutside), DragOutcome::Cancelled);
    assert!(board.drag().drag_over().is_none());
    assert_eq!(board.store().task_ids_on(&monday), vec![a.clone(), b.clone()]);

    // Dropping a card onto another one of the same day reorders them
    board.handle_drag(DragEvent::Start{ task: b.clone(), source: monday });
    assert_eq!(board.handle_drag(DragEvent::DropOnTask{ day: monday, target: a.clone() }), DragOutcome::Reordered(monday));
    assert_eq!(board.store().task_ids_on(&monday), vec![b.clone(), a.clone()]);

    // Dropping onto another day moves the card at the end of that day
    board.handle_drag(DragEvent::Start{ task: b.clone(), source: monday });
    board.handle_drag(DragEvent::Over(friday));
    board.handle_drag(DragEvent::Drop(friday));
    board.handle_drag(DragEvent::Cancel);
    assert_eq!(board.store().task_ids_on(&monday), vec![a.clone()]);
    assert_eq!(board.store().task_ids_on(&friday), vec![b.clone()]);
    assert!(board.store().is_well_formed());

    let mut storage = board.persistence().clone();
    assert_eq!(storage.load(), *board.store());
}

#[test]
fn corrupt_storage_starts_empty() {
    let _ = env_logger::builder().is_test(true).try_init();

    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let storage = MemoryStorage::with_blob("{\"2024-03-05\": [{\"id\": 12}]}");
    let mut board = Board::new(storage, MockHolidaySource::new(), today);
    assert!(board.store().is_empty());

    // The corrupt blob is replaced on the first mutation
    board.add_task("Fresh start", day("2024-03-05")).unwrap();
    let mut storage = board.persistence().clone();
    assert_eq!(storage.load().task_count(), 1);
}
