//! Day cells, the render-time aggregate of a day, its tasks and its holidays

use chrono::NaiveDate;

use crate::day::DayId;
use crate::holiday::{self, Holiday};
use crate::range::{self, ViewMode};
use crate::search::SearchFilter;
use crate::store::TaskStore;
use crate::task::Task;


#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    pub date: DayId,
    /// Whether this day belongs to the displayed month. Always true in week view
    pub in_current_period: bool,
    /// The tasks of this day that match the current search, in display order
    pub tasks: Vec<Task>,
    pub holidays: Vec<Holiday>,
}

impl DayCell {
    /// A cell with no holiday
    pub fn new(date: DayId, in_current_period: bool, tasks: Vec<Task>) -> Self {
        Self { date, in_current_period, tasks, holidays: Vec::new() }
    }

    /// `3 cards`, `1 card`, or nothing when this cell has no task
    pub fn task_count_label(&self) -> Option<String> {
        match self.tasks.len() {
            0 => None,
            1 => Some("1 card".to_string()),
            n => Some(format!("{} cards", n)),
        }
    }
}

/// Build the cells of every displayed day, without holidays
pub fn build_cells(store: &TaskStore, filter: &SearchFilter, reference: NaiveDate, mode: ViewMode) -> Vec<DayCell> {
    range::generate_range(reference, mode)
        .into_iter()
        .map(|day| {
            let in_current_period = mode == ViewMode::Week || range::is_same_month(day.date(), reference);
            let tasks = filter.filter(store.tasks_on(&day)).into_iter().cloned().collect();
            DayCell::new(day, in_current_period, tasks)
        })
        .collect()
}

/// Attach to every cell the holidays that happen on its day
pub fn attach_holidays(cells: Vec<DayCell>, holidays: &[Holiday]) -> Vec<DayCell> {
    cells.into_iter()
        .map(|mut cell| {
            cell.holidays = holiday::holidays_on(&cell.date, holidays);
            cell
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn cells_of_a_month() {
        let mut store = TaskStore::new();
        let d: DayId = "2024-03-05".parse().unwrap();
        store.add_task("Buy Milk", d, Vec::new());
        store.add_task("Write report", d, Vec::new());

        let cells = build_cells(&store, &SearchFilter::All, date("2024-03-15"), ViewMode::Month);
        assert_eq!(cells.len(), 42);
        assert!(cells[0].in_current_period == false);
        assert_eq!(cells.iter().filter(|c| c.in_current_period).count(), 31);

        let cell = cells.iter().find(|c| c.date == d).unwrap();
        assert_eq!(cell.tasks.len(), 2);
        assert_eq!(cell.task_count_label().as_deref(), Some("2 cards"));

        let filtered = build_cells(&store, &SearchFilter::from_text("milk"), date("2024-03-15"), ViewMode::Month);
        let cell = filtered.iter().find(|c| c.date == d).unwrap();
        assert_eq!(cell.tasks.len(), 1);
        assert_eq!(cell.tasks[0].text(), "Buy Milk");
        assert_eq!(cell.task_count_label().as_deref(), Some("1 card"));
    }

    #[test]
    fn week_cells_are_all_current() {
        let cells = build_cells(&TaskStore::new(), &SearchFilter::All, date("2024-03-31"), ViewMode::Week);
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|c| c.in_current_period));
        assert!(cells.iter().all(|c| c.task_count_label().is_none()));
    }

    #[test]
    fn holidays_are_joined_by_date() {
        let cells = build_cells(&TaskStore::new(), &SearchFilter::All, date("2024-07-01"), ViewMode::Week);
        let july_4th: DayId = "2024-07-04".parse().unwrap();
        let holidays = vec![
            Holiday::new(july_4th, "Independence Day", "US"),
            Holiday::new("2024-12-25".parse().unwrap(), "Christmas Day", "US"),
        ];

        let cells = attach_holidays(cells, &holidays);
        for cell in &cells {
            if cell.date == july_4th {
                assert_eq!(cell.holidays, vec![holidays[0].clone()]);
            } else {
                assert!(cell.holidays.is_empty());
            }
        }
    }
}
