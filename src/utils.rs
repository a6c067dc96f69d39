//! Some utility functions

use std::fmt::Write;

use crate::cell::DayCell;
use crate::store::TaskStore;
use crate::task::Task;

/// A one-line, plain-text rendering of a task card
pub fn format_task(task: &Task) -> String {
    let labels: Vec<&str> = task.labels().iter().map(|l| l.color.as_str()).collect();
    if labels.is_empty() {
        format!("{}. {}", task.position() + 1, task.text())
    } else {
        format!("{}. {} [{}]", task.position() + 1, task.text(), labels.join(" "))
    }
}

/// A plain-text rendering of day cells, one block per day.
///
/// Days that are out of the displayed month are marked with a `~`
pub fn format_day_cells(cells: &[DayCell]) -> String {
    let mut output = String::new();
    for cell in cells {
        let marker = if cell.in_current_period { " " } else { "~" };
        let _ = write!(output, "{}{} {}", marker, cell.date, cell.date.date().format("%a"));
        if let Some(count) = cell.task_count_label() {
            let _ = write!(output, "  ({})", count);
        }
        output.push('\n');

        for holiday in &cell.holidays {
            let _ = writeln!(output, "      * {}", holiday.name);
        }
        for task in &cell.tasks {
            let _ = writeln!(output, "      {}", format_task(task));
        }
    }
    output
}

/// A debug utility that pretty-prints day cells
pub fn print_day_cells(cells: &[DayCell]) {
    print!("{}", format_day_cells(cells));
}

/// A debug utility that pretty-prints a whole task store
pub fn print_store(store: &TaskStore) {
    for (day, tasks) in store.days() {
        println!("DAY {}", day);
        for task in tasks {
            println!("    {}\t{}", format_task(task), task.id());
        }
    }
}
