//! The days a board displays, and how to navigate between periods

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::WEEK_START;
use crate::day::DayId;


/// How many days a board displays at once
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every week that overlaps the month of the reference date
    Month,
    /// The week of the reference date
    Week,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Month
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Week => write!(f, "week"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            other => Err(format!("Unknown view mode {:?} (expected \"month\" or \"week\")", other)),
        }
    }
}


/// The first day of the week that contains `date`.
///
/// Like every bound below, it is clamped to the dates chrono supports
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - WEEK_START.num_days_from_monday()) % 7;
    date.checked_sub_signed(Duration::days(offset as i64))
        .unwrap_or(NaiveDate::MIN)
}

/// The last day of the week that contains `date`
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let offset = (7 + WEEK_START.pred().num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_signed(Duration::days(offset as i64))
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The first and last days (both inclusive) displayed for a reference date
pub fn bounds(reference: NaiveDate, mode: ViewMode) -> (NaiveDate, NaiveDate) {
    match mode {
        ViewMode::Month => (start_of_week(start_of_month(reference)), end_of_week(end_of_month(reference))),
        ViewMode::Week => (start_of_week(reference), end_of_week(reference)),
    }
}

/// Every day displayed for a reference date, in chronological order.
///
/// Both modes cover whole weeks, so that the result always has a multiple of 7 days,
/// except next to [`NaiveDate::MIN`] and [`NaiveDate::MAX`], where the range is cut short.
pub fn generate_range(reference: NaiveDate, mode: ViewMode) -> Vec<DayId> {
    let (start, end) = bounds(reference, mode);
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(DayId::from(day));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// The years the displayed range overlaps (one or two)
pub fn years_covered(reference: NaiveDate, mode: ViewMode) -> Vec<i32> {
    let (start, end) = bounds(reference, mode);
    (start.year()..=end.year()).collect()
}

/// The reference date of the next period: one month later, or one week later
pub fn next_period(reference: NaiveDate, mode: ViewMode) -> NaiveDate {
    let next = match mode {
        ViewMode::Month => reference.checked_add_months(Months::new(1)),
        ViewMode::Week => reference.checked_add_signed(Duration::weeks(1)),
    };
    next.unwrap_or(reference)
}

/// The reference date of the previous period: one month earlier, or one week earlier
pub fn previous_period(reference: NaiveDate, mode: ViewMode) -> NaiveDate {
    let previous = match mode {
        ViewMode::Month => reference.checked_sub_months(Months::new(1)),
        ViewMode::Week => reference.checked_sub_signed(Duration::weeks(1)),
    };
    previous.unwrap_or(reference)
}

/// A human-readable title, e.g. `March 2024` or `Week of March 3, 2024`
pub fn title(reference: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Month => reference.format("%B %Y").to_string(),
        ViewMode::Week => format!("Week of {}", start_of_week(reference).format("%B %-d, %Y")),
    }
}

/// Short names of the week days, in display order
pub fn weekday_names() -> Vec<String> {
    let mut day = WEEK_START;
    let mut names = Vec::with_capacity(7);
    for _ in 0..7 {
        names.push(day.to_string());
        day = day.succ();
    }
    names
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
