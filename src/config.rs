//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::Weekday;
use once_cell::sync::Lazy;

/// The day every calendar week starts on
pub const WEEK_START: Weekday = Weekday::Sun;

/// The key under which the task store is persisted.
/// File-based storages use it as the file stem.
pub const STORAGE_KEY: &str = "calendar-tasks";

/// Colors new tasks pick their labels from
pub const LABEL_PALETTE: [&str; 6] = [
    "#61BD4F", // green
    "#F2D600", // yellow
    "#FF9F1A", // orange
    "#EB5A46", // red
    "#C377E0", // purple
    "#0079BF", // blue
];

/// Base URL of the public holiday API. The year and the country code are appended to it.
/// Feel free to override it when initing this library.
pub static HOLIDAY_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://date.nager.at/api/v3/PublicHolidays".to_string())));

/// ISO 3166-1 alpha-2 code of the country holidays are fetched for.
/// Feel free to override it when initing this library.
pub static HOLIDAY_COUNTRY_CODE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("US".to_string())));

/// Returns the current value of a string setting.
///
/// A poisoned lock still holds a valid string, so its content is used anyway
pub fn read_setting(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Overrides a string setting
pub fn set_setting<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, value: S) {
    match setting.lock() {
        Ok(mut current) => *current = value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = value.to_string(),
    }
}
