//! Public holidays, and how they are laid over the calendar

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::day::DayId;


/// A public holiday, as returned by the holiday API.
///
/// This comes from an untrusted source: every field is optional, and unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    /// The day of the holiday, supposedly as `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country_code: String,
}

impl Holiday {
    pub fn new<S: ToString, T: ToString>(date: DayId, name: S, country_code: T) -> Self {
        Self {
            date: date.to_string(),
            name: name.to_string(),
            country_code: country_code.to_string(),
        }
    }

    /// Whether this holiday happens on a given day
    pub fn is_on(&self, day: &DayId) -> bool {
        self.date == day.to_string()
    }
}

/// Parse the JSON array returned by the holiday API.
///
/// Entries that cannot be understood are skipped. Fails only if the body is not a JSON array
pub fn parse_holidays(body: &str) -> Result<Vec<Holiday>, Box<dyn Error>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|err| format!("Holiday list is not a JSON array: {}", err))?;

    let mut holidays = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<Holiday>(entry) {
            Ok(holiday) => holidays.push(holiday),
            Err(err) => {
                log::warn!("Ignoring an invalid holiday entry: {}", err);
                continue;
            },
        }
    }
    Ok(holidays)
}

/// The holidays of a given day, in source order
pub fn holidays_on(day: &DayId, holidays: &[Holiday]) -> Vec<Holiday> {
    let day = day.to_string();
    holidays.iter()
        .filter(|h| h.date == day)
        .cloned()
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    const API_SAMPLE: &str = r#"[
        {"date":"2024-01-01","localName":"New Year's Day","name":"New Year's Day","countryCode":"US","fixed":false,"global":true,"counties":null,"launchYear":null,"types":["Public"]},
        {"date":"2024-07-04","localName":"Independence Day","name":"Independence Day","countryCode":"US","fixed":false,"global":true,"counties":null,"launchYear":null,"types":["Public"]},
        {"date":"2024-07-04","name":"Another celebration"},
        42,
        {"date":"2024-12-25","name":["not", "a", "string"]}
    ]"#;

    #[test]
    fn parse_untrusted_list() {
        let holidays = parse_holidays(API_SAMPLE).unwrap();
        assert_eq!(holidays.len(), 3);
        assert_eq!(holidays[0], Holiday::new("2024-01-01".parse().unwrap(), "New Year's Day", "US"));
        assert_eq!(holidays[2].country_code, "");

        assert!(parse_holidays("{\"error\": 404}").is_err());
        assert!(parse_holidays("<html>").is_err());
        assert!(parse_holidays("[]").unwrap().is_empty());
    }

    #[test]
    fn join_by_date() {
        let holidays = parse_holidays(API_SAMPLE).unwrap();
        let july_4th: DayId = "2024-07-04".parse().unwrap();

        let found = holidays_on(&july_4th, &holidays);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Independence Day");
        assert_eq!(found[1].name, "Another celebration");
        assert!(found.iter().all(|h| h.is_on(&july_4th)));

        assert!(holidays_on(&"2024-07-05".parse().unwrap(), &holidays).is_empty());
    }
}
