//! Day identifiers, the keys tasks and holidays are grouped by

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The textual form of a [`DayId`]
const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, written as `YYYY-MM-DD`.
///
/// Its string form sorts lexicographically in chronological order, so that it can be used as a map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayId {
    date: NaiveDate,
}

impl DayId {
    /// Returns `None` in case the given numbers do not form a valid date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn year(&self) -> i32       { self.date.year() }
}

impl From<NaiveDate> for DayId {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl FromStr for DayId {
    type Err = String;

    /// Only the canonical form is accepted (zero-padded, no surrounding whitespace), so that a given day has a single textual form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DAY_FORMAT)
            .map_err(|err| format!("Invalid day {:?}: {}", s, err))?;
        let day = Self { date };
        if day.to_string() != s {
            return Err(format!("Invalid day {:?}: expected {:?}", s, day.to_string()));
        }
        Ok(day)
    }
}

impl Display for DayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.date.format(DAY_FORMAT))
    }
}

/// Used to support serde
impl Serialize for DayId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DayId {
    fn deserialize<D>(deserializer: D) -> Result<DayId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
