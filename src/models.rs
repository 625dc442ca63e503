use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::CodecError;

const DISPLAY_FORMAT: &str = "%Y/%m/%d";
const COMPACT_FORMAT: &str = "%Y%m%d";

/// One calendar day, rendered as `YYYY/MM/DD`. The rendering is fixed-width
/// and zero-padded, so lexicographic order on the string equals date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses the `YYYY/MM/DD` display form. Anything else is rejected.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        if input.len() != 10 {
            return Err(CodecError::InvalidDate(input.to_string()));
        }
        NaiveDate::parse_from_str(input, DISPLAY_FORMAT)
            .map(Self)
            .map_err(|_| CodecError::InvalidDate(input.to_string()))
    }

    /// Parses the `YYYYMMDD` form used by the packed `d` field.
    pub fn parse_compact(input: &str) -> Result<Self, CodecError> {
        if input.len() != 8 {
            return Err(CodecError::InvalidDate(input.to_string()));
        }
        NaiveDate::parse_from_str(input, COMPACT_FORMAT)
            .map(Self)
            .map_err(|_| CodecError::InvalidDate(input.to_string()))
    }

    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = CodecError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = CodecError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        Self::parse(&input)
    }
}

/// One (habit name, day, completion flag) triple. The name and date are fixed
/// at construction; the flag changes only by building a replacement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    date: CalendarDate,
    checked: bool,
}

impl Record {
    pub fn new(name: impl Into<String>, date: CalendarDate, checked: bool) -> Self {
        Self {
            name: name.into(),
            date,
            checked,
        }
    }

    pub fn unchecked(name: impl Into<String>, date: CalendarDate) -> Self {
        Self::new(name, date, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn with_checked(&self, checked: bool) -> Self {
        Self {
            name: self.name.clone(),
            date: self.date,
            checked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Packed form of one habit: the most recent day covered and the completion
/// bits as a base-36 number, wired as `{"d": "YYYYMMDD", "c": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedHabit {
    #[serde(rename = "d")]
    pub last_date: String,
    #[serde(rename = "c")]
    pub checks: String,
}

pub type SerializedStore = BTreeMap<String, PackedHabit>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_display_form() {
        let date = CalendarDate::parse("2024/01/03").unwrap();
        assert_eq!(date.to_string(), "2024/01/03");
        assert_eq!(date.compact(), "20240103");
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for input in ["2024-01-03", "2024/1/3", "20240103", "03/01/2024x", "", "garbage!!!"] {
            assert!(CalendarDate::parse(input).is_err(), "accepted {input:?}");
        }
        assert!(CalendarDate::parse_compact("2024/01/03").is_err());
        assert!(CalendarDate::parse_compact("2024013").is_err());
    }

    #[test]
    fn compact_form_round_trips() {
        let date = CalendarDate::parse_compact("20231231").unwrap();
        assert_eq!(date.to_string(), "2023/12/31");
        assert_eq!(CalendarDate::parse("2023/12/31").unwrap(), date);
    }

    #[test]
    fn string_order_matches_date_order() {
        let earlier = CalendarDate::parse("2023/12/31").unwrap();
        let later = CalendarDate::parse("2024/01/01").unwrap();
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn record_serializes_with_display_date() {
        let record = Record::new("water", CalendarDate::parse("2024/02/29").unwrap(), true);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"2024/02/29\""));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn packed_habit_uses_short_field_names() {
        let packed = PackedHabit {
            last_date: "20240103".to_string(),
            checks: "m".to_string(),
        };
        let json = serde_json::to_string(&packed).unwrap();
        assert_eq!(json, r#"{"d":"20240103","c":"m"}"#);
    }
}
