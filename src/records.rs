use std::collections::HashSet;

use crate::calendar::{days_array, DEFAULT_WINDOW_DAYS};
use crate::models::{CalendarDate, Record, SortOrder};

/// Distinct habit names in first-seen order.
pub fn unique_names(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        if seen.insert(record.name()) {
            names.push(record.name().to_string());
        }
    }
    names
}

/// All records carrying `name`, in their original relative order.
pub fn by_name(records: &[Record], name: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.name() == name)
        .cloned()
        .collect()
}

/// Drops every record carrying `name` and keeps the rest in order.
pub fn remove_by_name(records: Vec<Record>, name: &str) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| record.name() != name)
        .collect()
}

/// Overwrites the completion flag of every record matching the candidate's
/// name and date. An empty set becomes the candidate alone; a non-empty set
/// with no match comes back unchanged, nothing is inserted.
pub fn upsert_checked(records: Vec<Record>, candidate: Record) -> Vec<Record> {
    if records.is_empty() {
        return vec![candidate];
    }
    records
        .into_iter()
        .map(|record| {
            if record.name() == candidate.name() && record.date() == candidate.date() {
                record.with_checked(candidate.is_checked())
            } else {
                record
            }
        })
        .collect()
}

/// Backfills a new habit with a four-week run of unchecked days ending today.
/// A name that already exists is left alone.
pub fn add_habit_window(records: Vec<Record>, name: &str) -> Vec<Record> {
    add_habit_window_at(records, name, CalendarDate::today())
}

pub fn add_habit_window_at(
    mut records: Vec<Record>,
    name: &str,
    last_date: CalendarDate,
) -> Vec<Record> {
    if records.iter().any(|record| record.name() == name) {
        return records;
    }
    records.extend(
        days_array(Some(last_date), DEFAULT_WINDOW_DAYS)
            .into_iter()
            .map(|date| Record::unchecked(name, date)),
    );
    records
}

/// Appends an unchecked record for every (known name, window day) pair that
/// has no record yet. Day-major: all names for the oldest missing day first.
pub fn fill_missing_days(records: Vec<Record>, window: &[CalendarDate]) -> Vec<Record> {
    let names = unique_names(&records);
    let mut filled = records;
    for date in window {
        for name in &names {
            let present = filled
                .iter()
                .any(|record| record.name() == name.as_str() && record.date() == *date);
            if !present {
                filled.push(Record::unchecked(name.as_str(), *date));
            }
        }
    }
    filled
}

/// Stable in-place sort on the date; records sharing a date keep their
/// relative order.
pub fn sort_by_date(records: &mut [Record], order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| a.date().cmp(&b.date())),
        SortOrder::Descending => records.sort_by(|a, b| b.date().cmp(&a.date())),
    }
}
