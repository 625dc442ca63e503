use chrono::Duration;

use crate::models::CalendarDate;

pub const DEFAULT_WINDOW_DAYS: usize = 28;

/// Returns `days` consecutive dates ending at `last_date` inclusive, oldest
/// first. A `None` anchor means the current local date.
pub fn days_array(last_date: Option<CalendarDate>, days: usize) -> Vec<CalendarDate> {
    let anchor = last_date.unwrap_or_else(CalendarDate::today).as_naive();
    let mut window = Vec::with_capacity(days);
    for offset in (0..days).rev() {
        window.push(CalendarDate::new(anchor - Duration::days(offset as i64)));
    }
    window
}
