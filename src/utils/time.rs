use chrono::{DateTime, Local, LocalResult, TimeZone};

use super::text::truncate_chars;

const SHORT_DATE_FMT: &str = "%m/%d/%Y";
const SHORT_DATE_LEN: usize = 5;

/// Resolve Unix milliseconds in `tz`; `None` for out-of-range values.
pub fn datetime_from_millis<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.timestamp_millis_opt(millis) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(first, _) => Some(first),
        LocalResult::None => None,
    }
}

/// `MM/DD` axis label for a timestamp, rendered in `tz`.
pub fn short_date_label<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match datetime_from_millis(millis, tz) {
        Some(dt) => {
            let full = dt.format(SHORT_DATE_FMT).to_string();
            truncate_chars(&full, SHORT_DATE_LEN).to_string()
        }
        None => "--/--".to_string(),
    }
}

pub fn current_human_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}
