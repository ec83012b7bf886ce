pub mod text;
pub mod time;

pub use text::{abbreviate_number, strip_url_scheme, truncate_chars};
pub use time::{current_human_timestamp, datetime_from_millis, short_date_label};
