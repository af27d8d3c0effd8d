use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[must_use]
pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}
