use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Parses a `YYYY-MM-DD` feed date as UTC midnight, in unix milliseconds.
pub fn parse_calendar_date(value: &str) -> ChartResult<f64> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ChartError::InvalidData(format!("invalid calendar date `{value}`: {e}")))?;
    Ok(calendar_date_to_unix_millis(date))
}

#[must_use]
pub fn calendar_date_to_unix_millis(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// Converts unix milliseconds back to a UTC timestamp, if representable.
#[must_use]
pub fn unix_millis_to_datetime(time: f64) -> Option<DateTime<Utc>> {
    if !time.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(time.round() as i64)
}
