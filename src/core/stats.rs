use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Series;

/// Headline numbers shown above the chart. Only real samples count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub all_time_high: f64,
    pub current_price: f64,
    /// `true` when `current_price` came from a live quote.
    pub is_live: bool,
    pub days_since_genesis: i64,
}

/// Calendar day of the network's first block.
#[must_use]
pub fn genesis_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2009, 1, 3).unwrap_or_default()
}

impl StatsSummary {
    /// Returns `None` when the series holds no real samples.
    ///
    /// A live price is used only when it is finite and positive; otherwise the
    /// last real sample stands in.
    #[must_use]
    pub fn from_series(series: &Series, live_price: Option<f64>, today: NaiveDate) -> Option<Self> {
        let all_time_high = series
            .real_points()
            .map(|point| OrderedFloat(point.price))
            .max()?
            .into_inner();
        let last_real = series.real_points().last()?.price;
        let live_price = live_price.filter(|price| price.is_finite() && *price > 0.0);

        Some(Self {
            all_time_high,
            current_price: live_price.unwrap_or(last_real),
            is_live: live_price.is_some(),
            days_since_genesis: today.signed_duration_since(genesis_date()).num_days(),
        })
    }
}
