use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::FeedKind;

#[derive(Debug, Deserialize)]
struct RawPriceFeed {
    prices: Vec<Value>,
}

/// Parses `{ "prices": [[timestamp_ms, price], ...] }`.
///
/// The envelope must be well-formed; individual rows are best effort. A row
/// that is not an array of two numbers is skipped, since the feed is prepared
/// upstream and a few bad rows must not take the chart down.
pub fn parse_price_feed(json: &str) -> ChartResult<Vec<(f64, f64)>> {
    let feed: RawPriceFeed = serde_json::from_str(json).map_err(|e| ChartError::FeedLoad {
        feed: FeedKind::Prices,
        reason: e.to_string(),
    })?;

    let total = feed.prices.len();
    let rows: Vec<(f64, f64)> = feed.prices.iter().filter_map(parse_row).collect();
    debug!(total, kept = rows.len(), "parsed price feed");
    Ok(rows)
}

fn parse_row(row: &Value) -> Option<(f64, f64)> {
    match row.as_array()?.as_slice() {
        [time, price, ..] => Some((time.as_f64()?, price.as_f64()?)),
        _ => None,
    }
}
