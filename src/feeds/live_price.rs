use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

use super::FeedKind;

/// Simple-price endpoint queried for the live quote.
pub const DEFAULT_QUOTE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";

/// Source of the latest spot price shown in the stats summary.
pub trait LivePriceSource {
    fn fetch_live_price(&self) -> ChartResult<f64>;
}

/// Reads `{ "<asset>": { "<currency>": price } }`.
pub fn parse_simple_price_quote(json: &str, asset: &str, currency: &str) -> ChartResult<f64> {
    let quote_error = |reason: String| ChartError::FeedLoad {
        feed: FeedKind::LivePrice,
        reason,
    };
    let value: Value = serde_json::from_str(json).map_err(|e| quote_error(e.to_string()))?;
    let price = value
        .get(asset)
        .and_then(|entry| entry.get(currency))
        .and_then(Value::as_f64)
        .ok_or_else(|| quote_error(format!("missing `{asset}.{currency}` quote")))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(quote_error(format!("quote must be positive, got {price}")));
    }
    Ok(price)
}

/// Fetches the live price, degrading to `None` on any failure.
///
/// The stats summary then falls back to the last series price.
#[must_use]
pub fn resolve_live_price(source: Option<&dyn LivePriceSource>) -> Option<f64> {
    let source = source?;
    match source.fetch_live_price() {
        Ok(price) => {
            debug!(price, "live price resolved");
            Some(price)
        }
        Err(err) => {
            warn!(error = %err, "live price unavailable, using last series price");
            None
        }
    }
}

/// Fixed quote, for hosts that already know the price and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPriceSource(pub f64);

impl LivePriceSource for StaticPriceSource {
    fn fetch_live_price(&self) -> ChartResult<f64> {
        Ok(self.0)
    }
}

#[cfg(feature = "live-price")]
mod http {
    use std::time::Duration;

    use super::{DEFAULT_QUOTE_URL, LivePriceSource, parse_simple_price_quote};
    use crate::error::{ChartError, ChartResult};
    use crate::feeds::FeedKind;

    /// Blocking HTTP quote source.
    #[derive(Debug, Clone)]
    pub struct HttpQuoteSource {
        client: reqwest::blocking::Client,
        url: String,
    }

    impl HttpQuoteSource {
        pub fn new(url: impl Into<String>, timeout: Duration) -> ChartResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| http_error(&e))?;
            Ok(Self {
                client,
                url: url.into(),
            })
        }

        pub fn coingecko() -> ChartResult<Self> {
            Self::new(DEFAULT_QUOTE_URL, Duration::from_secs(5))
        }
    }

    impl LivePriceSource for HttpQuoteSource {
        fn fetch_live_price(&self) -> ChartResult<f64> {
            let body = self
                .client
                .get(&self.url)
                .send()
                .and_then(reqwest::blocking::Response::error_for_status)
                .and_then(reqwest::blocking::Response::text)
                .map_err(|e| http_error(&e))?;
            parse_simple_price_quote(&body, "bitcoin", "usd")
        }
    }

    fn http_error(err: &reqwest::Error) -> ChartError {
        ChartError::FeedLoad {
            feed: FeedKind::LivePrice,
            reason: err.to_string(),
        }
    }
}

#[cfg(feature = "live-price")]
pub use http::HttpQuoteSource;
