//! JSON feed ingestion: prices, events, market cycles, translations and the
//! optional live quote.

pub mod cycles;
pub mod events;
pub mod live_price;
pub mod prices;
pub mod translations;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Event, MarketCycle};
use crate::error::{ChartError, ChartResult};

pub use cycles::parse_cycle_feed;
pub use events::parse_event_feed;
#[cfg(feature = "live-price")]
pub use live_price::HttpQuoteSource;
pub use live_price::{
    DEFAULT_QUOTE_URL, LivePriceSource, StaticPriceSource, parse_simple_price_quote,
    resolve_live_price,
};
pub use prices::parse_price_feed;
pub use translations::Translations;

pub const PRICES_FILE: &str = "bitcoin-price-history.json";
pub const EVENTS_FILE: &str = "events.json";
pub const CYCLES_FILE: &str = "market-cycles.json";
pub const TRANSLATIONS_FILE: &str = "translations.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    Prices,
    Events,
    Cycles,
    Translations,
    LivePrice,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prices => "prices",
            Self::Events => "events",
            Self::Cycles => "market cycles",
            Self::Translations => "translations",
            Self::LivePrice => "live price",
        })
    }
}

/// The four static feeds, parsed but not yet ingested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedBundle {
    pub raw_prices: Vec<(f64, f64)>,
    pub events: Vec<Event>,
    pub cycles: Vec<MarketCycle>,
    pub translations: Translations,
}

impl FeedBundle {
    pub fn from_json_strs(
        prices: &str,
        events: &str,
        cycles: &str,
        translations: &str,
    ) -> ChartResult<Self> {
        Ok(Self {
            raw_prices: parse_price_feed(prices)?,
            events: parse_event_feed(events)?,
            cycles: parse_cycle_feed(cycles)?,
            translations: Translations::from_json_str(translations)?,
        })
    }

    /// Reads every feed from `dir`. Any missing or unparsable file fails the
    /// whole load.
    pub fn load_from_dir(dir: &Path) -> ChartResult<Self> {
        let prices = read_feed(dir, PRICES_FILE, FeedKind::Prices)?;
        let events = read_feed(dir, EVENTS_FILE, FeedKind::Events)?;
        let cycles = read_feed(dir, CYCLES_FILE, FeedKind::Cycles)?;
        let translations = read_feed(dir, TRANSLATIONS_FILE, FeedKind::Translations)?;
        let bundle = Self::from_json_strs(&prices, &events, &cycles, &translations)?;
        info!(
            dir = %dir.display(),
            prices = bundle.raw_prices.len(),
            events = bundle.events.len(),
            cycles = bundle.cycles.len(),
            "feeds loaded"
        );
        Ok(bundle)
    }
}

fn read_feed(dir: &Path, file: &str, feed: FeedKind) -> ChartResult<String> {
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|e| ChartError::FeedLoad {
        feed,
        reason: format!("{}: {e}", path.display()),
    })
}
