use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Two-letter-ish language tag such as `en` or `es`.
pub type LanguageCode = String;

/// Event category used for coloring and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Technology,
    Market,
    Adoption,
    Regulation,
    Security,
    Halving,
}

impl EventCategory {
    pub const ALL: [Self; 6] = [
        Self::Technology,
        Self::Market,
        Self::Adoption,
        Self::Regulation,
        Self::Security,
        Self::Halving,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Market => "Market",
            Self::Adoption => "Adoption",
            Self::Regulation => "Regulation",
            Self::Security => "Security",
            Self::Halving => "Halving",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown event category `{value}`")))
    }
}

/// Active category filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn admits(self, category: EventCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(active) => active == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ChartError;

    /// Accepts `all` (any case) or a category name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Text keyed by language, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(IndexMap<LanguageCode, String>);

impl LocalizedText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, language: impl Into<LanguageCode>, text: impl Into<String>) -> Self {
        self.insert(language, text);
        self
    }

    pub fn insert(&mut self, language: impl Into<LanguageCode>, text: impl Into<String>) {
        self.0.insert(language.into(), text.into());
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Resolves `language`, then `fallback`, then whatever was listed first.
    #[must_use]
    pub fn resolve(&self, language: &str, fallback: &str) -> &str {
        self.get(language)
            .or_else(|| self.get(fallback))
            .or_else(|| self.0.values().next().map(String::as_str))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    pub url: String,
    pub label: LocalizedText,
}

/// Dated annotation drawn as a marker on the focus pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unix milliseconds (UTC midnight of the feed date).
    pub time: f64,
    pub category: EventCategory,
    pub title: LocalizedText,
    pub tooltip: LocalizedText,
    pub body: LocalizedText,
    #[serde(default)]
    pub links: Vec<EventLink>,
}

impl Event {
    #[must_use]
    pub fn new(time: f64, category: EventCategory, title: LocalizedText) -> Self {
        Self {
            time,
            category,
            title,
            tooltip: LocalizedText::new(),
            body: LocalizedText::new(),
            links: Vec::new(),
        }
    }

    /// Splits the long description into paragraphs on blank lines.
    #[must_use]
    pub fn body_paragraphs<'a>(&'a self, language: &str, fallback: &str) -> Vec<&'a str> {
        self.body
            .resolve(language, fallback)
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .collect()
    }
}

/// Earliest event time, used to decide on synthetic lead-in points.
#[must_use]
pub fn earliest_event_time(events: &[Event]) -> Option<f64> {
    events
        .iter()
        .map(|event| event.time)
        .filter(|time| time.is_finite())
        .reduce(f64::min)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    Bull,
    Bear,
}

/// Labeled date range shaded behind the price line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCycle {
    pub start: f64,
    pub end: f64,
    pub kind: CycleKind,
}

impl MarketCycle {
    pub fn new(start: f64, end: f64, kind: CycleKind) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "market cycle bounds must be finite".to_owned(),
            ));
        }
        Ok(Self { start, end, kind })
    }
}
