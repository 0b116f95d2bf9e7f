pub mod events;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod stats;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use events::{
    CategoryFilter, CycleKind, Event, EventCategory, EventLink, LanguageCode, LocalizedText,
    MarketCycle, earliest_event_time,
};
pub use price_scale::{
    PriceScale, PriceScaleMode, ValueDomainTuning, compute_value_domain, nice_linear_domain,
};
pub use scale::LinearScale;
pub use series::{LoadedSeries, PricePoint, Series, SeriesTuning};
pub use stats::{StatsSummary, genesis_date};
pub use time_scale::{TimeDomainTuning, TimeScale, compute_time_domain};
pub use types::{PixelPoint, Viewport};
pub use windowing::{
    bisect_left, bisect_left_from, slice_window, split_by_provenance, window_bounds,
};
