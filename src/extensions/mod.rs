//! Event-layer modules: marker projection, category filtering and the
//! command stream consumed by UI code.
//!
//! Nothing here owns state; `api::ChartCore` drives these functions.

pub mod commands;
pub mod filter;
pub mod markers;

pub use commands::{ChartCommand, ChartObserver, CommandContext};
pub use filter::{category_counts, classify, emphasized_indices};
pub use markers::{
    MarkerAnchor, MarkerPlacementConfig, MarkerPlacementContext, PlacedEventMarker,
    bisection_neighbors, nearest_sample_index, place_event_markers, project_event_anchor,
};
