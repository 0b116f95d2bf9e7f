//! history-chart: windowing and scale management for an annotated,
//! zoomable two-pane price-history chart.
//!
//! The crate turns a long price series, dated events and market cycles into
//! fully materialized `render::ChartFrame`s. Drawing is left to a
//! `render::Renderer` implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod feeds;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartCore, ChartCoreConfig, LoadState, bootstrap};
pub use error::{ChartError, ChartResult};
