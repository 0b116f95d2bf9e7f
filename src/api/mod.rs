mod bootstrap;
mod brush;
mod chart_core;
mod chart_state;
mod config;
mod event_interaction;
mod frame_builder;
mod json_contract;
mod pointer;
mod scale_manager;

pub use bootstrap::{LoadState, bootstrap};
pub use chart_core::ChartCore;
pub use chart_state::ChartState;
pub use config::{ChartCoreConfig, TransitionTuning};
pub use json_contract::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrameJsonContractV1};
pub use scale_manager::ScaleManager;
