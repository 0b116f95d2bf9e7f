use thiserror::Error;

use crate::feeds::FeedKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("price series is empty after ingestion")]
    EmptySeries,

    #[error("failed to load {feed} feed: {reason}")]
    FeedLoad { feed: FeedKind, reason: String },
}
