use fm_core::AssetId;
use fm_motion::MotionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot build path: {0}")]
    Motion(#[from] MotionError),

    #[error("no track for {0}")]
    UnknownAsset(AssetId),
}

pub type FeedResult<T> = Result<T, FeedError>;
