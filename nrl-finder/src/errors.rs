use nrl_core::RegionSetError;
use serde::Serialize;
use thiserror::Error;

/// Fatal errors. Any of these aborts the invocation.
#[derive(Error, Debug)]
pub enum NrlError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to load intervals: {0}")]
    Load(#[from] RegionSetError),
    #[error("Failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Failed to render figure: {0}")]
    RenderFailure(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why an invocation produced no applicable data.
///
/// This is a valid outcome, carried next to the (empty) output rather than
/// returned as an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    #[error("the interval file contains no intervals")]
    NoIntervals,
    #[error("no fragment is at least {offset} long")]
    AllBelowOffset { offset: u32 },
    #[error("no extremum passed the count threshold")]
    NoExtrema,
}

pub type NrlResult<T> = std::result::Result<T, NrlError>;
