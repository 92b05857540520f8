use thiserror::Error;

/// Provider failures. Every variant is recoverable: callers log and skip
/// the affected phrase, chunk, or variation instead of aborting the run.
/// "Valid response, no signal" is not an error and is modelled as `None`
/// in provider return types.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Parse(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
