//! SDK error types.

use thiserror::Error;

/// Errors surfaced by the delivery client.
///
/// Per-field problems (unsupported field types, missing resolvers, missing
/// linked items) are not errors: they degrade to diagnostics and empty
/// values so a successful fetch always yields a fully-shaped response.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Setup mistake detected before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure reported by the fetcher, propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body did not match the expected envelope shape.
    #[error("malformed delivery response")]
    Decode(#[from] serde_json::Error),

    /// A rich text field re-entered its own resolution.
    #[error("cyclic rich text resolution in field '{field}'")]
    CyclicResolution { field: String },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(Box::new(err))
    }
}

/// Result type alias using [`DeliveryError`].
pub type DeliveryResult<T> = Result<T, DeliveryError>;
