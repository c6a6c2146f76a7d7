//! Error types for validator emission.

use http::HeaderName;
use http::header::InvalidHeaderValue;
use thiserror::Error;

/// Error raised while emitting computed headers onto a response.
///
/// Missing or malformed conditional request headers are never errors; they
/// degrade to a full response. A failure to attach a computed header aborts
/// response construction.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The response sink rejected a header value.
    #[error("invalid value for header `{name}`")]
    InvalidHeaderValue {
        name: HeaderName,
        #[source]
        source: InvalidHeaderValue,
    },

    /// Host-specific sink failure.
    #[error(transparent)]
    Sink(Box<dyn std::error::Error + Send + Sync>),
}
