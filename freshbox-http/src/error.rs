use freshbox::ValidatorError;
use thiserror::Error;

/// Boxed error used for body failures of arbitrary body types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error raised while streaming a response body through a validator.
#[derive(Debug, Error)]
pub enum SealError {
    /// The upstream body yielded an error before it ended.
    #[error("response body failed")]
    Body(#[source] BoxError),

    /// Computed headers could not be written onto the response.
    #[error(transparent)]
    Validator(#[from] ValidatorError),
}
