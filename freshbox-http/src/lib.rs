//! `http` crate integration for freshbox.
//!
//! - [`collect_validated`] streams a `Response<B>` body through a
//!   [`ConditionalValidator`](freshbox::ConditionalValidator) and writes the
//!   validator headers onto the response parts.
//! - [`HttpEndpoint`] bundles a [`DirectivePolicy`](freshbox::DirectivePolicy)
//!   with the digest and date settings, and answers conditional GET/HEAD
//!   requests with `304 Not Modified`.
//! - [`not_modified`] builds a `304` from the parts of a full response.

pub mod body;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use body::collect_validated;
pub use config::HttpEndpoint;
pub use error::{BoxError, SealError};
pub use request::ConditionalHttpRequest;
pub use response::{NOT_MODIFIED_HEADERS, ValidatedResponse, not_modified};
