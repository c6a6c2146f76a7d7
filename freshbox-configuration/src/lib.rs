//! Declarative configuration for freshbox endpoints.
//!
//! [`ConfigEndpoint`] is deserialized from YAML and turned into an
//! [`HttpEndpoint`](freshbox_http::HttpEndpoint) ready for
//! `freshbox-tower`.

pub mod endpoint;
pub mod error;

pub use endpoint::ConfigEndpoint;
pub use error::ConfigError;
