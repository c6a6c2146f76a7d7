//! # freshbox
//!
//! HTTP caching headers and conditional request evaluation for outgoing
//! responses.
//!
//! Two components run in sequence on every response:
//!
//! - [`DirectivePolicy`] derives `Cache-Control`, `Expires` and `Vary` from a
//!   [`CacheConfiguration`]. It is a pure function of configuration and clock.
//! - [`ConditionalValidator`] streams the response body through a digest to
//!   produce a strong entity tag, stamps `Last-Modified`, writes every header
//!   onto the response, and seals the result into [`SealedValidators`].
//!
//! [`SealedValidators::evaluate`] then answers whether a request carrying
//! `If-None-Match` / `If-Modified-Since` already holds a fresh copy.
//!
//! Hosts expose their request and response through [`RequestView`] and
//! [`ResponseSink`], and forward body writes explicitly. Both traits are
//! implemented for the `http` crate's `HeaderMap`, `Request`, `Response` and
//! their `Parts`.
//!
//! ## Example
//!
//! ```
//! use freshbox::{
//!     CacheConfiguration, Cacheability, ConditionalRequestHeaders, ConditionalValidator,
//!     DirectivePolicy, ResponseSink, ValidatorError,
//! };
//! use http::HeaderName;
//!
//! #[derive(Default)]
//! struct Headers(Vec<(HeaderName, String)>);
//!
//! impl ResponseSink for Headers {
//!     fn header(&self, name: &HeaderName) -> Option<&str> {
//!         self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
//!     }
//!
//!     fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError> {
//!         self.0.push((name, value.to_owned()));
//!         Ok(())
//!     }
//! }
//!
//! let policy = DirectivePolicy::enabled(
//!     CacheConfiguration::new()
//!         .with_cacheability(Cacheability::Public)
//!         .with_max_age(3600),
//! );
//!
//! let mut response = Headers::default();
//! let mut validator = ConditionalValidator::new(&policy, &response);
//! validator.observe_chunk(b"hello");
//! let sealed = validator.finalize(None, &mut response)?;
//!
//! let conditional = ConditionalRequestHeaders::new()
//!     .with_if_none_match("\"5D41402ABC4B2A76B9719D911017C592\"");
//! assert!(sealed.is_fresh(&conditional));
//! # Ok::<(), ValidatorError>(())
//! ```

/// Caching configuration types.
pub mod config;

/// HTTP-date rendering and parsing.
pub mod date;

/// Digest accumulators and entity tag rendering.
pub mod digest;

/// `Cache-Control`, `Expires` and `Vary` derivation.
pub mod directive;

/// Error types.
pub mod error;

/// Conditional request evaluation.
pub mod freshness;

/// Capability traits implemented by host adapters.
pub mod sink;

/// Entity tag computation and sealing.
pub mod validator;

pub use config::{CacheConfiguration, Cacheability, VaryDimensions};
pub use date::{LastModifiedFormat, format_http_date, parse_http_date};
pub use digest::{AnyDigest, DigestAlgorithm, EntityDigest, Md5Digest, Sha256Digest, entity_tag};
pub use directive::{DirectivePolicy, DirectiveSet};
pub use error::ValidatorError;
pub use freshness::{ConditionalRequestHeaders, Freshness, evaluate, is_fresh};
pub use sink::{RequestView, ResponseSink};
pub use validator::{ConditionalValidator, SealedValidators, ValidatorState};
