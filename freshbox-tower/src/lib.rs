//! Tower middleware for freshbox.
//!
//! [`FreshnessLayer`] wraps any service producing `http::Response<B>`. Each
//! response body is buffered and digested, `Cache-Control` / `Expires` /
//! `Vary` / `ETag` / `Last-Modified` are written, and GET or HEAD requests
//! whose `If-None-Match` or `If-Modified-Since` match are answered with
//! `304 Not Modified`.
//!
//! ```no_run
//! use freshbox::{CacheConfiguration, Cacheability};
//! use freshbox_tower::FreshnessLayer;
//! use tower::ServiceBuilder;
//! # use bytes::Bytes;
//! # use http::{Request, Response};
//! # use http_body_util::Full;
//! # use std::convert::Infallible;
//!
//! let layer = FreshnessLayer::builder()
//!     .configuration(
//!         CacheConfiguration::new()
//!             .with_cacheability(Cacheability::Public)
//!             .with_max_age(3600),
//!     )
//!     .build();
//!
//! let service = ServiceBuilder::new()
//!     .layer(layer)
//!     .service_fn(|_req: Request<()>| async {
//!         Ok::<_, Infallible>(Response::new(Full::new(Bytes::from_static(b"hello"))))
//!     });
//! ```

pub mod future;
pub mod layer;
pub mod service;

pub use future::ResponseFuture;
pub use layer::{FreshnessLayer, FreshnessLayerBuilder};
pub use service::FreshnessService;
