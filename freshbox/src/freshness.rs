//! Conditional request evaluation.
//!
//! The decision follows a fixed precedence:
//!
//! 1. No `If-None-Match` and no `If-Modified-Since`: [`Freshness::Stale`].
//! 2. `If-None-Match` equal to the stored entity tag, byte for byte:
//!    [`Freshness::Fresh`], whatever `If-Modified-Since` says.
//! 3. `If-Modified-Since` and a stored `Last-Modified` both present and both
//!    parseable, with `Last-Modified <= If-Modified-Since`: [`Freshness::Fresh`].
//! 4. Anything else: [`Freshness::Stale`].
//!
//! Unparseable dates never fail the evaluation; they fall through to stale.

use http::HeaderName;
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use tracing::debug;

use crate::date::parse_http_date;
use crate::sink::RequestView;
use crate::validator::SealedValidators;

/// Conditional headers extracted from an incoming request.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ConditionalRequestHeaders {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl ConditionalRequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    pub fn with_if_modified_since(mut self, value: impl Into<String>) -> Self {
        self.if_modified_since = Some(value.into());
        self
    }

    /// Extract the conditional headers. Empty values read as absent.
    pub fn from_request<R>(request: &R) -> Self
    where
        R: RequestView + ?Sized,
    {
        let read = |name: &HeaderName| {
            request
                .header(name)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        Self {
            if_none_match: read(&IF_NONE_MATCH),
            if_modified_since: read(&IF_MODIFIED_SINCE),
        }
    }

    /// Whether the request carries any conditional header.
    pub fn is_conditional(&self) -> bool {
        self.if_none_match.is_some() || self.if_modified_since.is_some()
    }
}

/// Outcome of a conditional evaluation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Freshness {
    /// The client's copy is still valid: answer "not modified".
    Fresh,
    /// The full response must be sent.
    Stale,
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh)
    }

    /// Whether the full body must be (re)sent.
    pub fn is_modified(&self) -> bool {
        !self.is_fresh()
    }
}

/// Evaluate a request's conditional headers against stored validators.
pub fn evaluate(
    conditional: &ConditionalRequestHeaders,
    validators: &SealedValidators,
) -> Freshness {
    if !conditional.is_conditional() {
        return Freshness::Stale;
    }

    if let (Some(if_none_match), Some(entity_tag)) =
        (conditional.if_none_match.as_deref(), validators.entity_tag())
    {
        if if_none_match == entity_tag {
            return Freshness::Fresh;
        }
    }

    if let (Some(if_modified_since), Some(last_modified)) = (
        conditional.if_modified_since.as_deref(),
        validators.last_modified(),
    ) {
        let since = parse_http_date(if_modified_since);
        let modified = parse_http_date(last_modified);
        match (modified, since) {
            (Some(modified), Some(since)) if modified <= since => return Freshness::Fresh,
            (Some(_), Some(_)) => {}
            _ => debug!(
                if_modified_since,
                last_modified, "unparseable date in conditional evaluation"
            ),
        }
    }

    Freshness::Stale
}

/// Freshness check for hosts that may have no stored validators at all.
///
/// `None` (caching disabled or nothing stored) is always stale.
pub fn is_fresh(
    conditional: &ConditionalRequestHeaders,
    validators: Option<&SealedValidators>,
) -> bool {
    validators.is_some_and(|validators| evaluate(conditional, validators).is_fresh())
}
