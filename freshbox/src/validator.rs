//! Entity tag and last-modified computation over a streamed response body.
//!
//! A [`ConditionalValidator`] is created when a response begins, fed every
//! body chunk through [`observe_chunk`](ConditionalValidator::observe_chunk),
//! and consumed by [`finalize`](ConditionalValidator::finalize), which writes
//! the headers onto the response and returns the immutable
//! [`SealedValidators`]. The host must call `finalize` before it flushes the
//! terminal body bytes: headers cannot follow body bytes on the wire.
//!
//! ```text
//!   begin ──► OPEN ──observe_chunk──► OPEN ──finalize──► SEALED
//! ```
//!
//! Dropping an open validator discards the partial digest; no entity tag is
//! ever emitted for an incomplete body.

use chrono::{DateTime, Utc};
use http::header::{ETAG, LAST_MODIFIED};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::LastModifiedFormat;
use crate::digest::{AnyDigest, EntityDigest, entity_tag};
use crate::directive::{DirectivePolicy, DirectiveSet};
use crate::freshness::{ConditionalRequestHeaders, Freshness, evaluate};
use crate::sink::ResponseSink;
use crate::ValidatorError;

/// In-progress validator state for one response body.
#[derive(Debug, Clone)]
pub enum ValidatorState<D = AnyDigest> {
    /// Accumulating a digest over the body.
    Digesting(D),
    /// The response already carried an `ETag`; no digest is computed.
    Upstream {
        entity_tag: Option<String>,
    },
    /// Caching is disabled for this response.
    Disabled,
}

impl<D: EntityDigest> ValidatorState<D> {
    pub fn is_digesting(&self) -> bool {
        matches!(self, Self::Digesting(_))
    }

    fn observe(&mut self, chunk: &[u8]) {
        if let Self::Digesting(digest) = self {
            digest.update(chunk);
        }
    }
}

/// Validators of a finished response.
///
/// These are the values a host persists to answer later conditional requests
/// for the same resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct SealedValidators {
    entity_tag: Option<String>,
    last_modified: Option<String>,
}

impl SealedValidators {
    pub fn new(entity_tag: Option<String>, last_modified: Option<String>) -> Self {
        Self {
            entity_tag,
            last_modified,
        }
    }

    /// Rebuild validators from the headers of a stored response.
    pub fn from_response_headers<S>(response: &S) -> Self
    where
        S: ResponseSink + ?Sized,
    {
        Self {
            entity_tag: response.header(&ETAG).map(str::to_owned),
            last_modified: response.header(&LAST_MODIFIED).map(str::to_owned),
        }
    }

    /// Quoted entity tag.
    pub fn entity_tag(&self) -> Option<&str> {
        self.entity_tag.as_deref()
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn evaluate(&self, conditional: &ConditionalRequestHeaders) -> Freshness {
        evaluate(conditional, self)
    }

    /// Whether the client's copy described by `conditional` is still fresh.
    pub fn is_fresh(&self, conditional: &ConditionalRequestHeaders) -> bool {
        self.evaluate(conditional).is_fresh()
    }
}

/// Computes and emits the validators of one response.
#[derive(Debug)]
pub struct ConditionalValidator<D = AnyDigest> {
    directives: DirectiveSet,
    state: ValidatorState<D>,
    format: LastModifiedFormat,
    observed: u64,
}

impl<D: EntityDigest> ConditionalValidator<D> {
    /// Start validating a response.
    ///
    /// Directives are derived now. The response is checked once for an
    /// existing `ETag`; when present, digesting is skipped for the whole body.
    pub fn begin<S>(policy: &DirectivePolicy, digest: D, response: &S) -> Self
    where
        S: ResponseSink + ?Sized,
    {
        Self::begin_at(policy, digest, response, Utc::now())
    }

    /// Like [`begin`](Self::begin), deriving `Expires` from `now`.
    pub fn begin_at<S>(policy: &DirectivePolicy, digest: D, response: &S, now: DateTime<Utc>) -> Self
    where
        S: ResponseSink + ?Sized,
    {
        Self::with_directives(
            policy.is_enabled().then(|| policy.derive_at(now)),
            digest,
            response,
        )
    }

    /// Start validating with directives derived elsewhere.
    ///
    /// `None` disables all header emission for this response. An empty
    /// upstream `ETag` does not count as one: the body is digested and the
    /// computed tag replaces it.
    pub fn with_directives<S>(directives: Option<DirectiveSet>, digest: D, response: &S) -> Self
    where
        S: ResponseSink + ?Sized,
    {
        let upstream = response.has_header(&ETAG) && response.header(&ETAG) != Some("");
        let state = match &directives {
            None => ValidatorState::Disabled,
            Some(_) if upstream => {
                let entity_tag = response.header(&ETAG).map(str::to_owned);
                debug!(?entity_tag, "response already carries an ETag, digest skipped");
                ValidatorState::Upstream { entity_tag }
            }
            Some(_) => ValidatorState::Digesting(digest),
        };

        Self {
            directives: directives.unwrap_or_default(),
            state,
            format: LastModifiedFormat::default(),
            observed: 0,
        }
    }

    pub fn with_last_modified_format(mut self, format: LastModifiedFormat) -> Self {
        self.format = format;
        self
    }

    pub fn state(&self) -> &ValidatorState<D> {
        &self.state
    }

    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// Number of body bytes observed so far, trailing bytes excluded.
    pub fn observed_bytes(&self) -> u64 {
        self.observed
    }

    /// Observe the next body chunk, in write order.
    pub fn observe_chunk(&mut self, chunk: &[u8]) {
        self.observed += chunk.len() as u64;
        self.state.observe(chunk);
    }

    /// Seal the validators against the current clock.
    ///
    /// `trailing` carries the bytes handed to the terminal write, if any; they
    /// are digested before the tag is rendered. Every header is written onto
    /// `response` exactly once.
    pub fn finalize<S>(
        self,
        trailing: Option<&[u8]>,
        response: &mut S,
    ) -> Result<SealedValidators, ValidatorError>
    where
        S: ResponseSink + ?Sized,
    {
        self.finalize_at(trailing, response, Utc::now())
    }

    pub fn finalize_at<S>(
        mut self,
        trailing: Option<&[u8]>,
        response: &mut S,
        now: DateTime<Utc>,
    ) -> Result<SealedValidators, ValidatorError>
    where
        S: ResponseSink + ?Sized,
    {
        if let Some(trailing) = trailing {
            self.observe_chunk(trailing);
        }

        let sealed = match self.state {
            ValidatorState::Disabled => return Ok(SealedValidators::default()),
            ValidatorState::Upstream { entity_tag } => {
                self.directives.apply(response)?;
                SealedValidators {
                    entity_tag,
                    last_modified: response.header(&LAST_MODIFIED).map(str::to_owned),
                }
            }
            ValidatorState::Digesting(digest) => {
                let sealed = SealedValidators {
                    entity_tag: Some(entity_tag(&digest.finish())),
                    last_modified: Some(self.format.format(now)),
                };
                self.directives.apply(response)?;
                if let Some(tag) = sealed.entity_tag() {
                    response.set_header(ETAG, tag)?;
                }
                if let Some(last_modified) = sealed.last_modified() {
                    response.set_header(LAST_MODIFIED, last_modified)?;
                }
                sealed
            }
        };

        trace!(
            bytes = self.observed,
            entity_tag = sealed.entity_tag(),
            last_modified = sealed.last_modified(),
            "validators sealed"
        );
        Ok(sealed)
    }
}

impl ConditionalValidator<AnyDigest> {
    /// Start validating with the default digest algorithm.
    pub fn new<S>(policy: &DirectivePolicy, response: &S) -> Self
    where
        S: ResponseSink + ?Sized,
    {
        Self::begin(policy, AnyDigest::default(), response)
    }
}
