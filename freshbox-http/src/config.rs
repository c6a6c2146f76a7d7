use bytes::Bytes;
use freshbox::{
    AnyDigest, ConditionalValidator, DigestAlgorithm, DirectivePolicy, LastModifiedFormat,
    ResponseSink,
};
use http::{Response, StatusCode};
use http_body::Body as HttpBody;
use http_body_util::Full;
use tracing::debug;

use crate::body::collect_validated;
use crate::error::{BoxError, SealError};
use crate::request::ConditionalHttpRequest;

/// Validation settings for one HTTP endpoint.
///
/// The default endpoint has caching disabled: responses pass through without
/// any header and are never answered with `304`.
#[derive(Debug, Clone, Default)]
pub struct HttpEndpoint {
    pub policy: DirectivePolicy,
    pub digest: DigestAlgorithm,
    pub last_modified: LastModifiedFormat,
}

impl HttpEndpoint {
    pub fn new(policy: DirectivePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_digest(self, digest: DigestAlgorithm) -> Self {
        Self { digest, ..self }
    }

    pub fn with_last_modified_format(self, last_modified: LastModifiedFormat) -> Self {
        Self {
            last_modified,
            ..self
        }
    }

    /// Open a validator for a response about to be produced.
    pub fn validator<S>(&self, response: &S) -> ConditionalValidator<AnyDigest>
    where
        S: ResponseSink + ?Sized,
    {
        ConditionalValidator::begin(&self.policy, self.digest.digest(), response)
            .with_last_modified_format(self.last_modified)
    }

    /// Validate `response` and answer `request` with it.
    ///
    /// The response becomes a `304 Not Modified` when the request is a GET or
    /// HEAD, the response is `200 OK`, and the request's conditional headers
    /// match the freshly sealed validators.
    pub async fn respond<B>(
        &self,
        request: &ConditionalHttpRequest,
        response: Response<B>,
    ) -> Result<Response<Full<Bytes>>, SealError>
    where
        B: HttpBody,
        B::Error: Into<BoxError>,
    {
        let validator = self.validator(&response);
        let validated = collect_validated(response, validator).await?;

        if request.accepts_not_modified()
            && validated.parts.status == StatusCode::OK
            && validated.validators.is_fresh(request.conditional())
        {
            debug!(
                method = %request.method(),
                entity_tag = validated.validators.entity_tag(),
                "client copy is fresh, answering 304"
            );
            return Ok(validated.into_not_modified());
        }

        Ok(validated.into_response())
    }
}
