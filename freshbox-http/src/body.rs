//! Streaming a response body through a [`ConditionalValidator`].
//!
//! Validator headers must reach the wire before any body byte, so the body is
//! buffered while every data frame is observed in arrival order. The headers
//! are written onto the response parts once the body reports its end.

use std::pin::pin;

use bytes::{Buf, BytesMut};
use freshbox::{ConditionalValidator, EntityDigest};
use http::Response;
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use tracing::{debug, trace};

use crate::error::{BoxError, SealError};
use crate::response::ValidatedResponse;

/// Drive `response`'s body to completion through `validator` and seal it.
///
/// Trailers are not part of the entity and are dropped. A body error aborts
/// validation: no entity tag is produced for a partial body.
pub async fn collect_validated<B, D>(
    response: Response<B>,
    mut validator: ConditionalValidator<D>,
) -> Result<ValidatedResponse, SealError>
where
    B: HttpBody,
    B::Error: Into<BoxError>,
    D: EntityDigest,
{
    let (mut parts, body) = response.into_parts();
    let mut body = pin!(body);
    let mut buffer = BytesMut::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|error| SealError::Body(error.into()))?;
        match frame.into_data() {
            Ok(mut data) => {
                let chunk = data.copy_to_bytes(data.remaining());
                trace!(len = chunk.len(), "observed body chunk");
                validator.observe_chunk(&chunk);
                buffer.extend_from_slice(&chunk);
            }
            Err(frame) => {
                if frame.is_trailers() {
                    debug!("dropping response trailers");
                }
            }
        }
    }

    let validators = validator.finalize(None, &mut parts)?;
    Ok(ValidatedResponse {
        parts,
        body: buffer.freeze(),
        validators,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use freshbox::{CacheConfiguration, DirectivePolicy, Md5Digest};
    use http::header::ETAG;
    use http_body::Frame;
    use http_body_util::{Full, StreamBody};
    use pretty_assertions::assert_eq;

    fn policy() -> DirectivePolicy {
        DirectivePolicy::enabled(CacheConfiguration::new().with_max_age(60))
    }

    #[tokio::test]
    async fn single_frame_body() {
        let response = Response::new(Full::new(Bytes::from_static(b"hello")));
        let validator = ConditionalValidator::begin(&policy(), Md5Digest::new(), &response);

        let validated = collect_validated(response, validator).await.unwrap();

        assert_eq!(validated.body, Bytes::from_static(b"hello"));
        assert_eq!(
            validated.parts.headers[ETAG],
            "\"5D41402ABC4B2A76B9719D911017C592\""
        );
        assert_eq!(
            validated.validators.entity_tag(),
            Some("\"5D41402ABC4B2A76B9719D911017C592\"")
        );
    }

    #[tokio::test]
    async fn chunked_body_matches_single_frame() {
        let frames = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(Frame::data(Bytes::from_static(b"he"))),
            Ok(Frame::data(Bytes::from_static(b"ll"))),
            Ok(Frame::data(Bytes::from_static(b"o"))),
        ]);
        let response = Response::new(StreamBody::new(frames));
        let validator = ConditionalValidator::begin(&policy(), Md5Digest::new(), &response);

        let validated = collect_validated(response, validator).await.unwrap();

        assert_eq!(validated.body, Bytes::from_static(b"hello"));
        assert_eq!(
            validated.validators.entity_tag(),
            Some("\"5D41402ABC4B2A76B9719D911017C592\"")
        );
    }

    #[tokio::test]
    async fn body_error_aborts_validation() {
        let frames = futures::stream::iter(vec![
            Ok(Frame::data(Bytes::from_static(b"partial"))),
            Err(std::io::Error::other("connection reset")),
        ]);
        let response = Response::new(StreamBody::new(frames));
        let validator = ConditionalValidator::begin(&policy(), Md5Digest::new(), &response);

        let error = collect_validated(response, validator).await.unwrap_err();

        assert!(matches!(error, SealError::Body(_)));
    }
}
