//! Capability traits implemented by host adapters.
//!
//! The validator never touches a framework type directly. A host exposes the
//! incoming request through [`RequestView`] and the outgoing response through
//! [`ResponseSink`]; body writes are forwarded explicitly to
//! [`ConditionalValidator::observe_chunk`](crate::ConditionalValidator::observe_chunk)
//! and [`ConditionalValidator::finalize`](crate::ConditionalValidator::finalize).
//!
//! Adapters for the `http` crate's `HeaderMap`, `Request`, `Response` and
//! their `Parts` live here.

use http::{HeaderMap, HeaderName, HeaderValue, Request, Response, request, response};

use crate::ValidatorError;

/// Read-only header lookup on an incoming request.
pub trait RequestView {
    /// Header value by name. Values that are not visible ASCII read as absent.
    fn header(&self, name: &HeaderName) -> Option<&str>;
}

/// Header side of an outgoing response.
pub trait ResponseSink {
    /// Current header value by name. Values that are not visible ASCII read as absent.
    fn header(&self, name: &HeaderName) -> Option<&str>;

    /// Whether the header is set at all, readable or not.
    fn has_header(&self, name: &HeaderName) -> bool {
        self.header(name).is_some()
    }

    /// Set a header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError>;
}

impl<T: RequestView + ?Sized> RequestView for &T {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        (**self).header(name)
    }
}

impl<T: ResponseSink + ?Sized> ResponseSink for &mut T {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        (**self).header(name)
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        (**self).has_header(name)
    }

    fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError> {
        (**self).set_header(name, value)
    }
}

impl RequestView for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

impl<B> RequestView for Request<B> {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        RequestView::header(self.headers(), name)
    }
}

impl RequestView for request::Parts {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        RequestView::header(&self.headers, name)
    }
}

impl ResponseSink for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        self.contains_key(name)
    }

    fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError> {
        let value = HeaderValue::from_str(value).map_err(|source| {
            ValidatorError::InvalidHeaderValue {
                name: name.clone(),
                source,
            }
        })?;
        self.insert(name, value);
        Ok(())
    }
}

impl ResponseSink for response::Parts {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        ResponseSink::header(&self.headers, name)
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        self.headers.contains_key(name)
    }

    fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError> {
        self.headers.set_header(name, value)
    }
}

impl<B> ResponseSink for Response<B> {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        ResponseSink::header(self.headers(), name)
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        self.headers().contains_key(name)
    }

    fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), ValidatorError> {
        self.headers_mut().set_header(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ETAG, IF_NONE_MATCH};
    use pretty_assertions::assert_eq;

    #[test]
    fn request_view_reads_visible_ascii_only() {
        let request = Request::builder()
            .header(IF_NONE_MATCH, "\"abc\"")
            .header("x-binary", HeaderValue::from_bytes(b"\xFF").unwrap())
            .body(())
            .unwrap();

        assert_eq!(RequestView::header(&request, &IF_NONE_MATCH), Some("\"abc\""));
        assert_eq!(
            RequestView::header(&request, &HeaderName::from_static("x-binary")),
            None
        );
    }

    #[test]
    fn has_header_sees_unreadable_values() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_bytes(b"\"\xFF\"").unwrap());

        assert!(headers.has_header(&ETAG));
        assert_eq!(ResponseSink::header(&headers, &ETAG), None);
    }

    #[test]
    fn set_header_replaces_previous_value() {
        let mut response = Response::new(());
        response.set_header(ETAG, "\"one\"").unwrap();
        response.set_header(ETAG, "\"two\"").unwrap();

        assert_eq!(response.headers().get_all(ETAG).iter().count(), 1);
        assert_eq!(ResponseSink::header(&response, &ETAG), Some("\"two\""));
    }

    #[test]
    fn set_header_rejects_control_characters() {
        let mut headers = HeaderMap::new();
        let error = headers.set_header(ETAG, "line\nbreak").unwrap_err();

        assert!(matches!(
            error,
            ValidatorError::InvalidHeaderValue { ref name, .. } if *name == ETAG
        ));
    }
}
