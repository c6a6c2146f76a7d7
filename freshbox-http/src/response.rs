use bytes::Bytes;
use freshbox::SealedValidators;
use http::header::{CACHE_CONTROL, CONTENT_LOCATION, DATE, ETAG, EXPIRES, LAST_MODIFIED, VARY};
use http::{HeaderName, Response, StatusCode, response::Parts};
use http_body_util::Full;

/// Headers carried over from the full response onto a `304 Not Modified`.
pub const NOT_MODIFIED_HEADERS: [HeaderName; 7] = [
    CACHE_CONTROL,
    CONTENT_LOCATION,
    DATE,
    ETAG,
    EXPIRES,
    LAST_MODIFIED,
    VARY,
];

/// A response whose body was fully observed and whose validators are sealed.
#[derive(Debug)]
pub struct ValidatedResponse {
    pub parts: Parts,
    pub body: Bytes,
    pub validators: SealedValidators,
}

impl ValidatedResponse {
    pub fn into_response(self) -> Response<Full<Bytes>> {
        Response::from_parts(self.parts, Full::new(self.body))
    }

    /// Replace the response with a bodiless `304 Not Modified`.
    pub fn into_not_modified(self) -> Response<Full<Bytes>> {
        not_modified(&self.parts)
    }
}

/// Build a `304 Not Modified` from the parts of the full response.
///
/// Only [`NOT_MODIFIED_HEADERS`] are copied; every value of a repeated header
/// is kept.
pub fn not_modified<B: Default>(parts: &Parts) -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    *response.version_mut() = parts.version;

    let headers = response.headers_mut();
    for name in NOT_MODIFIED_HEADERS.iter() {
        for value in parts.headers.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    response
}
