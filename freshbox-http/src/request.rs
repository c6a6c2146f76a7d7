use freshbox::ConditionalRequestHeaders;
use http::{Method, Request, request::Parts};

/// What the validation step needs to remember about an incoming request.
///
/// Captured before the request is handed to the upstream service. The default
/// is an unconditional GET.
#[derive(Debug, Clone, Default)]
pub struct ConditionalHttpRequest {
    method: Method,
    conditional: ConditionalRequestHeaders,
}

impl ConditionalHttpRequest {
    pub fn new(method: Method, conditional: ConditionalRequestHeaders) -> Self {
        Self {
            method,
            conditional,
        }
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(
            request.method().clone(),
            ConditionalRequestHeaders::from_request(request),
        )
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(
            parts.method.clone(),
            ConditionalRequestHeaders::from_request(parts),
        )
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn conditional(&self) -> &ConditionalRequestHeaders {
        &self.conditional
    }

    /// Only safe retrievals may be answered with `304 Not Modified`.
    pub fn accepts_not_modified(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }
}
