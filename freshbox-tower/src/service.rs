use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use freshbox_http::{BoxError, ConditionalHttpRequest, HttpEndpoint};
use http::{Request, Response};
use http_body::Body as HttpBody;
use http_body_util::Full;
use tower::Service;
use tracing::trace;

use crate::future::ResponseFuture;

/// Service produced by [`FreshnessLayer`](crate::FreshnessLayer).
pub struct FreshnessService<S> {
    upstream: S,
    endpoint: Arc<HttpEndpoint>,
}

impl<S> FreshnessService<S> {
    pub fn new(upstream: S, endpoint: Arc<HttpEndpoint>) -> Self {
        FreshnessService { upstream, endpoint }
    }

    pub fn endpoint(&self) -> &HttpEndpoint {
        &self.endpoint
    }

    pub fn into_inner(self) -> S {
        self.upstream
    }
}

impl<S> Clone for FreshnessService<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            endpoint: Arc::clone(&self.endpoint),
        }
    }
}

impl<S> fmt::Debug for FreshnessService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreshnessService")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FreshnessService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Error: Into<BoxError>,
    ResBody: HttpBody + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Into<BoxError> + Send,
{
    type Response = Response<Full<Bytes>>;
    type Error = BoxError;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let request = ConditionalHttpRequest::from_request(&req);
        trace!(
            method = %request.method(),
            conditional = request.conditional().is_conditional(),
            "forwarding request upstream"
        );
        ResponseFuture::new(self.upstream.call(req), request, Arc::clone(&self.endpoint))
    }
}
