use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use freshbox_http::{BoxError, ConditionalHttpRequest, HttpEndpoint, SealError};
use futures::future::BoxFuture;
use futures::ready;
use http::Response;
use http_body::Body as HttpBody;
use http_body_util::Full;
use pin_project::pin_project;

type Validating = BoxFuture<'static, Result<Response<Full<Bytes>>, SealError>>;

#[pin_project(project = StateProj)]
enum State<F> {
    Upstream {
        #[pin]
        future: F,
    },
    Validating {
        future: Validating,
    },
}

/// Response future of [`FreshnessService`](crate::FreshnessService).
///
/// Waits for the upstream response, then buffers and validates its body.
#[pin_project]
pub struct ResponseFuture<F> {
    #[pin]
    state: State<F>,
    request: ConditionalHttpRequest,
    endpoint: Arc<HttpEndpoint>,
}

impl<F> ResponseFuture<F> {
    pub fn new(upstream: F, request: ConditionalHttpRequest, endpoint: Arc<HttpEndpoint>) -> Self {
        ResponseFuture {
            state: State::Upstream { future: upstream },
            request,
            endpoint,
        }
    }
}

impl<F, ResBody, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    E: Into<BoxError>,
    ResBody: HttpBody + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Into<BoxError> + Send,
{
    type Output = Result<Response<Full<Bytes>>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            match this.state.as_mut().project() {
                StateProj::Upstream { future } => {
                    let response = ready!(future.poll(cx)).map_err(Into::<BoxError>::into)?;
                    let request = mem::take(this.request);
                    let endpoint = Arc::clone(this.endpoint);
                    let future: Validating =
                        Box::pin(async move { endpoint.respond(&request, response).await });
                    this.state.set(State::Validating { future });
                }
                StateProj::Validating { future } => {
                    return future.as_mut().poll(cx).map_err(Into::into);
                }
            }
        }
    }
}
