use std::sync::Arc;

use freshbox::{CacheConfiguration, DigestAlgorithm, DirectivePolicy, LastModifiedFormat};
use freshbox_http::HttpEndpoint;
use tower::Layer;

use crate::service::FreshnessService;

/// Tower layer that stamps caching headers on responses and answers
/// conditional requests with `304 Not Modified`.
#[derive(Debug, Clone, Default)]
pub struct FreshnessLayer {
    pub endpoint: Arc<HttpEndpoint>,
}

impl FreshnessLayer {
    pub fn new(endpoint: HttpEndpoint) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
        }
    }

    pub fn builder() -> FreshnessLayerBuilder {
        FreshnessLayerBuilder::default()
    }
}

impl<S> Layer<S> for FreshnessLayer {
    type Service = FreshnessService<S>;

    fn layer(&self, upstream: S) -> Self::Service {
        FreshnessService::new(upstream, Arc::clone(&self.endpoint))
    }
}

impl From<HttpEndpoint> for FreshnessLayer {
    fn from(endpoint: HttpEndpoint) -> Self {
        Self::new(endpoint)
    }
}

/// Builder for [`FreshnessLayer`].
///
/// Without a [`configuration`](Self::configuration) the layer only forwards
/// responses.
#[derive(Debug, Default)]
pub struct FreshnessLayerBuilder {
    policy: DirectivePolicy,
    digest: DigestAlgorithm,
    last_modified: LastModifiedFormat,
}

impl FreshnessLayerBuilder {
    pub fn configuration(self, configuration: CacheConfiguration) -> Self {
        FreshnessLayerBuilder {
            policy: DirectivePolicy::enabled(configuration),
            ..self
        }
    }

    pub fn policy(self, policy: DirectivePolicy) -> Self {
        FreshnessLayerBuilder { policy, ..self }
    }

    pub fn digest(self, digest: DigestAlgorithm) -> Self {
        FreshnessLayerBuilder { digest, ..self }
    }

    pub fn last_modified_format(self, last_modified: LastModifiedFormat) -> Self {
        FreshnessLayerBuilder {
            last_modified,
            ..self
        }
    }

    pub fn build(self) -> FreshnessLayer {
        FreshnessLayer::new(
            HttpEndpoint::new(self.policy)
                .with_digest(self.digest)
                .with_last_modified_format(self.last_modified),
        )
    }
}
