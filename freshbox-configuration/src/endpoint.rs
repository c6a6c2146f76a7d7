use std::fs;
use std::path::Path;

use freshbox::{CacheConfiguration, DigestAlgorithm, DirectivePolicy, LastModifiedFormat};
use freshbox_http::HttpEndpoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Serializable description of an [`HttpEndpoint`].
///
/// ```yaml
/// caching:
///   cacheability: public
///   max_age: 3600
///   vary:
///     http_header: [Accept-Encoding, Accept-Language]
/// digest: Md5
/// last_modified_format: Legacy
/// ```
///
/// Without `caching` the endpoint emits no headers and never answers 304.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ConfigEndpoint {
    #[serde(default, alias = "cachingSettings")]
    pub caching: Option<CacheConfiguration>,
    #[serde(default)]
    pub digest: DigestAlgorithm,
    #[serde(default)]
    pub last_modified_format: LastModifiedFormat,
}

impl ConfigEndpoint {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading endpoint configuration");
        Self::from_yaml_str(&yaml)
    }

    pub fn policy(&self) -> DirectivePolicy {
        DirectivePolicy::new(self.caching.clone())
    }

    pub fn into_endpoint(self) -> HttpEndpoint {
        HttpEndpoint::new(DirectivePolicy::new(self.caching))
            .with_digest(self.digest)
            .with_last_modified_format(self.last_modified_format)
    }
}

impl From<ConfigEndpoint> for HttpEndpoint {
    fn from(config: ConfigEndpoint) -> Self {
        config.into_endpoint()
    }
}
