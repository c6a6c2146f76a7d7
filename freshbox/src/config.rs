//! Caching configuration supplied by the host.
//!
//! A [`CacheConfiguration`] is immutable once built. The host signals
//! "no caching" by not supplying one at all (see
//! [`DirectivePolicy::disabled`](crate::DirectivePolicy::disabled)).
//!
//! The serde representation mirrors the configuration shape used by
//! existing deployments:
//!
//! ```yaml
//! cacheability: public
//! max_age: 3600
//! vary:
//!   http_header: Accept-Encoding, Accept-Language
//! ```

use std::fmt;
use std::time::Duration;

use http::HeaderName;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Who is allowed to store the response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Cacheability {
    /// Any cache, including shared intermediaries.
    Public,
    /// Only the end user's private cache.
    Private,
    /// Caches must revalidate before every reuse.
    NoCache,
    /// Nothing may be stored.
    NoStore,
}

impl Cacheability {
    /// The `Cache-Control` directive token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::NoCache => "no-cache",
            Self::NoStore => "no-store",
        }
    }
}

impl fmt::Display for Cacheability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of request header names a cached response varies on.
///
/// Duplicates are dropped on insert; the first occurrence keeps its position.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VaryDimensions {
    headers: Vec<HeaderName>,
}

impl VaryDimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header name unless it is already present.
    pub fn insert(&mut self, name: HeaderName) {
        if !self.headers.contains(&name) {
            self.headers.push(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderName> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Render as a `Vary` header value, or `None` when there is nothing to vary on.
    pub fn header_value(&self) -> Option<String> {
        if self.headers.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.headers.iter().map(HeaderName::as_str).collect();
        Some(names.join(", "))
    }
}

impl FromIterator<HeaderName> for VaryDimensions {
    fn from_iter<I: IntoIterator<Item = HeaderName>>(iter: I) -> Self {
        let mut dimensions = Self::new();
        for name in iter {
            dimensions.insert(name);
        }
        dimensions
    }
}

#[derive(Serialize, Deserialize)]
struct RawVary {
    #[serde(default, alias = "httpHeader")]
    http_header: Option<HeaderList>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HeaderList {
    Joined(String),
    Each(Vec<String>),
}

impl Serialize for VaryDimensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawVary {
            http_header: self.header_value().map(HeaderList::Joined),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VaryDimensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawVary::deserialize(deserializer)?;
        let names: Vec<String> = match raw.http_header {
            None => Vec::new(),
            Some(HeaderList::Joined(joined)) => {
                joined.split(',').map(|name| name.trim().to_owned()).collect()
            }
            Some(HeaderList::Each(each)) => each,
        };

        let mut dimensions = VaryDimensions::new();
        for name in names.iter().filter(|name| !name.is_empty()) {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| D::Error::custom(format!("invalid vary header name `{name}`")))?;
            dimensions.insert(header);
        }
        Ok(dimensions)
    }
}

/// Caching configuration for one kind of response.
///
/// # Example
///
/// ```
/// use freshbox::{CacheConfiguration, Cacheability};
/// use http::header::ACCEPT_ENCODING;
///
/// let config = CacheConfiguration::new()
///     .with_cacheability(Cacheability::Public)
///     .with_max_age(3600)
///     .vary_on(ACCEPT_ENCODING);
///
/// assert_eq!(config.max_age, Some(3600));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct CacheConfiguration {
    /// Leading `Cache-Control` token.
    #[serde(default)]
    pub cacheability: Option<Cacheability>,
    /// Freshness lifetime in seconds.
    #[serde(default, alias = "maxAge")]
    pub max_age: Option<u64>,
    /// Request headers the response varies on.
    #[serde(default)]
    pub vary: VaryDimensions,
}

impl CacheConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cacheability(mut self, cacheability: Cacheability) -> Self {
        self.cacheability = Some(cacheability);
        self
    }

    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn vary_on(mut self, name: HeaderName) -> Self {
        self.vary.insert(name);
        self
    }

    pub fn with_vary(mut self, vary: VaryDimensions) -> Self {
        self.vary = vary;
        self
    }

    /// Freshness lifetime as a [`Duration`].
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}
