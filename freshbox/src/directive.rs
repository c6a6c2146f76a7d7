//! Cache directives derived from configuration.
//!
//! [`DirectivePolicy`] is the leaf component: it turns an optional
//! [`CacheConfiguration`] into a [`DirectiveSet`] holding at most
//! `Cache-Control`, `Expires` and `Vary`. It performs no I/O and never fails.

use chrono::{DateTime, TimeDelta, Utc};
use http::HeaderName;
use http::header::{CACHE_CONTROL, EXPIRES, VARY};

use crate::config::CacheConfiguration;
use crate::date::format_http_date;
use crate::sink::ResponseSink;
use crate::ValidatorError;

/// Upper bound on the lifetime added to the clock when computing `Expires`.
///
/// Larger `max_age` values are still written verbatim into `Cache-Control`.
pub const MAX_EXPIRES_DELTA_SECS: u64 = i32::MAX as u64;

/// Immutable set of directive headers for one response.
///
/// Safe to share between concurrent responses once derived.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DirectiveSet {
    cache_control: Option<String>,
    expires: Option<String>,
    vary: Option<String>,
}

impl DirectiveSet {
    /// The empty set produced when caching is disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive directives from a configuration at the given instant.
    pub fn from_configuration(config: &CacheConfiguration, now: DateTime<Utc>) -> Self {
        let mut cache_control = config
            .cacheability
            .map(|cacheability| cacheability.as_str().to_owned())
            .unwrap_or_default();

        if let Some(max_age) = config.max_age {
            if !cache_control.is_empty() {
                cache_control.push_str(", ");
            }
            cache_control.push_str(&format!("max-age={max_age}"));
        }

        let expires = config.max_age.map(|max_age| {
            let seconds = max_age.min(MAX_EXPIRES_DELTA_SECS) as i64;
            let expires_at = TimeDelta::try_seconds(seconds)
                .and_then(|delta| now.checked_add_signed(delta))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            format_http_date(expires_at)
        });

        Self {
            cache_control: (!cache_control.is_empty()).then_some(cache_control),
            expires,
            vary: config.vary.header_value(),
        }
    }

    pub fn cache_control(&self) -> Option<&str> {
        self.cache_control.as_deref()
    }

    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }

    pub fn vary(&self) -> Option<&str> {
        self.vary.as_deref()
    }

    /// Header value by name.
    pub fn get(&self, name: &HeaderName) -> Option<&str> {
        self.iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value)
    }

    /// Present headers in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &str)> {
        [
            (CACHE_CONTROL, self.cache_control.as_deref()),
            (EXPIRES, self.expires.as_deref()),
            (VARY, self.vary.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy every present directive onto a response.
    pub fn apply<S>(&self, response: &mut S) -> Result<(), ValidatorError>
    where
        S: ResponseSink + ?Sized,
    {
        for (name, value) in self.iter() {
            response.set_header(name, value)?;
        }
        Ok(())
    }
}

/// Derives directives for responses sharing one configuration.
///
/// A policy without configuration is disabled: it derives an empty
/// [`DirectiveSet`] and switches validator computation off entirely.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DirectivePolicy {
    configuration: Option<CacheConfiguration>,
}

impl DirectivePolicy {
    pub fn new(configuration: Option<CacheConfiguration>) -> Self {
        Self { configuration }
    }

    pub fn enabled(configuration: CacheConfiguration) -> Self {
        Self::new(Some(configuration))
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.configuration.is_some()
    }

    pub fn configuration(&self) -> Option<&CacheConfiguration> {
        self.configuration.as_ref()
    }

    /// Derive directives against the current wall clock.
    pub fn derive(&self) -> DirectiveSet {
        self.derive_at(Utc::now())
    }

    pub fn derive_at(&self, now: DateTime<Utc>) -> DirectiveSet {
        match &self.configuration {
            Some(configuration) => DirectiveSet::from_configuration(configuration, now),
            None => DirectiveSet::empty(),
        }
    }
}

impl From<CacheConfiguration> for DirectivePolicy {
    fn from(configuration: CacheConfiguration) -> Self {
        Self::enabled(configuration)
    }
}
