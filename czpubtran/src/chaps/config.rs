//! CRWS client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::MAX_CONNECTIONS;

use super::error::ChapsError;

/// Default URL of the timetable combination list.
pub const DEFAULT_DISCOVERY_URL: &str = "https://ext.crws.cz/api";

/// Default base URL for connection searches (`{base}/{guid}/connections`).
pub const DEFAULT_ITINERARY_URL: &str = "https://main.crws.cz/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_MAX_COUNT: u8 = MAX_CONNECTIONS as u8;

/// Configuration for the CRWS client.
///
/// Deserializable so it can sit in a host application's config file; every
/// field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapsConfig {
    /// CRWS user ID. Public (anonymous) access when unset.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Combination list endpoint
    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,

    /// Base URL for connection searches
    #[serde(default = "default_itinerary_url")]
    pub itinerary_url: String,

    /// Timeout applied to every request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connections requested per search (`maxCount`). Only the first
    /// [`MAX_CONNECTIONS`] are mapped into a result.
    #[serde(default = "default_max_count")]
    pub max_count: u8,
}

fn default_discovery_url() -> String {
    DEFAULT_DISCOVERY_URL.to_string()
}

fn default_itinerary_url() -> String {
    DEFAULT_ITINERARY_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_max_count() -> u8 {
    DEFAULT_MAX_COUNT
}

impl Default for ChapsConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            discovery_url: default_discovery_url(),
            itinerary_url: default_itinerary_url(),
            timeout_secs: default_timeout_secs(),
            max_count: default_max_count(),
        }
    }
}

impl ChapsConfig {
    /// Create a config for anonymous access to the production API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CRWS user ID. An empty string means anonymous access.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        self.user_id = (!user_id.is_empty()).then_some(user_id);
        self
    }

    /// Set a custom combination list URL (for testing).
    pub fn with_discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_url = url.into();
        self
    }

    /// Set a custom connection search base URL (for testing).
    pub fn with_itinerary_url(mut self, url: impl Into<String>) -> Self {
        self.itinerary_url = url.into();
        self
    }

    /// Point both endpoints at the same server.
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_discovery_url(url.clone()).with_itinerary_url(url)
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set how many connections a search asks for.
    pub fn with_max_count(mut self, max_count: u8) -> Self {
        self.max_count = max_count;
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The user ID to send, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ChapsError> {
        if self.discovery_url.is_empty() {
            return Err(ChapsError::Config("discovery_url must not be empty".into()));
        }
        if self.itinerary_url.is_empty() {
            return Err(ChapsError::Config("itinerary_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ChapsError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        if self.max_count == 0 {
            return Err(ChapsError::Config("max_count must be greater than 0".into()));
        }
        Ok(())
    }
}
