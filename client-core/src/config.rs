//! Session configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings handed to the service when a session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for the service's on-disk cache.
    pub cache_location: PathBuf,
    /// Identifier reported to the backend.
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cache_location: PathBuf::from("tmp"),
            user_agent: concat!("client-core/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl SessionConfig {
    pub fn with_cache_location(mut self, cache_location: impl Into<PathBuf>) -> Self {
        self.cache_location = cache_location.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.cache_location, PathBuf::from("tmp"));
        assert!(config.user_agent.starts_with("client-core/"));
    }

    #[test]
    fn serializes_round_trip() {
        let config = SessionConfig::default()
            .with_cache_location("/var/cache/media")
            .with_user_agent("example-player");
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cache_location, PathBuf::from("/var/cache/media"));
        assert_eq!(back.user_agent, "example-player");
    }
}
