//! Configuration for dashboard operations

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default user agent sent with fundamentals requests. Yahoo rejects
/// requests without a browser-looking agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

/// Configuration for dashboard operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    /// TTL for cached market snapshots
    pub cache_ttl: Duration,

    /// Request timeout for outbound HTTP calls
    pub request_timeout: Duration,

    /// Maximum fundamentals requests per minute
    pub rate_limit_per_minute: u32,

    /// User agent for the fundamentals endpoint
    pub user_agent: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(900),      // 15 minutes
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DashConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashConfigBuilder {
        DashConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(DashError::Config(
                "cache_ttl must be greater than zero".to_string(),
            ));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(DashError::Config(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashConfig
#[derive(Debug, Default)]
pub struct DashConfigBuilder {
    cache_ttl: Option<Duration>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    user_agent: Option<String>,
}

impl DashConfigBuilder {
    /// Set the snapshot cache TTL
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the fundamentals rate limit (requests per minute)
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the user agent for the fundamentals endpoint
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashConfig> {
        let defaults = DashConfig::default();

        let config = DashConfig {
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(900));
        assert_eq!(config.rate_limit_per_minute, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DashConfig::builder()
            .cache_ttl(Duration::from_secs(60))
            .request_timeout(Duration::from_secs(10))
            .user_agent("stockdash-tests")
            .build()
            .unwrap();

        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "stockdash-tests");
    }

    #[test]
    fn test_validation_zero_ttl() {
        let config = DashConfig {
            cache_ttl: Duration::ZERO,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_rate_limit() {
        let result = DashConfig::builder().rate_limit_per_minute(0).build();
        assert!(result.is_err());
    }
}
