//! Cache Configuration

use std::time::Duration;

/// Default time-to-live applied to entries stored without an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL used by `put` calls that carry no explicit TTL (default: 60 seconds)
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default TTL
    ///
    /// The value is stored as given; a cache built from a config carrying a
    /// zero duration substitutes [`DEFAULT_TTL`].
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl, Duration::from_millis(60_000));
    }

    #[test]
    fn test_custom_default_ttl() {
        let config = CacheConfig::new().with_default_ttl(Duration::from_millis(500));
        assert_eq!(config.default_ttl, Duration::from_millis(500));
    }
}
