//! Guard Configuration
//!
//! How request bodies are buffered and interpreted before validation.

use serde::{Deserialize, Serialize};

/// Body guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Largest body buffered for validation, in bytes (default: 2 MiB)
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Treat an empty or whitespace-only body as an absent payload instead
    /// of malformed JSON (default: true)
    #[serde(default = "default_empty_body_is_absent")]
    pub empty_body_is_absent: bool,
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

fn default_empty_body_is_absent() -> bool {
    true
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            body_limit: default_body_limit(),
            empty_body_is_absent: default_empty_body_is_absent(),
        }
    }
}

impl GuardConfig {
    /// Create a new config with the specified body limit
    pub fn with_body_limit(body_limit: usize) -> Self {
        Self {
            body_limit,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.body_limit, 2 * 1024 * 1024);
        assert!(config.empty_body_is_absent);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GuardConfig = serde_json::from_str(r#"{"body_limit": 64}"#).unwrap();
        assert_eq!(config.body_limit, 64);
        assert!(config.empty_body_is_absent);
    }

    #[test]
    fn test_with_body_limit() {
        let config = GuardConfig::with_body_limit(1024);
        assert_eq!(config.body_limit, 1024);
        assert!(config.empty_body_is_absent);
    }
}
