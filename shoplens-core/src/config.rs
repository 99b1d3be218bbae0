//! Configuration types

use crate::{ConfigError, ShoplensResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Answer-enhancement provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancerConfig {
    /// Provider kind, e.g. "anthropic" or "mock"
    pub provider_type: String,
    /// Model identifier for the provider
    pub model: String,
    /// Optional endpoint override
    pub endpoint: Option<String>,
}

/// Master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoplensConfig {
    /// Store identifier stamped into logs
    pub store_id: String,
    /// Seed for the synthetic backend fixture
    pub synthetic_seed: u64,
    /// Answer enhancement provider (optional; absent disables enhancement)
    pub enhancer: Option<EnhancerConfig>,
    /// Upper bound for one enhancement call
    pub enhancement_timeout: Duration,
}

impl ShoplensConfig {
    /// Build a configuration backed by the synthetic fixture with
    /// enhancement disabled.
    pub fn synthetic(store_id: impl Into<String>, seed: u64) -> Self {
        Self {
            store_id: store_id.into(),
            synthetic_seed: seed,
            enhancer: None,
            enhancement_timeout: Duration::from_secs(10),
        }
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - store_id is non-empty
    /// - enhancement_timeout is positive
    /// - enhancer, when present, names a provider and a model
    pub fn validate(&self) -> ShoplensResult<()> {
        if self.store_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "store_id".to_string(),
            }
            .into());
        }

        if self.enhancement_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "enhancement_timeout".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }

        if let Some(enhancer) = &self.enhancer {
            if enhancer.provider_type.is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: "enhancer.provider_type".to_string(),
                }
                .into());
            }
            if enhancer.model.is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: "enhancer.model".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_config_validates() {
        let config = ShoplensConfig::synthetic("demo-store.example.com", 42);
        assert!(config.validate().is_ok());
        assert!(config.enhancer.is_none());
    }

    #[test]
    fn test_empty_store_id_rejected() {
        let config = ShoplensConfig::synthetic("", 42);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::ShoplensError::Config(ConfigError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ShoplensConfig::synthetic("demo", 42);
        config.enhancement_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enhancer_requires_model() {
        let mut config = ShoplensConfig::synthetic("demo", 42);
        config.enhancer = Some(EnhancerConfig {
            provider_type: "anthropic".to_string(),
            model: String::new(),
            endpoint: None,
        });
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::ShoplensError::Config(ConfigError::MissingRequired { field }) if field == "enhancer.model"
        ));
    }
}
