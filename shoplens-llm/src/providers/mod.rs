//! LLM provider implementations

pub mod anthropic;

use crate::{AnswerEnhancer, MockAnswerEnhancer};
use anthropic::AnthropicEnhancer;
use shoplens_core::{ConfigError, EnhancerConfig, ShoplensResult};
use std::sync::Arc;

/// Build an answer enhancer from configuration.
///
/// # Arguments
/// * `config` - Provider configuration ("anthropic" or "mock")
/// * `api_key` - API key for remote providers (ignored by "mock")
///
/// # Returns
/// * `Err(ConfigError::ProviderNotSupported)` - For unknown provider types
pub fn enhancer_from_config(
    config: &EnhancerConfig,
    api_key: &str,
) -> ShoplensResult<Arc<dyn AnswerEnhancer>> {
    match config.provider_type.as_str() {
        "anthropic" => {
            let mut enhancer = AnthropicEnhancer::new(api_key, &config.model);
            if let Some(endpoint) = &config.endpoint {
                enhancer = enhancer.with_base_url(endpoint);
            }
            Ok(Arc::new(enhancer))
        }
        "mock" => Ok(Arc::new(MockAnswerEnhancer::new())),
        other => Err(ConfigError::ProviderNotSupported {
            provider: other.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancer_from_config_mock() {
        let config = EnhancerConfig {
            provider_type: "mock".to_string(),
            model: "none".to_string(),
            endpoint: None,
        };
        assert!(enhancer_from_config(&config, "").is_ok());
    }

    #[test]
    fn test_enhancer_from_config_anthropic() {
        let config = EnhancerConfig {
            provider_type: "anthropic".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            endpoint: None,
        };
        assert!(enhancer_from_config(&config, "test-key").is_ok());
    }

    #[test]
    fn test_enhancer_from_config_unknown_rejected() {
        let config = EnhancerConfig {
            provider_type: "mystery".to_string(),
            model: "m".to_string(),
            endpoint: None,
        };
        let err = enhancer_from_config(&config, "").unwrap_err();
        assert!(matches!(
            err,
            shoplens_core::ShoplensError::Config(ConfigError::ProviderNotSupported { .. })
        ));
    }
}
