//! Error types for Shoplens operations

use thiserror::Error;

/// Pipeline stage errors.
///
/// `ValidationRejected` is the only user-correctable variant: it carries the
/// validator's reason and must be surfaced with a status distinct from
/// internal faults. The other variants are fatal to the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Intent classification failed: {reason}")]
    ClassificationFailed { reason: String },

    #[error("Query validation rejected: {reason}")]
    ValidationRejected { reason: String },

    #[error("Backend execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

impl PipelineError {
    /// Whether this error is user-correctable rather than an internal fault.
    pub fn is_user_error(&self) -> bool {
        matches!(self, PipelineError::ValidationRejected { .. })
    }
}

/// LLM provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No LLM provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Classification failed: {reason}")]
    ClassificationFailed { reason: String },

    #[error("Enhancement failed: {reason}")]
    EnhancementFailed { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Provider not supported: {provider}")]
    ProviderNotSupported { provider: String },
}

/// Master error type for all Shoplens errors.
#[derive(Debug, Clone, Error)]
pub enum ShoplensError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Shoplens operations.
pub type ShoplensResult<T> = Result<T, ShoplensError>;

// =============================================================================
// TESTS
// =============================================================================
