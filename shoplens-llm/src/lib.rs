//! SHOPLENS LLM - Collaborator Traits
//!
//! Provider-agnostic traits for the two language-model collaborators: intent
//! classification and best-effort answer enhancement. This crate defines the
//! interfaces, a registry, and deterministic mock providers; the Anthropic
//! implementation lives under [`providers`].

use async_trait::async_trait;
use shoplens_core::{
    Category, Intent, LlmError, ShoplensError, ShoplensResult, TimeWindow,
};
use std::sync::Arc;

pub mod providers;

// ============================================================================
// INTENT CLASSIFIER TRAIT
// ============================================================================

/// Trait for intent classification providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// Classification failure is fatal to a request: the pipeline aborts before
/// planning.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify a natural-language question into a structured intent.
    ///
    /// # Arguments
    /// * `question` - The raw question text
    ///
    /// # Returns
    /// * `Ok(Intent)` - The classified intent (unrecognized categories are
    ///   normalized to `General` before this returns)
    /// * `Err(ShoplensError::Llm)` - If classification fails
    async fn classify(&self, question: &str) -> ShoplensResult<Intent>;
}

// ============================================================================
// ANSWER ENHANCER TRAIT
// ============================================================================

/// Trait for answer-enhancement providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// Enhancement is best-effort: callers must treat any error as "keep the
/// draft" and never let it alter confidence or fail the pipeline.
#[async_trait]
pub trait AnswerEnhancer: Send + Sync + std::fmt::Debug {
    /// Rewrite a drafted answer into better business language without
    /// changing any figures.
    ///
    /// # Arguments
    /// * `draft` - The templated answer text
    /// * `question` - The original user question
    /// * `data_summary` - One-line description of the underlying data
    async fn enhance(
        &self,
        draft: &str,
        question: &str,
        data_summary: &str,
    ) -> ShoplensResult<String>;
}

// ============================================================================
// PROVIDER REGISTRY
// ============================================================================

/// Registry for LLM providers.
/// Providers must be explicitly registered - no auto-discovery.
pub struct ProviderRegistry {
    classifier: Option<Arc<dyn IntentClassifier>>,
    enhancer: Option<Arc<dyn AnswerEnhancer>>,
}

impl ProviderRegistry {
    /// Create a new empty provider registry.
    pub fn new() -> Self {
        Self {
            classifier: None,
            enhancer: None,
        }
    }

    /// Register an intent classifier, replacing any previous one.
    pub fn register_classifier(&mut self, provider: Box<dyn IntentClassifier>) {
        self.classifier = Some(Arc::from(provider));
    }

    /// Register an answer enhancer, replacing any previous one.
    pub fn register_enhancer(&mut self, provider: Box<dyn AnswerEnhancer>) {
        self.enhancer = Some(Arc::from(provider));
    }

    /// Get the registered classifier.
    ///
    /// # Returns
    /// * `Err(LlmError::ProviderNotConfigured)` - If none registered
    pub fn classifier(&self) -> ShoplensResult<Arc<dyn IntentClassifier>> {
        self.classifier
            .clone()
            .ok_or(ShoplensError::Llm(LlmError::ProviderNotConfigured))
    }

    /// Get the registered enhancer.
    ///
    /// # Returns
    /// * `Err(LlmError::ProviderNotConfigured)` - If none registered
    pub fn enhancer(&self) -> ShoplensResult<Arc<dyn AnswerEnhancer>> {
        self.enhancer
            .clone()
            .ok_or(ShoplensError::Llm(LlmError::ProviderNotConfigured))
    }

    /// Check if a classifier is registered.
    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Check if an enhancer is registered.
    pub fn has_enhancer(&self) -> bool {
        self.enhancer.is_some()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("classifier", &self.classifier.is_some())
            .field("enhancer", &self.enhancer.is_some())
            .finish()
    }
}

// ============================================================================
// MOCK PROVIDERS FOR TESTING
// ============================================================================

/// Mock intent classifier for testing and offline use.
/// Routes on fixed keyword tables, deterministically.
#[derive(Debug, Clone, Default)]
pub struct MockIntentClassifier;

impl MockIntentClassifier {
    pub fn new() -> Self {
        Self
    }

    fn window_from(question: &str) -> Option<TimeWindow> {
        if question.contains("yesterday") {
            Some(TimeWindow::trailing_days(1))
        } else if question.contains("next week") {
            Some(TimeWindow::next_days(7))
        } else if question.contains("next month") {
            Some(TimeWindow::next_days(30))
        } else if question.contains("last week") || question.contains("this week") {
            Some(TimeWindow::trailing_days(7))
        } else if question.contains("last month") || question.contains("this month") {
            Some(TimeWindow::trailing_days(30))
        } else {
            None
        }
    }
}

#[async_trait]
impl IntentClassifier for MockIntentClassifier {
    async fn classify(&self, question: &str) -> ShoplensResult<Intent> {
        let lower = question.to_lowercase();

        let category = if lower.contains("stock")
            || lower.contains("inventory")
            || lower.contains("reorder")
            || lower.contains("run out")
        {
            Category::Inventory
        } else if lower.contains("customer") {
            Category::Customers
        } else if lower.contains("sell") || lower.contains("sales") || lower.contains("sold") {
            Category::Sales
        } else {
            Category::General
        };

        let mut intent = Intent::new(category);

        if lower.contains("top") && (lower.contains("product") || lower.contains("sell")) {
            intent = intent.with_metric("top_products");
        }
        if lower.contains("reorder") {
            intent = intent.with_metric("reorder_quantity");
        }
        if lower.contains("run out") || lower.contains("stockout") {
            intent = intent.with_metric("stockout_prediction");
        }
        if lower.contains("repeat") || lower.contains("returning") {
            intent = intent.with_metric("repeat_customers");
        }

        if let Some(window) = Self::window_from(&lower) {
            intent = intent.with_time_period(window);
        }

        Ok(intent)
    }
}

/// Mock answer enhancer for testing.
/// Stamps a fixed prefix onto the draft so enhancement is observable.
#[derive(Debug, Clone)]
pub struct MockAnswerEnhancer {
    prefix: String,
}

impl MockAnswerEnhancer {
    pub fn new() -> Self {
        Self {
            prefix: "[enhanced] ".to_string(),
        }
    }

    /// Create a mock enhancer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for MockAnswerEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerEnhancer for MockAnswerEnhancer {
    async fn enhance(
        &self,
        draft: &str,
        _question: &str,
        _data_summary: &str,
    ) -> ShoplensResult<String> {
        Ok(format!("{}{}", self.prefix, draft))
    }
}

/// Enhancer that always fails, for exercising the fallback path.
#[derive(Debug, Clone, Default)]
pub struct FailingEnhancer;

#[async_trait]
impl AnswerEnhancer for FailingEnhancer {
    async fn enhance(
        &self,
        _draft: &str,
        _question: &str,
        _data_summary: &str,
    ) -> ShoplensResult<String> {
        Err(ShoplensError::Llm(LlmError::EnhancementFailed {
            reason: "provider unavailable".to_string(),
        }))
    }
}

/// Classifier that always fails, for exercising the abort path.
#[derive(Debug, Clone, Default)]
pub struct FailingClassifier;

#[async_trait]
impl IntentClassifier for FailingClassifier {
    async fn classify(&self, _question: &str) -> ShoplensResult<Intent> {
        Err(ShoplensError::Llm(LlmError::ClassificationFailed {
            reason: "provider unavailable".to_string(),
        }))
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
