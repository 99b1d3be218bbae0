//! Pipeline orchestration: classify, plan, generate, validate/execute, format

use crate::synthesizer::AnswerSynthesizer;
use shoplens_core::{
    new_request_id, PipelineError, QueryMetadata, QueryResponse, ShoplensError, ShoplensResult,
};
use shoplens_llm::{AnswerEnhancer, IntentClassifier, ProviderRegistry};
use shoplens_query::{generate_query, plan_for, validate_query};
use shoplens_store::StoreBackend;
use std::sync::Arc;
use std::time::Instant;

/// One question-answering pipeline.
///
/// Stages run strictly forward: intent, plan, query text, validated query,
/// result rows, synthesized answer, response envelope. Collaborators are
/// shared immutable trait objects; each `execute` call holds its own data
/// and no state survives the request. Failures propagate without retries -
/// resilience belongs to the I/O collaborators, not this core.
pub struct Pipeline {
    classifier: Arc<dyn IntentClassifier>,
    backend: Arc<dyn StoreBackend>,
    synthesizer: AnswerSynthesizer,
}

impl Pipeline {
    /// Build a pipeline with enhancement disabled.
    pub fn new(classifier: Arc<dyn IntentClassifier>, backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            classifier,
            backend,
            synthesizer: AnswerSynthesizer::new(),
        }
    }

    /// Enable best-effort answer enhancement.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn AnswerEnhancer>) -> Self {
        self.synthesizer = AnswerSynthesizer::with_enhancer(enhancer);
        self
    }

    /// Build a pipeline from a provider registry.
    ///
    /// The classifier is required; the enhancer is optional and enables
    /// enhancement only when registered.
    pub fn from_registry(
        registry: &ProviderRegistry,
        backend: Arc<dyn StoreBackend>,
    ) -> ShoplensResult<Self> {
        let pipeline = Self::new(registry.classifier()?, backend);
        match registry.enhancer() {
            Ok(enhancer) => Ok(pipeline.with_enhancer(enhancer)),
            Err(_) => Ok(pipeline),
        }
    }

    /// Answer a natural-language question.
    ///
    /// # Returns
    /// * `Ok(QueryResponse)` - Answer, confidence, query text, and metadata
    /// * `Err(PipelineError::ClassificationFailed)` - Classifier error (internal)
    /// * `Err(PipelineError::ValidationRejected)` - Query rejected (user-facing)
    /// * `Err(PipelineError::ExecutionFailed)` - Backend error (internal)
    pub async fn execute(&self, question: &str) -> ShoplensResult<QueryResponse> {
        let started = Instant::now();
        let request_id = new_request_id();

        tracing::info!(%request_id, "step 1: classifying intent");
        let intent = self.classifier.classify(question).await.map_err(|e| {
            PipelineError::ClassificationFailed {
                reason: e.to_string(),
            }
        })?;
        tracing::info!(category = intent.category.as_str(), "intent classified");

        tracing::info!("step 2: planning data sources");
        let plan = plan_for(&intent);
        tracing::info!(sources = ?plan.data_sources, "data sources planned");

        tracing::info!("step 3: generating query");
        let query = generate_query(&intent, &plan);
        tracing::debug!(query = %query, "query generated");

        tracing::info!("step 4: validating and executing query");
        let validation = validate_query(&query);
        if !validation.passed {
            let reason = validation
                .reason
                .clone()
                .unwrap_or_else(|| "unspecified".to_string());
            return Err(PipelineError::ValidationRejected { reason }.into());
        }

        let results = self
            .backend
            .execute(&query, &intent)
            .await
            .map_err(|e| match e {
                ShoplensError::Pipeline(inner) => ShoplensError::Pipeline(inner),
                other => PipelineError::ExecutionFailed {
                    reason: other.to_string(),
                }
                .into(),
            })?;
        tracing::info!(rows = results.len(), "query executed");

        tracing::info!("step 5: synthesizing answer");
        let answer = self
            .synthesizer
            .synthesize(question, &intent, &results)
            .await;

        let processing_time_ms = started.elapsed().as_millis() as u64;
        let completeness = if results.is_empty() { 0.0 } else { 1.0 };
        tracing::info!(processing_time_ms, "workflow completed");

        Ok(QueryResponse {
            answer: answer.answer,
            confidence: answer.confidence,
            query,
            category: intent.category,
            used_data_sources: plan.data_sources.clone(),
            metadata: QueryMetadata {
                time_period: intent.time_period,
                entities: intent.entities.clone(),
                rows_returned: results.len(),
                completeness,
                validation,
                plan,
                intent,
                processing_time_ms,
                request_id,
            },
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("synthesizer", &self.synthesizer)
            .finish()
    }
}
