//! Answer grading and the final response envelope

use crate::{Category, DataSource, Intent, Plan, RequestId, TimeWindow};
use serde::{Deserialize, Serialize};

/// Coarse qualitative indicator of how trustworthy an answer is.
///
/// Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Terminal artifact of answer synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub confidence: Confidence,
}

/// Outcome of static query validation.
///
/// `passed = false` is a recoverable, user-facing rejection carrying the
/// reason, not an internal fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    pub fn passed() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    /// A rejection with a reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Diagnostic metadata attached to every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    /// The classified intent that drove the request
    pub intent: Intent,
    /// The derived data-retrieval plan
    pub plan: Plan,
    /// Static validation outcome for the generated query
    pub validation: ValidationOutcome,
    /// Number of rows the backend returned
    pub rows_returned: usize,
    /// 1.0 if any rows were returned, else 0.0
    pub completeness: f64,
    /// Resolved time window, if any
    pub time_period: Option<TimeWindow>,
    /// Entities extracted from the question
    pub entities: Vec<String>,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
    /// Unique id for this request
    pub request_id: RequestId,
}

/// Final response envelope assembled by the pipeline orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Business-readable answer text
    pub answer: String,
    /// Confidence grade for the answer
    pub confidence: Confidence,
    /// The generated query that was executed
    pub query: String,
    /// Resolved category
    pub category: Category,
    /// Data sources the plan touched
    pub used_data_sources: Vec<DataSource>,
    /// Diagnostic metadata
    pub metadata: QueryMetadata,
}

// =============================================================================
// TESTS
// =============================================================================
