//! SHOPLENS Agent - Pipeline Orchestration
//!
//! Sequences the five-step answering workflow and renders analytic results
//! into graded natural-language answers:
//!
//! 1. Classify intent
//! 2. Plan data sources
//! 3. Generate StoreQL
//! 4. Validate and execute
//! 5. Synthesize answer
//!
//! Each request runs in its own pipeline invocation over immutable data;
//! there is no shared mutable state across concurrent requests.

pub mod synthesizer;
pub mod workflow;

pub use synthesizer::{AnswerSynthesizer, Enhancement};
pub use workflow::Pipeline;
