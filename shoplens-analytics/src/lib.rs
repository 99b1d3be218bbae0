//! SHOPLENS Analytics - Aggregation Engine
//!
//! Computes the analytic views behind every answer: top products, sales
//! velocity, stockout risk, repeat-customer cohorts, daily sales summaries,
//! and top customers. All operations are pure functions of an immutable
//! [`StoreSnapshot`](shoplens_core::StoreSnapshot) plus a fixed `now`
//! instant, deterministic and safe to run per-request with no shared state.

pub mod confidence;
pub mod engine;
pub mod risk;

pub use confidence::score_confidence;
pub use engine::AnalyticsEngine;
pub use risk::{
    classify_risk, estimate_reorder, ReorderEstimate, HIGH_RISK_THRESHOLD_DAYS,
    REORDER_BUFFER_DAYS, REORDER_SAFETY_FACTOR, STOCKOUT_HORIZON_DAYS,
};
