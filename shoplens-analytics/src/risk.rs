//! Stockout risk tiers and reorder estimation

use serde::{Deserialize, Serialize};
use shoplens_core::{Confidence, RiskTier};

/// Products stocking out within this many days are considered at risk.
pub const STOCKOUT_HORIZON_DAYS: f64 = 7.0;
/// At-risk products stocking out within this many days are high risk.
pub const HIGH_RISK_THRESHOLD_DAYS: f64 = 5.0;
/// Reorder recommendations cover this many days of demand.
pub const REORDER_BUFFER_DAYS: f64 = 14.0;
/// Safety margin applied on top of projected demand.
pub const REORDER_SAFETY_FACTOR: f64 = 1.2;

/// Bucket a days-remaining projection into a risk tier.
///
/// Returns `None` for projections beyond the stockout horizon; the
/// aggregation engine excludes those upstream, so only High/Medium entries
/// normally reach this point.
pub fn classify_risk(days_remaining: f64) -> Option<RiskTier> {
    if days_remaining <= HIGH_RISK_THRESHOLD_DAYS {
        Some(RiskTier::High)
    } else if days_remaining <= STOCKOUT_HORIZON_DAYS {
        Some(RiskTier::Medium)
    } else {
        None
    }
}

/// A reorder recommendation projected from historical sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderEstimate {
    /// Units to order to cover the buffer period with the safety margin
    pub recommended_quantity: i64,
    /// Observed average units sold per day
    pub daily_rate: f64,
    /// How trustworthy the projection is, based on the observation window
    pub confidence: Confidence,
}

/// Project a recommended reorder quantity from units sold over a window.
///
/// `daily_rate` is zero for non-positive windows. The recommendation is
/// `floor(daily_rate * REORDER_BUFFER_DAYS * REORDER_SAFETY_FACTOR)`.
/// Estimates over windows of 30 days or more are High confidence, shorter
/// windows Medium.
pub fn estimate_reorder(total_sold: i64, window_days: i64) -> ReorderEstimate {
    let daily_rate = if window_days > 0 {
        total_sold as f64 / window_days as f64
    } else {
        0.0
    };
    let recommended_quantity = (daily_rate * REORDER_BUFFER_DAYS * REORDER_SAFETY_FACTOR) as i64;
    let confidence = if window_days >= 30 {
        Confidence::High
    } else {
        Confidence::Medium
    };

    ReorderEstimate {
        recommended_quantity,
        daily_rate,
        confidence,
    }
}

// =============================================================================
// TESTS
// =============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
