//! Generic confidence scoring for aggregate results

use shoplens_core::Confidence;

/// Grade an aggregate result by data volume and window length.
///
/// High needs at least 5 rows over at least 30 days; Medium at least 3 rows
/// over at least 7 days; anything sparser is Low. Category-specific answer
/// paths may override this with their own fixed grade when these inputs do
/// not fit the semantics.
pub fn score_confidence(row_count: usize, window_days: i64) -> Confidence {
    if row_count >= 5 && window_days >= 30 {
        Confidence::High
    } else if row_count >= 3 && window_days >= 7 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

// =============================================================================
// TESTS
// =============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
