//! Static query validation

use once_cell::sync::Lazy;
use regex::Regex;
use shoplens_core::ValidationOutcome;

/// Data sources queries may read from.
const KNOWN_SOURCES: &[&str] = &["orders", "products", "inventory_levels", "customers"];

static FROM_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^FROM\s+([a-z_]+)\b").expect("valid regex"));

static MUTATING_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(DELETE|DROP|INSERT|UPDATE|ALTER|CREATE|TRUNCATE)\b").expect("valid regex")
});

/// Statically validate StoreQL text before execution.
///
/// Checks are purely syntactic: a rejection carries a reason and is a
/// user-correctable outcome, never an internal fault. No grammar is parsed
/// here.
pub fn validate_query(query: &str) -> ValidationOutcome {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return ValidationOutcome::rejected("query is empty");
    }

    let Some(captures) = FROM_CLAUSE.captures(trimmed) else {
        return ValidationOutcome::rejected("query must start with a FROM clause");
    };

    let source = &captures[1];
    if !KNOWN_SOURCES.contains(&source) {
        return ValidationOutcome::rejected(format!("unknown data source: {}", source));
    }

    if !trimmed.contains(" SHOW ") {
        return ValidationOutcome::rejected("query must have a SHOW clause");
    }

    if trimmed.matches('\'').count() % 2 != 0 {
        return ValidationOutcome::rejected("unbalanced quotes in query");
    }

    if let Some(found) = MUTATING_KEYWORD.find(trimmed) {
        return ValidationOutcome::rejected(format!(
            "mutating keyword not allowed: {}",
            found.as_str()
        ));
    }

    ValidationOutcome::passed()
}

// =============================================================================
// TESTS
// =============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
