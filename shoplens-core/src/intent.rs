//! Classified intent and time window types

use crate::Timestamp;
use chrono::Duration;
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// Business category of a classified question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sales,
    Inventory,
    Customers,
    General,
}

impl Category {
    /// Parse a category tag. Unrecognized input normalizes to `General`,
    /// upholding the upstream classifier contract.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "sales" => Category::Sales,
            "inventory" => Category::Inventory,
            "customers" => Category::Customers,
            _ => Category::General,
        }
    }

    /// Stable lowercase tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sales => "sales",
            Category::Inventory => "inventory",
            Category::Customers => "customers",
            Category::General => "general",
        }
    }
}

// ============================================================================
// TIME WINDOW
// ============================================================================

/// Unit of a relative time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    /// Day count of one unit. Months resolve to 30 days by convention.
    pub fn day_factor(&self) -> i64 {
        match self {
            TimeUnit::Days => 1,
            TimeUnit::Weeks => 7,
            TimeUnit::Months => 30,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
        }
    }
}

/// A relative date range: either a trailing window ("last N days") or a
/// projected future window ("next N days").
///
/// `value` is never negative; a zero-value window means "no filtering" by
/// convention at the call sites that receive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub value: u32,
    pub unit: TimeUnit,
    pub future: bool,
}

impl TimeWindow {
    /// A trailing window of `value` days.
    pub fn trailing_days(value: u32) -> Self {
        Self {
            value,
            unit: TimeUnit::Days,
            future: false,
        }
    }

    /// A future window of `value` days.
    pub fn next_days(value: u32) -> Self {
        Self {
            value,
            unit: TimeUnit::Days,
            future: true,
        }
    }

    /// Resolve the window length to a day count.
    pub fn days(&self) -> i64 {
        self.value as i64 * self.unit.day_factor()
    }

    /// Concrete cutoff instant for a trailing window: `now - days()`.
    pub fn cutoff_from(&self, now: Timestamp) -> Timestamp {
        now - Duration::days(self.days())
    }

    /// Human-readable phrase for this window, e.g. "last week" or
    /// "in the next 14 days".
    pub fn phrase(&self) -> String {
        let days = self.days();
        if self.future {
            match days {
                7 => "next week".to_string(),
                30 => "next month".to_string(),
                _ => format!("in the next {} {}", self.value, self.unit.noun()),
            }
        } else {
            match days {
                1 => "yesterday".to_string(),
                7 => "last week".to_string(),
                30 => "last month".to_string(),
                _ => format!("in the last {} {}", self.value, self.unit.noun()),
            }
        }
    }
}

// ============================================================================
// INTENT
// ============================================================================

/// Structured classification of a natural-language question.
///
/// Produced by the external intent classifier; immutable once created and
/// consumed by every downstream pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Business category the question falls into
    pub category: Category,
    /// Metric tags extracted from the question (e.g. "top_products")
    pub metrics: Vec<String>,
    /// Relative date range, if one was mentioned
    pub time_period: Option<TimeWindow>,
    /// Entity names mentioned in the question (e.g. product names)
    pub entities: Vec<String>,
}

impl Intent {
    /// Create an intent with just a category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            metrics: Vec::new(),
            time_period: None,
            entities: Vec::new(),
        }
    }

    /// Add a metric tag.
    pub fn with_metric(mut self, metric: &str) -> Self {
        self.metrics.push(metric.to_string());
        self
    }

    /// Set the time window.
    pub fn with_time_period(mut self, window: TimeWindow) -> Self {
        self.time_period = Some(window);
        self
    }

    /// Add an entity name.
    pub fn with_entity(mut self, entity: &str) -> Self {
        self.entities.push(entity.to_string());
        self
    }

    /// Check whether a metric tag is present.
    pub fn has_metric(&self, metric: &str) -> bool {
        self.metrics.iter().any(|m| m == metric)
    }
}

// =============================================================================
// TESTS
// =============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
