//! Query plan types

use serde::{Deserialize, Serialize};

/// A backend data source a query can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Orders,
    Products,
    InventoryLevels,
    Customers,
}

impl DataSource {
    /// Stable snake_case name, as it appears in query text.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Orders => "orders",
            DataSource::Products => "products",
            DataSource::InventoryLevels => "inventory_levels",
            DataSource::Customers => "customers",
        }
    }
}

/// Aggregation shape a plan calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    /// Group rows and sum a measure (top products)
    SumGroup,
    /// Project a trend forward (stockout, reorder)
    Projection,
    /// Group rows and count occurrences (repeat customers)
    CountGroup,
    /// Plain row listing
    Simple,
}

/// Data-retrieval plan derived from an intent.
///
/// Recomputed per request from static lookup tables; has no independent
/// lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Data sources the query will touch, in priority order
    pub data_sources: Vec<DataSource>,
    /// Fields the query must select
    pub required_fields: Vec<String>,
    /// Aggregation shape
    pub aggregation_type: AggregationType,
}

// =============================================================================
// TESTS
// =============================================================================
