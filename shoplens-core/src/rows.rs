//! Typed result rows, one concrete type per aggregation kind

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-product sales totals over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSalesRow {
    pub product_id: i64,
    pub product_title: String,
    pub total_sold: i64,
    pub revenue: f64,
}

/// Per-product sales velocity over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityRow {
    pub product_id: i64,
    pub product_title: String,
    pub total_sold: i64,
    pub avg_daily_sales: f64,
}

/// A product whose stock will run out within the risk horizon.
///
/// `days_remaining = current_stock / avg_daily_sales`; rows with zero
/// velocity never appear here (stockout date cannot be estimated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRow {
    pub product_id: i64,
    pub product_title: String,
    pub current_stock: i64,
    pub avg_daily_sales: f64,
    pub days_remaining: f64,
}

/// Per-customer order count and spend over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub customer_email: String,
    pub customer_name: String,
    pub order_count: i64,
    pub total_spent: f64,
}

/// Orders and revenue for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesRow {
    pub date: NaiveDate,
    pub order_count: i64,
    pub total_revenue: f64,
}

/// Current stock level row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub product_id: i64,
    pub product_title: String,
    pub sku: String,
    pub quantity: i64,
}

/// Stockout risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
}

/// Result of one backend execution, tagged by aggregation kind.
///
/// The orchestrator treats this opaquely (row counts only); the answer
/// synthesizer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSet {
    ProductSales(Vec<ProductSalesRow>),
    Velocity(Vec<VelocityRow>),
    Risks(Vec<RiskRow>),
    Customers(Vec<CustomerRow>),
    DailySales(Vec<DailySalesRow>),
    Inventory(Vec<InventoryRow>),
}

impl ResultSet {
    /// Number of rows in this result.
    pub fn len(&self) -> usize {
        match self {
            ResultSet::ProductSales(rows) => rows.len(),
            ResultSet::Velocity(rows) => rows.len(),
            ResultSet::Risks(rows) => rows.len(),
            ResultSet::Customers(rows) => rows.len(),
            ResultSet::DailySales(rows) => rows.len(),
            ResultSet::Inventory(rows) => rows.len(),
        }
    }

    /// Whether this result holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
