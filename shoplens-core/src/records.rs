//! Source records: the immutable inputs to aggregation

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// A product in the store catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub product_title: String,
    pub sku: String,
    pub price: f64,
}

/// A single order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub product_id: i64,
    pub product_title: String,
    pub customer_id: i64,
    pub customer_email: String,
    pub customer_name: String,
    pub quantity: i64,
    pub total_price: f64,
    pub created_at: Timestamp,
}

/// A customer on the store roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_email: String,
}

/// Current stock level for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub product_id: i64,
    pub product_title: String,
    pub sku: String,
    pub quantity: i64,
}

/// Immutable snapshot of store data held for the duration of one request.
///
/// Aggregation operates over this snapshot only; no component holds state
/// across requests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub orders: Vec<Order>,
    pub inventory: Vec<InventoryLevel>,
    pub customers: Vec<Customer>,
}

// =============================================================================
// TESTS
// =============================================================================
