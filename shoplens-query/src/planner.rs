//! Intent-to-plan derivation via static lookup tables

use shoplens_core::{AggregationType, Category, DataSource, Intent, Plan};

/// Derive the data-retrieval plan for an intent.
///
/// Pure static lookup: no plan has an independent lifecycle, it is
/// recomputed per request.
pub fn plan_for(intent: &Intent) -> Plan {
    Plan {
        data_sources: data_sources_for(intent.category),
        required_fields: required_fields_for(intent.category),
        aggregation_type: aggregation_for(&intent.metrics),
    }
}

/// Data sources a category needs, in priority order.
fn data_sources_for(category: Category) -> Vec<DataSource> {
    match category {
        Category::Sales => vec![DataSource::Orders, DataSource::Products],
        Category::Inventory => vec![
            DataSource::InventoryLevels,
            DataSource::Products,
            DataSource::Orders,
        ],
        Category::Customers => vec![DataSource::Customers, DataSource::Orders],
        Category::General => vec![DataSource::Orders, DataSource::Products],
    }
}

/// Fields a category's queries must select.
fn required_fields_for(category: Category) -> Vec<String> {
    let fields: &[&str] = match category {
        Category::Sales => &[
            "product_id",
            "product_title",
            "quantity",
            "total_price",
            "created_at",
        ],
        Category::Inventory => &["product_id", "product_title", "quantity", "sku"],
        Category::Customers => &[
            "customer_id",
            "customer_email",
            "customer_name",
            "total_price",
        ],
        Category::General => &["product_id", "quantity", "created_at"],
    };
    fields.iter().map(|f| f.to_string()).collect()
}

/// Aggregation shape from metric tags.
fn aggregation_for(metrics: &[String]) -> AggregationType {
    let has = |tag: &str| metrics.iter().any(|m| m == tag);

    if has("top_products") || has("top_sellers") {
        AggregationType::SumGroup
    } else if has("stockout_prediction") || has("reorder_quantity") {
        AggregationType::Projection
    } else if has("repeat_customers") {
        AggregationType::CountGroup
    } else {
        AggregationType::Simple
    }
}

// =============================================================================
// TESTS
// =============================================================================
