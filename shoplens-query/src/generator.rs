//! StoreQL text generation

use shoplens_core::{AggregationType, Intent, Plan};

/// Render an intent and its plan into StoreQL text.
///
/// Pure function of its inputs: the same intent and plan always produce the
/// same query string.
pub fn generate_query(intent: &Intent, plan: &Plan) -> String {
    let source = plan
        .data_sources
        .first()
        .map_or("orders", |s| s.as_str());

    let mut query = format!("FROM {} SHOW {}", source, plan.required_fields.join(", "));

    if !intent.entities.is_empty() {
        let clauses: Vec<String> = intent
            .entities
            .iter()
            .map(|entity| format!("product_title CONTAINS '{}'", escape_entity(entity)))
            .collect();
        query.push_str(&format!(" WHERE {}", clauses.join(" OR ")));
    }

    match plan.aggregation_type {
        AggregationType::SumGroup => {
            query.push_str(" GROUP BY product_id ORDER BY total_sold DESC LIMIT 5");
        }
        AggregationType::Projection => {
            query.push_str(" GROUP BY product_id");
        }
        AggregationType::CountGroup => {
            query.push_str(" GROUP BY customer_id ORDER BY order_count DESC");
        }
        AggregationType::Simple => {}
    }

    if let Some(window) = intent.time_period {
        if window.future {
            query.push_str(&format!(" UNTIL +{}d", window.days()));
        } else {
            query.push_str(&format!(" SINCE -{}d", window.days()));
        }
    }

    query
}

/// Strip quote characters from an entity so it cannot break the quoted
/// literal it lands in.
fn escape_entity(entity: &str) -> String {
    entity.replace('\'', "")
}

// =============================================================================
// TESTS
// =============================================================================
