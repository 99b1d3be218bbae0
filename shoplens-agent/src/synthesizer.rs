//! Answer synthesis: typed results to business-readable text

use shoplens_analytics::{classify_risk, estimate_reorder, score_confidence};
use shoplens_core::{
    AnswerResult, Category, Confidence, CustomerRow, DailySalesRow, Intent, ProductSalesRow,
    ResultSet, RiskRow, RiskTier, VelocityRow,
};
use shoplens_llm::AnswerEnhancer;
use std::sync::Arc;

/// Outcome of the best-effort enhancement call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enhancement {
    /// The enhancer produced replacement text
    Enhanced(String),
    /// The draft stands; the reason is logged, never surfaced
    Skipped(String),
}

/// Renders aggregation results into natural-language answers per category.
///
/// The optional enhancement call is the only I/O here; its failure never
/// alters the confidence grade or fails the pipeline.
pub struct AnswerSynthesizer {
    enhancer: Option<Arc<dyn AnswerEnhancer>>,
}

impl AnswerSynthesizer {
    /// Synthesizer without enhancement: templated answers are final.
    pub fn new() -> Self {
        Self { enhancer: None }
    }

    /// Synthesizer that asks `enhancer` to polish each drafted answer.
    pub fn with_enhancer(enhancer: Arc<dyn AnswerEnhancer>) -> Self {
        Self {
            enhancer: Some(enhancer),
        }
    }

    /// Render results into a graded answer, then apply best-effort
    /// enhancement.
    pub async fn synthesize(
        &self,
        question: &str,
        intent: &Intent,
        results: &ResultSet,
    ) -> AnswerResult {
        let mut result = draft_answer(intent, results);

        let summary = format!(
            "{} rows, category: {}, metrics: [{}]",
            results.len(),
            intent.category.as_str(),
            intent.metrics.join(", ")
        );
        let enhancement = self
            .request_enhancement(&result.answer, question, &summary)
            .await;
        match enhancement {
            Enhancement::Enhanced(text) => {
                tracing::info!("answer enhanced");
                result.answer = text;
            }
            Enhancement::Skipped(reason) => {
                tracing::debug!(reason = %reason, "enhancement skipped");
            }
        }

        result
    }

    async fn request_enhancement(
        &self,
        draft: &str,
        question: &str,
        data_summary: &str,
    ) -> Enhancement {
        let Some(enhancer) = &self.enhancer else {
            return Enhancement::Skipped("no enhancer configured".to_string());
        };
        match enhancer.enhance(draft, question, data_summary).await {
            Ok(text) => Enhancement::Enhanced(text),
            Err(e) => Enhancement::Skipped(e.to_string()),
        }
    }
}

impl Default for AnswerSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnswerSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerSynthesizer")
            .field("enhancer", &self.enhancer.is_some())
            .finish()
    }
}

// ============================================================================
// CATEGORY DISPATCH
// ============================================================================

/// Render the templated answer for an intent and its results.
fn draft_answer(intent: &Intent, results: &ResultSet) -> AnswerResult {
    // Stockout is the one path where an empty list is itself the answer:
    // no products at risk is good news, not missing data.
    let stockout = intent.category == Category::Inventory
        && intent.has_metric("stockout_prediction")
        && matches!(results, ResultSet::Risks(_));
    if results.is_empty() && !stockout {
        return no_data_answer(intent.category);
    }

    match intent.category {
        Category::Sales => sales_answer(intent, results),
        Category::Inventory => inventory_answer(intent, results),
        Category::Customers => customer_answer(intent, results),
        Category::General => general_answer(results),
    }
}

/// Category-specific "no data" message, Low confidence.
fn no_data_answer(category: Category) -> AnswerResult {
    let answer = match category {
        Category::Sales => {
            "No sales data found for the specified period. \
             This could mean no orders were placed during this time."
        }
        Category::Inventory => "No inventory data found for the specified products.",
        Category::Customers => "No customer data found for the specified period.",
        Category::General => "No data found for your query.",
    };
    AnswerResult {
        answer: answer.to_string(),
        confidence: Confidence::Low,
    }
}

fn sales_answer(intent: &Intent, results: &ResultSet) -> AnswerResult {
    match results {
        ResultSet::ProductSales(rows) if intent.has_metric("top_products") => {
            top_products_answer(intent, rows)
        }
        ResultSet::DailySales(rows) => sales_summary_answer(intent, rows),
        _ => general_answer(results),
    }
}

/// Numbered list of up to 5 products with units sold and a total-revenue
/// line when any row carries revenue.
fn top_products_answer(intent: &Intent, rows: &[ProductSalesRow]) -> AnswerResult {
    let shown = rows.len().min(5);
    let period = intent
        .time_period
        .map_or_else(|| "recently".to_string(), |w| w.phrase());

    let mut lines = vec![format!(
        "Your top {} selling products {} were:\n",
        shown, period
    )];

    let mut total_revenue = 0.0;
    for (i, row) in rows.iter().take(5).enumerate() {
        lines.push(format!(
            "{}. {} - {} units sold",
            i + 1,
            row.product_title,
            row.total_sold
        ));
        total_revenue += row.revenue;
    }

    if total_revenue > 0.0 {
        lines.push(format!(
            "\nTotal revenue from these products: {}",
            format_usd(total_revenue)
        ));
    }

    let window_days = intent.time_period.map_or(7, |w| w.days());
    AnswerResult {
        answer: lines.join("\n"),
        confidence: score_confidence(rows.len(), window_days),
    }
}

/// Aggregate order count, revenue, and average order value.
fn sales_summary_answer(intent: &Intent, rows: &[DailySalesRow]) -> AnswerResult {
    let total_orders: i64 = rows.iter().map(|r| r.order_count).sum();
    let total_revenue: f64 = rows.iter().map(|r| r.total_revenue).sum();
    let period = intent
        .time_period
        .map_or_else(|| "recently".to_string(), |w| w.phrase());

    let mut answer = format!("Sales summary {}:\n\n", period);
    answer.push_str(&format!("- Total orders: {}\n", total_orders));
    answer.push_str(&format!("- Total revenue: {}", format_usd(total_revenue)));
    if total_orders > 0 {
        answer.push_str(&format!(
            "\n- Average order value: {}",
            format_usd(total_revenue / total_orders as f64)
        ));
    }

    AnswerResult {
        answer,
        confidence: if total_orders > 10 {
            Confidence::High
        } else {
            Confidence::Medium
        },
    }
}

fn inventory_answer(intent: &Intent, results: &ResultSet) -> AnswerResult {
    match results {
        ResultSet::Velocity(rows) if intent.has_metric("reorder_quantity") => {
            reorder_answer(intent, rows)
        }
        ResultSet::Risks(rows) if intent.has_metric("stockout_prediction") => {
            stockout_answer(rows)
        }
        ResultSet::Inventory(rows) => AnswerResult {
            answer: format!(
                "Found {} products in inventory. Current stock levels are available in the data.",
                rows.len()
            ),
            confidence: Confidence::High,
        },
        _ => general_answer(results),
    }
}

/// Single-product reorder narrative from the projection estimator.
fn reorder_answer(intent: &Intent, rows: &[VelocityRow]) -> AnswerResult {
    let Some(item) = rows.first() else {
        return no_data_answer(Category::Inventory);
    };
    let product_name = intent
        .entities
        .first()
        .cloned()
        .unwrap_or_else(|| item.product_title.clone());

    let days = intent.time_period.map_or(30, |w| w.days());
    let estimate = estimate_reorder(item.total_sold, days);

    let answer = format!(
        "Based on the last {} days, {} sold an average of {:.1} units per day \
         (total: {} units).\n\n\
         Recommendation: Order at least {} units to maintain a 2-week buffer. \
         This accounts for your typical daily sales velocity and includes a 20% safety margin.",
        days, product_name, estimate.daily_rate, item.total_sold, estimate.recommended_quantity
    );

    AnswerResult {
        answer,
        confidence: estimate.confidence,
    }
}

/// Tiered stockout listing with an expedite recommendation.
///
/// Rows beyond the risk horizon are re-checked and dropped here so that
/// unfiltered backends still produce a correct answer; an empty at-risk
/// partition is reassuring, High-confidence news.
fn stockout_answer(rows: &[RiskRow]) -> AnswerResult {
    let mut high: Vec<&RiskRow> = Vec::new();
    let mut medium: Vec<&RiskRow> = Vec::new();
    for row in rows {
        match classify_risk(row.days_remaining) {
            Some(RiskTier::High) => high.push(row),
            Some(RiskTier::Medium) => medium.push(row),
            None => {}
        }
    }

    if high.is_empty() && medium.is_empty() {
        return AnswerResult {
            answer: "Good news! Based on recent sales velocity, none of your products \
                     are at risk of stockout in the next 7 days."
                .to_string(),
            confidence: Confidence::High,
        };
    }

    let at_risk_count = high.len() + medium.len();
    let plural = if at_risk_count == 1 { "is" } else { "are" };
    let noun = if at_risk_count == 1 {
        "product"
    } else {
        "products"
    };
    let mut answer = format!(
        "Based on recent sales velocity, {} {} {} at risk of stockout within 7 days:\n\n",
        at_risk_count, noun, plural
    );

    for (label, tier) in [("HIGH RISK:", &high), ("MEDIUM RISK:", &medium)] {
        if tier.is_empty() {
            continue;
        }
        answer.push_str(label);
        answer.push('\n');
        for row in tier {
            answer.push_str(&format!(
                "- {} - Current stock: {} units, Daily sales: {:.1} units \
                 (runs out in ~{:.0} days)\n",
                row.product_title, row.current_stock, row.avg_daily_sales, row.days_remaining
            ));
        }
        answer.push('\n');
    }

    // Most urgent first within each tier: rows arrive sorted ascending.
    let expedite = high.first().or_else(|| medium.first());
    if let Some(row) = expedite {
        answer.push_str(&format!(
            "Recommendation: Prioritize reordering {} immediately.",
            row.product_title
        ));
    }

    AnswerResult {
        answer,
        confidence: Confidence::Medium,
    }
}

fn customer_answer(intent: &Intent, results: &ResultSet) -> AnswerResult {
    match results {
        ResultSet::Customers(rows) if intent.has_metric("repeat_customers") => {
            repeat_customers_answer(intent, rows)
        }
        ResultSet::Customers(rows) => top_customers_answer(rows),
        _ => general_answer(results),
    }
}

/// Repeat-customer cohort with the total count up front.
fn repeat_customers_answer(intent: &Intent, rows: &[CustomerRow]) -> AnswerResult {
    let period = intent
        .time_period
        .map_or_else(|| "recently".to_string(), |w| w.phrase());
    let total = rows.len();
    let noun = if total == 1 { "customer" } else { "customers" };

    let mut answer = format!("You had {} repeat {} {}:\n\n", total, noun, period);
    answer.push_str("Top Repeat Customers:\n");

    for (i, row) in rows.iter().take(5).enumerate() {
        answer.push_str(&format!(
            "{}. {} ({}) - {} orders, {} total\n",
            i + 1,
            row.customer_name,
            row.customer_email,
            row.order_count,
            format_usd_whole(row.total_spent)
        ));
    }

    answer.push_str(&format!(
        "\nThese {} customers represent a significant portion of your revenue. \
         Consider implementing a loyalty program to retain them!",
        total
    ));

    AnswerResult {
        answer,
        confidence: Confidence::High,
    }
}

/// Up to 10 customers by spend.
fn top_customers_answer(rows: &[CustomerRow]) -> AnswerResult {
    let shown = rows.len().min(10);
    let mut answer = format!("Top {} customers by total spending:\n\n", shown);

    for (i, row) in rows.iter().take(10).enumerate() {
        answer.push_str(&format!(
            "{}. {} - {} orders, {}\n",
            i + 1,
            row.customer_email,
            row.order_count,
            format_usd_whole(row.total_spent)
        ));
    }

    AnswerResult {
        answer,
        confidence: Confidence::High,
    }
}

/// Fallback listing for whatever rows came back, Medium confidence.
fn general_answer(results: &ResultSet) -> AnswerResult {
    let mut answer = format!(
        "Found {} results for your query. Here's a summary of the top items:\n\n",
        results.len()
    );

    match results {
        ResultSet::ProductSales(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {} units - {}\n",
                    i + 1,
                    row.product_title,
                    row.total_sold,
                    format_usd(row.revenue)
                ));
            }
        }
        ResultSet::Velocity(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {} units\n",
                    i + 1,
                    row.product_title,
                    row.total_sold
                ));
            }
        }
        ResultSet::Risks(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {} units in stock\n",
                    i + 1,
                    row.product_title,
                    row.current_stock
                ));
            }
        }
        ResultSet::Customers(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {}\n",
                    i + 1,
                    row.customer_email,
                    format_usd(row.total_spent)
                ));
            }
        }
        ResultSet::DailySales(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {} orders - {}\n",
                    i + 1,
                    row.date,
                    row.order_count,
                    format_usd(row.total_revenue)
                ));
            }
        }
        ResultSet::Inventory(rows) => {
            for (i, row) in rows.iter().take(5).enumerate() {
                answer.push_str(&format!(
                    "{}. {} - {} units in stock\n",
                    i + 1,
                    row.product_title,
                    row.quantity
                ));
            }
        }
    }

    AnswerResult {
        answer,
        confidence: Confidence::Medium,
    }
}

// ============================================================================
// FORMATTING HELPERS
// ============================================================================

/// Dollar amount with cents and thousands separators, e.g. `$1,234.56`.
fn format_usd(amount: f64) -> String {
    let total_cents = (amount * 100.0).round() as i64;
    format!(
        "${}.{:02}",
        group_thousands(total_cents / 100),
        (total_cents % 100).abs()
    )
}

/// Dollar amount rounded to whole dollars, e.g. `$1,235`.
fn format_usd_whole(amount: f64) -> String {
    format!("${}", group_thousands(amount.round() as i64))
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// =============================================================================
// TESTS
// =============================================================================
