//! Windowed aggregation over a store snapshot

use crate::risk::STOCKOUT_HORIZON_DAYS;
use chrono::NaiveDate;
use shoplens_core::{
    CustomerRow, DailySalesRow, InventoryRow, Order, ProductSalesRow, RiskRow, StoreSnapshot,
    TimeWindow, Timestamp, VelocityRow,
};
use std::collections::{BTreeMap, HashMap};

/// Default trailing window for top-product rankings, in days.
pub const DEFAULT_TOP_PRODUCTS_DAYS: i64 = 7;
/// Default trailing window for velocity calculations, in days.
pub const DEFAULT_VELOCITY_DAYS: i64 = 30;
/// Fixed trailing window used for stockout-risk velocity, in days.
/// Internal parameter, not caller-configurable.
pub const RISK_VELOCITY_DAYS: i64 = 7;
/// Default trailing window for repeat-customer cohorts, in days.
pub const DEFAULT_REPEAT_CUSTOMERS_DAYS: i64 = 90;
/// Default trailing window for daily sales summaries, in days.
pub const DEFAULT_SALES_SUMMARY_DAYS: i64 = 7;
/// Default trailing window for top-customer rankings, in days.
pub const DEFAULT_TOP_CUSTOMERS_DAYS: i64 = 30;
/// Maximum rows in a top-products ranking.
pub const TOP_PRODUCTS_LIMIT: usize = 5;
/// Maximum rows in a top-customers ranking.
pub const TOP_CUSTOMERS_LIMIT: usize = 10;

/// Aggregation engine over one immutable snapshot and a fixed `now`.
///
/// Every operation is deterministic given the snapshot and `now`. Empty
/// inputs and non-matching filters yield empty vectors, never errors.
#[derive(Debug)]
pub struct AnalyticsEngine<'a> {
    snapshot: &'a StoreSnapshot,
    now: Timestamp,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(snapshot: &'a StoreSnapshot, now: Timestamp) -> Self {
        Self { snapshot, now }
    }

    /// Top products by units sold over the window (default 7 days),
    /// truncated to 5. Ties keep stable first-seen order.
    pub fn top_products(
        &self,
        window: Option<TimeWindow>,
        entities: &[String],
    ) -> Vec<ProductSalesRow> {
        let days = window.map_or(DEFAULT_TOP_PRODUCTS_DAYS, |w| w.days());
        let mut rows = self.group_product_sales(days, entities);
        rows.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
        rows.truncate(TOP_PRODUCTS_LIMIT);
        rows
    }

    /// Per-product sales velocity over the window (default 30 days).
    ///
    /// A zero-day window yields `avg_daily_sales = 0` for every product;
    /// velocity is undefined there, never a divide-by-zero.
    pub fn sales_velocity(
        &self,
        window: Option<TimeWindow>,
        entities: &[String],
    ) -> Vec<VelocityRow> {
        let days = window.map_or(DEFAULT_VELOCITY_DAYS, |w| w.days());
        self.group_product_sales(days, entities)
            .into_iter()
            .map(|row| VelocityRow {
                product_id: row.product_id,
                product_title: row.product_title,
                total_sold: row.total_sold,
                avg_daily_sales: if days > 0 {
                    row.total_sold as f64 / days as f64
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Products whose stock runs out within the stockout horizon at recent
    /// velocity, most urgent first.
    ///
    /// Velocity is always computed over the fixed trailing
    /// [`RISK_VELOCITY_DAYS`] window, independent of any caller-requested
    /// window. Products with zero velocity are excluded: their stockout date
    /// cannot be estimated.
    pub fn stockout_risks(&self) -> Vec<RiskRow> {
        let velocity = self.sales_velocity(
            Some(TimeWindow::trailing_days(RISK_VELOCITY_DAYS as u32)),
            &[],
        );

        let mut at_risk: Vec<RiskRow> = velocity
            .into_iter()
            .filter(|row| row.avg_daily_sales > 0.0)
            .filter_map(|row| {
                let inventory = self
                    .snapshot
                    .inventory
                    .iter()
                    .find(|level| level.product_id == row.product_id)?;
                let days_remaining = inventory.quantity as f64 / row.avg_daily_sales;
                if days_remaining <= STOCKOUT_HORIZON_DAYS {
                    Some(RiskRow {
                        product_id: row.product_id,
                        product_title: row.product_title,
                        current_stock: inventory.quantity,
                        avg_daily_sales: row.avg_daily_sales,
                        days_remaining,
                    })
                } else {
                    None
                }
            })
            .collect();

        at_risk.sort_by(|a, b| a.days_remaining.total_cmp(&b.days_remaining));
        at_risk
    }

    /// Customers with more than one order in the window (default 90 days),
    /// most orders first.
    pub fn repeat_customers(&self, window: Option<TimeWindow>) -> Vec<CustomerRow> {
        let days = window.map_or(DEFAULT_REPEAT_CUSTOMERS_DAYS, |w| w.days());
        let mut rows: Vec<CustomerRow> = self
            .group_customers(days)
            .into_iter()
            .filter(|row| row.order_count > 1)
            .collect();
        rows.sort_by(|a, b| b.order_count.cmp(&a.order_count));
        rows
    }

    /// Orders and revenue per calendar date over the window (default 7
    /// days), most recent date first.
    pub fn sales_summary(&self, window: Option<TimeWindow>) -> Vec<DailySalesRow> {
        let days = window.map_or(DEFAULT_SALES_SUMMARY_DAYS, |w| w.days());
        let mut by_date: BTreeMap<NaiveDate, (i64, f64)> = BTreeMap::new();
        for order in self.orders_within(days) {
            let entry = by_date.entry(order.created_at.date_naive()).or_default();
            entry.0 += 1;
            entry.1 += order.total_price;
        }

        by_date
            .into_iter()
            .rev()
            .map(|(date, (order_count, total_revenue))| DailySalesRow {
                date,
                order_count,
                total_revenue,
            })
            .collect()
    }

    /// Top customers by total spend over the window (default 30 days),
    /// truncated to 10.
    pub fn top_customers(&self, window: Option<TimeWindow>) -> Vec<CustomerRow> {
        let days = window.map_or(DEFAULT_TOP_CUSTOMERS_DAYS, |w| w.days());
        let mut rows = self.group_customers(days);
        rows.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
        rows.truncate(TOP_CUSTOMERS_LIMIT);
        rows
    }

    /// Current inventory snapshot, entity-filtered by title substring.
    pub fn inventory_levels(&self, entities: &[String]) -> Vec<InventoryRow> {
        self.snapshot
            .inventory
            .iter()
            .filter(|level| matches_entities(&level.product_title, entities))
            .map(|level| InventoryRow {
                product_id: level.product_id,
                product_title: level.product_title.clone(),
                sku: level.sku.clone(),
                quantity: level.quantity,
            })
            .collect()
    }

    /// Orders within the trailing `days` window. A non-positive window means
    /// no filtering.
    fn orders_within(&self, days: i64) -> impl Iterator<Item = &'a Order> + 'a {
        let cutoff = if days > 0 {
            Some(self.now - chrono::Duration::days(days))
        } else {
            None
        };
        self.snapshot
            .orders
            .iter()
            .filter(move |order| cutoff.is_none_or(|c| order.created_at >= c))
    }

    /// Group windowed, entity-filtered orders by product, preserving
    /// first-seen order.
    fn group_product_sales(&self, days: i64, entities: &[String]) -> Vec<ProductSalesRow> {
        let mut index: HashMap<i64, usize> = HashMap::new();
        let mut rows: Vec<ProductSalesRow> = Vec::new();

        for order in self.orders_within(days) {
            if !matches_entities(&order.product_title, entities) {
                continue;
            }
            let slot = *index.entry(order.product_id).or_insert_with(|| {
                rows.push(ProductSalesRow {
                    product_id: order.product_id,
                    product_title: order.product_title.clone(),
                    total_sold: 0,
                    revenue: 0.0,
                });
                rows.len() - 1
            });
            rows[slot].total_sold += order.quantity;
            rows[slot].revenue += order.total_price;
        }

        rows
    }

    /// Group windowed orders by customer, preserving first-seen order.
    fn group_customers(&self, days: i64) -> Vec<CustomerRow> {
        let mut index: HashMap<i64, usize> = HashMap::new();
        let mut rows: Vec<CustomerRow> = Vec::new();

        for order in self.orders_within(days) {
            let slot = *index.entry(order.customer_id).or_insert_with(|| {
                rows.push(CustomerRow {
                    customer_id: order.customer_id,
                    customer_email: order.customer_email.clone(),
                    customer_name: order.customer_name.clone(),
                    order_count: 0,
                    total_spent: 0.0,
                });
                rows.len() - 1
            });
            rows[slot].order_count += 1;
            rows[slot].total_spent += order.total_price;
        }

        rows
    }
}

/// Case-insensitive substring match against any entity. An empty entity
/// list matches everything.
fn matches_entities(title: &str, entities: &[String]) -> bool {
    if entities.is_empty() {
        return true;
    }
    let title = title.to_lowercase();
    entities
        .iter()
        .any(|entity| title.contains(&entity.to_lowercase()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shoplens_core::{Customer, InventoryLevel};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn order(
        order_id: i64,
        product_id: i64,
        title: &str,
        customer_id: i64,
        quantity: i64,
        total_price: f64,
        days_ago: i64,
    ) -> Order {
        Order {
            order_id,
            product_id,
            product_title: title.to_string(),
            customer_id,
            customer_email: format!("customer{}@email.com", customer_id),
            customer_name: format!("Customer {}", customer_id),
            quantity,
            total_price,
            created_at: now() - chrono::Duration::days(days_ago),
        }
    }

    fn inventory(product_id: i64, title: &str, quantity: i64) -> InventoryLevel {
        InventoryLevel {
            product_id,
            product_title: title.to_string(),
            sku: format!("SKU-{:03}", product_id),
            quantity,
        }
    }

    fn snapshot(orders: Vec<Order>, inventory: Vec<InventoryLevel>) -> StoreSnapshot {
        StoreSnapshot {
            orders,
            inventory,
            customers: vec![Customer {
                customer_id: 1,
                customer_name: "Customer 1".to_string(),
                customer_email: "customer1@email.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_top_products_single_product_totals() {
        // Six distinct orders for one product totaling 9 units over 7 days.
        let orders = vec![
            order(1, 1, "Wireless Bluetooth Headphones", 1, 2, 159.98, 0),
            order(2, 1, "Wireless Bluetooth Headphones", 2, 1, 79.99, 1),
            order(3, 1, "Wireless Bluetooth Headphones", 3, 2, 159.98, 2),
            order(4, 1, "Wireless Bluetooth Headphones", 4, 1, 79.99, 3),
            order(5, 1, "Wireless Bluetooth Headphones", 5, 2, 159.98, 4),
            order(6, 1, "Wireless Bluetooth Headphones", 6, 1, 79.99, 5),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.top_products(Some(TimeWindow::trailing_days(7)), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sold, 9);
        assert_eq!(rows[0].product_title, "Wireless Bluetooth Headphones");
    }

    #[test]
    fn test_top_products_sorted_and_truncated() {
        let mut orders = Vec::new();
        // Seven products with increasing sales volume.
        for product_id in 1..=7 {
            for unit in 0..product_id {
                orders.push(order(
                    product_id * 100 + unit,
                    product_id,
                    &format!("Product {}", product_id),
                    1,
                    1,
                    10.0,
                    1,
                ));
            }
        }
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.top_products(Some(TimeWindow::trailing_days(7)), &[]);
        assert_eq!(rows.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(rows[0].total_sold, 7);
        for pair in rows.windows(2) {
            assert!(pair[0].total_sold >= pair[1].total_sold);
        }
    }

    #[test]
    fn test_top_products_tie_keeps_first_seen_order() {
        let orders = vec![
            order(1, 10, "Bamboo Sunglasses", 1, 3, 179.97, 0),
            order(2, 20, "Ceramic Coffee Mug Set", 2, 3, 119.97, 1),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.top_products(Some(TimeWindow::trailing_days(7)), &[]);
        assert_eq!(rows[0].product_id, 10);
        assert_eq!(rows[1].product_id, 20);
    }

    #[test]
    fn test_top_products_window_excludes_old_orders() {
        let orders = vec![
            order(1, 1, "Yoga Mat Pro", 1, 2, 99.98, 1),
            order(2, 1, "Yoga Mat Pro", 2, 5, 249.95, 20),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.top_products(Some(TimeWindow::trailing_days(7)), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sold, 2);
    }

    #[test]
    fn test_top_products_entity_filter() {
        let orders = vec![
            order(1, 1, "Wireless Bluetooth Headphones", 1, 1, 79.99, 0),
            order(2, 2, "Organic Cotton T-Shirt", 2, 4, 119.96, 0),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.top_products(
            Some(TimeWindow::trailing_days(7)),
            &["headphones".to_string()],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id, 1);

        let none = engine.top_products(
            Some(TimeWindow::trailing_days(7)),
            &["snowboard".to_string()],
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_empty_snapshot_yields_empty_results() {
        let snap = StoreSnapshot::default();
        let engine = AnalyticsEngine::new(&snap, now());

        assert!(engine.top_products(None, &[]).is_empty());
        assert!(engine.sales_velocity(None, &[]).is_empty());
        assert!(engine.stockout_risks().is_empty());
        assert!(engine.repeat_customers(None).is_empty());
        assert!(engine.sales_summary(None).is_empty());
        assert!(engine.top_customers(None).is_empty());
        assert!(engine.inventory_levels(&[]).is_empty());
    }

    #[test]
    fn test_sales_velocity_divides_by_window_days() {
        let orders = vec![
            order(1, 1, "Portable Phone Charger", 1, 7, 244.93, 0),
            order(2, 1, "Portable Phone Charger", 2, 7, 244.93, 3),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.sales_velocity(Some(TimeWindow::trailing_days(7)), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sold, 14);
        assert!((rows[0].avg_daily_sales - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sales_velocity_zero_window_reports_zero() {
        let orders = vec![order(1, 1, "Smart Watch Series 5", 1, 3, 899.97, 0)];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let rows = engine.sales_velocity(Some(TimeWindow::trailing_days(0)), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].avg_daily_sales, 0.0);
    }

    #[test]
    fn test_stockout_risks_includes_only_horizon() {
        // 14 units over the fixed 7-day risk window -> velocity 2.0/day.
        // Stock 10 -> 5 days remaining: at risk.
        let mut orders = vec![
            order(1, 1, "Wireless Bluetooth Headphones", 1, 7, 559.93, 1),
            order(2, 1, "Wireless Bluetooth Headphones", 2, 7, 559.93, 2),
        ];
        // 7 units over 7 days -> velocity 1.0/day. Stock 10 -> 10 days: safe.
        orders.push(order(3, 2, "Organic Cotton T-Shirt", 3, 7, 209.93, 1));

        let snap = snapshot(
            orders,
            vec![
                inventory(1, "Wireless Bluetooth Headphones", 10),
                inventory(2, "Organic Cotton T-Shirt", 10),
            ],
        );
        let engine = AnalyticsEngine::new(&snap, now());

        let risks = engine.stockout_risks();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].product_id, 1);
        assert!((risks[0].days_remaining - 5.0).abs() < 1e-9);
        assert!(risks[0].avg_daily_sales > 0.0);
    }

    #[test]
    fn test_stockout_risks_sorted_most_urgent_first() {
        let orders = vec![
            // Product 1: 7 units/7d -> 1.0/day, stock 3 -> 3 days.
            order(1, 1, "Yoga Mat Pro", 1, 7, 349.93, 1),
            // Product 2: 14 units/7d -> 2.0/day, stock 2 -> 1 day.
            order(2, 2, "Leather Laptop Bag", 2, 14, 1259.86, 1),
        ];
        let snap = snapshot(
            orders,
            vec![
                inventory(1, "Yoga Mat Pro", 3),
                inventory(2, "Leather Laptop Bag", 2),
            ],
        );
        let engine = AnalyticsEngine::new(&snap, now());

        let risks = engine.stockout_risks();
        assert_eq!(risks.len(), 2);
        assert_eq!(risks[0].product_id, 2);
        assert!(risks[0].days_remaining <= risks[1].days_remaining);
    }

    #[test]
    fn test_stockout_risks_excludes_zero_velocity() {
        // Order outside the 7-day risk window: zero recent velocity.
        let orders = vec![order(1, 1, "Fitness Resistance Bands", 1, 5, 99.95, 30)];
        let snap = snapshot(orders, vec![inventory(1, "Fitness Resistance Bands", 2)]);
        let engine = AnalyticsEngine::new(&snap, now());

        assert!(engine.stockout_risks().is_empty());
    }

    #[test]
    fn test_repeat_customers_requires_more_than_one_order() {
        let orders = vec![
            order(1, 1, "Yoga Mat Pro", 7, 1, 49.99, 1),
            order(2, 2, "Smart Watch Series 5", 7, 1, 299.99, 5),
            order(3, 3, "Bamboo Sunglasses", 8, 1, 59.99, 2),
        ];
        let snap = snapshot(orders.clone(), vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let repeat = engine.repeat_customers(Some(TimeWindow::trailing_days(90)));
        assert_eq!(repeat.len(), 1);
        assert_eq!(repeat[0].customer_id, 7);
        assert_eq!(repeat[0].order_count, 2);

        // Removing one of the two orders drops the customer from the cohort.
        let snap = snapshot(orders[1..].to_vec(), vec![]);
        let engine = AnalyticsEngine::new(&snap, now());
        assert!(engine
            .repeat_customers(Some(TimeWindow::trailing_days(90)))
            .is_empty());
    }

    #[test]
    fn test_repeat_customers_sorted_by_order_count() {
        let mut orders = Vec::new();
        for i in 0..3 {
            orders.push(order(i, 1, "Yoga Mat Pro", 1, 1, 49.99, i));
        }
        for i in 10..12 {
            orders.push(order(i, 1, "Yoga Mat Pro", 2, 1, 49.99, 1));
        }
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let repeat = engine.repeat_customers(None);
        assert_eq!(repeat.len(), 2);
        assert_eq!(repeat[0].customer_id, 1);
        assert_eq!(repeat[0].order_count, 3);
        assert_eq!(repeat[1].order_count, 2);
    }

    #[test]
    fn test_sales_summary_groups_by_date_descending() {
        let orders = vec![
            order(1, 1, "Yoga Mat Pro", 1, 1, 49.99, 0),
            order(2, 2, "Bamboo Sunglasses", 2, 1, 59.99, 0),
            order(3, 3, "Smart Watch Series 5", 3, 1, 299.99, 2),
        ];
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let summary = engine.sales_summary(Some(TimeWindow::trailing_days(7)));
        assert_eq!(summary.len(), 2);
        assert!(summary[0].date > summary[1].date);
        assert_eq!(summary[0].order_count, 2);
        assert!((summary[0].total_revenue - 109.98).abs() < 1e-9);
        assert_eq!(summary[1].order_count, 1);
    }

    #[test]
    fn test_top_customers_sorted_by_spend_and_truncated() {
        let mut orders = Vec::new();
        for customer_id in 1..=12 {
            orders.push(order(
                customer_id,
                1,
                "Yoga Mat Pro",
                customer_id,
                1,
                customer_id as f64 * 10.0,
                1,
            ));
        }
        let snap = snapshot(orders, vec![]);
        let engine = AnalyticsEngine::new(&snap, now());

        let top = engine.top_customers(Some(TimeWindow::trailing_days(30)));
        assert_eq!(top.len(), TOP_CUSTOMERS_LIMIT);
        assert_eq!(top[0].customer_id, 12);
        for pair in top.windows(2) {
            assert!(pair[0].total_spent >= pair[1].total_spent);
        }
    }

    #[test]
    fn test_inventory_levels_entity_filter() {
        let snap = snapshot(
            vec![],
            vec![
                inventory(1, "Wireless Bluetooth Headphones", 45),
                inventory(2, "Organic Cotton T-Shirt", 15),
            ],
        );
        let engine = AnalyticsEngine::new(&snap, now());

        let all = engine.inventory_levels(&[]);
        assert_eq!(all.len(), 2);

        let filtered = engine.inventory_levels(&["cotton".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_id, 2);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
