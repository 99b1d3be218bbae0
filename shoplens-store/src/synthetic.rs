//! Deterministic synthetic store fixture

use crate::StoreBackend;
use async_trait::async_trait;
use chrono::Duration;
use shoplens_analytics::AnalyticsEngine;
use shoplens_core::{
    Category, Customer, Intent, InventoryLevel, Order, Product, ResultSet, ShoplensConfig,
    ShoplensResult, StoreSnapshot, Timestamp,
};

/// Days of synthetic order history to generate.
const HISTORY_DAYS: i64 = 90;

/// Fixed product catalog for the synthetic store.
const CATALOG: &[(i64, &str, &str, f64)] = &[
    (1, "Wireless Bluetooth Headphones", "WBH-001", 79.99),
    (2, "Organic Cotton T-Shirt", "OCT-001", 29.99),
    (3, "Stainless Steel Water Bottle", "SSWB-001", 24.99),
    (4, "Yoga Mat Pro", "YMP-001", 49.99),
    (5, "Smart Watch Series 5", "SWS5-001", 299.99),
    (6, "Leather Laptop Bag", "LLB-001", 89.99),
    (7, "Portable Phone Charger", "PPC-001", 34.99),
    (8, "Bamboo Sunglasses", "BS-001", 59.99),
    (9, "Ceramic Coffee Mug Set", "CCMS-001", 39.99),
    (10, "Fitness Resistance Bands", "FRB-001", 19.99),
];

/// Fixed customer roster.
const CUSTOMER_NAMES: &[&str] = &[
    "Sarah Johnson",
    "Michael Chen",
    "Emily Davis",
    "James Wilson",
    "Lisa Anderson",
    "David Martinez",
    "Jennifer Taylor",
    "Robert Brown",
    "Maria Garcia",
    "William Lee",
    "Amanda White",
    "Christopher Moore",
    "Jessica Thomas",
    "Daniel Jackson",
    "Ashley Harris",
    "Matthew Martin",
    "Stephanie Thompson",
    "Andrew Robinson",
    "Michelle Clark",
    "Kevin Lewis",
];

/// Fixed current stock per catalog position.
const STOCK_LEVELS: &[i64] = &[45, 15, 78, 22, 12, 34, 56, 28, 41, 67];

/// SplitMix64: small deterministic generator for the fixture.
///
/// Statistical quality does not matter here, reproducibility does: the same
/// seed always yields the same order history.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-ish value in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next() % (hi - lo + 1)
    }
}

/// Deterministic synthetic store backend.
///
/// Holds a fixed product catalog, 90 days of seeded synthetic order history
/// (denser in the trailing 30 days), a fixed customer roster, and a fixed
/// inventory snapshot. Both the seed and the clock are explicit constructor
/// inputs, so test runs are reproducible.
#[derive(Debug, Clone)]
pub struct SyntheticStore {
    store_id: String,
    snapshot: StoreSnapshot,
    now: Timestamp,
}

impl SyntheticStore {
    /// Build the fixture from an explicit seed and clock.
    pub fn with_seed(seed: u64, now: Timestamp) -> Self {
        Self::new("synthetic-store", seed, now)
    }

    /// Build the fixture from configuration.
    pub fn from_config(config: &ShoplensConfig, now: Timestamp) -> Self {
        Self::new(config.store_id.clone(), config.synthetic_seed, now)
    }

    fn new(store_id: impl Into<String>, seed: u64, now: Timestamp) -> Self {
        let products = Self::products();
        let customers = Self::customers();
        let orders = Self::orders(seed, now, &products, &customers);
        let inventory = Self::inventory(&products);

        Self {
            store_id: store_id.into(),
            snapshot: StoreSnapshot {
                orders,
                inventory,
                customers,
            },
            now,
        }
    }

    /// The immutable snapshot backing this fixture.
    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    fn products() -> Vec<Product> {
        CATALOG
            .iter()
            .map(|&(product_id, title, sku, price)| Product {
                product_id,
                product_title: title.to_string(),
                sku: sku.to_string(),
                price,
            })
            .collect()
    }

    fn customers() -> Vec<Customer> {
        CUSTOMER_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Customer {
                customer_id: i as i64 + 1,
                customer_name: name.to_string(),
                customer_email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
            })
            .collect()
    }

    fn inventory(products: &[Product]) -> Vec<InventoryLevel> {
        products
            .iter()
            .zip(STOCK_LEVELS)
            .map(|(product, &quantity)| InventoryLevel {
                product_id: product.product_id,
                product_title: product.product_title.clone(),
                sku: product.sku.clone(),
                quantity,
            })
            .collect()
    }

    /// Seeded 90-day order history, denser in the trailing 30 days.
    fn orders(
        seed: u64,
        now: Timestamp,
        products: &[Product],
        customers: &[Customer],
    ) -> Vec<Order> {
        let mut rng = SplitMix64::new(seed);
        let mut orders = Vec::new();

        for day in 0..HISTORY_DAYS {
            let num_orders = if day < 30 {
                rng.range(3, 8)
            } else {
                rng.range(1, 4)
            };

            for _ in 0..num_orders {
                let product = &products[rng.range(0, products.len() as u64 - 1) as usize];
                let customer = &customers[rng.range(0, customers.len() as u64 - 1) as usize];
                let quantity = rng.range(1, 3) as i64;

                orders.push(Order {
                    order_id: orders.len() as i64 + 1,
                    product_id: product.product_id,
                    product_title: product.product_title.clone(),
                    customer_id: customer.customer_id,
                    customer_email: customer.customer_email.clone(),
                    customer_name: customer.customer_name.clone(),
                    quantity,
                    total_price: product.price * quantity as f64,
                    created_at: now - Duration::days(day),
                });
            }
        }

        orders
    }
}

#[async_trait]
impl StoreBackend for SyntheticStore {
    /// Route the intent to the matching aggregation, ignoring the query
    /// text: the synthetic backend answers from its snapshot directly.
    async fn execute(&self, query: &str, intent: &Intent) -> ShoplensResult<ResultSet> {
        tracing::debug!(
            store_id = %self.store_id,
            category = intent.category.as_str(),
            query_len = query.len(),
            "executing query against synthetic store"
        );

        let engine = AnalyticsEngine::new(&self.snapshot, self.now);
        let window = intent.time_period;
        let entities = &intent.entities;

        let result = match intent.category {
            Category::Sales if intent.has_metric("top_products") => {
                ResultSet::ProductSales(engine.top_products(window, entities))
            }
            Category::Inventory if intent.has_metric("reorder_quantity") => {
                ResultSet::Velocity(engine.sales_velocity(window, entities))
            }
            Category::Inventory if intent.has_metric("stockout_prediction") => {
                ResultSet::Risks(engine.stockout_risks())
            }
            Category::Customers if intent.has_metric("repeat_customers") => {
                ResultSet::Customers(engine.repeat_customers(window))
            }
            Category::Sales => ResultSet::DailySales(engine.sales_summary(window)),
            Category::Inventory => ResultSet::Inventory(engine.inventory_levels(entities)),
            Category::Customers => ResultSet::Customers(engine.top_customers(window)),
            Category::General => ResultSet::ProductSales(engine.top_products(window, entities)),
        };

        Ok(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shoplens_core::TimeWindow;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fixture_shape() {
        let store = SyntheticStore::with_seed(42, now());
        let snapshot = store.snapshot();

        assert_eq!(snapshot.customers.len(), 20);
        assert_eq!(snapshot.inventory.len(), 10);
        assert!(!snapshot.orders.is_empty());

        // Denser recent history: at least 3 orders per recent day.
        let recent = snapshot
            .orders
            .iter()
            .filter(|o| o.created_at >= now() - Duration::days(30))
            .count();
        assert!(recent >= 90);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let a = SyntheticStore::with_seed(7, now());
        let b = SyntheticStore::with_seed(7, now());
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = SyntheticStore::with_seed(1, now());
        let b = SyntheticStore::with_seed(2, now());
        assert_ne!(a.snapshot().orders, b.snapshot().orders);
    }

    #[test]
    fn test_from_config_uses_seed_and_store_id() {
        let config = ShoplensConfig::synthetic("demo-store.example.com", 11);
        let store = SyntheticStore::from_config(&config, now());
        let again = SyntheticStore::with_seed(11, now());
        assert_eq!(store.snapshot(), again.snapshot());
    }

    #[tokio::test]
    async fn test_execute_routes_top_products() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::Sales)
            .with_metric("top_products")
            .with_time_period(TimeWindow::trailing_days(30));

        let result = store.execute("FROM orders SHOW ...", &intent).await.unwrap();
        match result {
            ResultSet::ProductSales(rows) => {
                assert!(!rows.is_empty());
                assert!(rows.len() <= 5);
            }
            other => panic!("expected ProductSales, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_routes_stockout_prediction() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::Inventory).with_metric("stockout_prediction");

        let result = store.execute("FROM inventory_levels SHOW ...", &intent).await.unwrap();
        assert!(matches!(result, ResultSet::Risks(_)));
    }

    #[tokio::test]
    async fn test_execute_routes_reorder_velocity() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::Inventory)
            .with_metric("reorder_quantity")
            .with_time_period(TimeWindow::trailing_days(30))
            .with_entity("headphones");

        let result = store.execute("FROM inventory_levels SHOW ...", &intent).await.unwrap();
        match result {
            ResultSet::Velocity(rows) => {
                for row in rows {
                    assert!(row.product_title.to_lowercase().contains("headphones"));
                }
            }
            other => panic!("expected Velocity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_routes_repeat_customers() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::Customers)
            .with_metric("repeat_customers")
            .with_time_period(TimeWindow::trailing_days(90));

        let result = store.execute("FROM customers SHOW ...", &intent).await.unwrap();
        match result {
            ResultSet::Customers(rows) => {
                for row in rows {
                    assert!(row.order_count > 1);
                }
            }
            other => panic!("expected Customers, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_plain_sales_is_daily_summary() {
        let store = SyntheticStore::with_seed(42, now());
        let intent =
            Intent::new(Category::Sales).with_time_period(TimeWindow::trailing_days(7));

        let result = store.execute("FROM orders SHOW ...", &intent).await.unwrap();
        assert!(matches!(result, ResultSet::DailySales(_)));
    }

    #[tokio::test]
    async fn test_execute_plain_inventory_lists_levels() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::Inventory);

        let result = store.execute("FROM inventory_levels SHOW ...", &intent).await.unwrap();
        match result {
            ResultSet::Inventory(rows) => assert_eq!(rows.len(), 10),
            other => panic!("expected Inventory, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_general_falls_back_to_top_products() {
        let store = SyntheticStore::with_seed(42, now());
        let intent = Intent::new(Category::General);

        let result = store.execute("FROM orders SHOW ...", &intent).await.unwrap();
        assert!(matches!(result, ResultSet::ProductSales(_)));
    }
}
