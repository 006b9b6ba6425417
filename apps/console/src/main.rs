//! # ShopHub Console
//!
//! Demo driver for the client-state core: seeds a static catalog, runs a few
//! debounced searches (including a forced-failure fallback pass), and walks
//! the cart through its operations with a logging observer attached.
//!
//! ## Usage
//! ```bash
//! cargo run -p shophub-console
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p shophub-console
//!
//! # Slower debounce to watch the timer behavior
//! SHOPHUB_DEBOUNCE_MS=1000 cargo run -p shophub-console
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shophub_cart::{CartLine, CartObserver, CartSnapshot, CartStore};
use shophub_core::{Category, Money, ProductSummary};
use shophub_search::{
    CatalogError, CatalogResult, CatalogSource, ListOptions, ProductPage, SearchConfig,
    SearchCoordinator, StaticCatalog,
};

/// Observer that logs every cart change, standing in for the drawer badge.
struct LoggingObserver;

impl CartObserver for LoggingObserver {
    fn cart_changed(&self, snapshot: &CartSnapshot) {
        info!(
            item_count = snapshot.item_count,
            total = %Money::from_cents(snapshot.total_cents),
            "cart changed"
        );
    }
}

/// Catalog source whose searches always fail, to demonstrate the local
/// fallback path. Listing still works so the cache can be populated.
struct FlakyCatalog {
    inner: StaticCatalog,
}

#[async_trait]
impl CatalogSource for FlakyCatalog {
    async fn search(&self, _query: &str) -> CatalogResult<Vec<ProductSummary>> {
        Err(CatalogError::Unavailable(
            "simulated backend outage".to_string(),
        ))
    }

    async fn list(&self, options: &ListOptions) -> CatalogResult<ProductPage> {
        self.inner.list(options).await
    }
}

/// Sample storefront products.
fn sample_products() -> Vec<ProductSummary> {
    let electronics = Category {
        id: "cat-electronics".to_string(),
        name: "Electronics".to_string(),
    };
    let fashion = Category {
        id: "cat-fashion".to_string(),
        name: "Fashion".to_string(),
    };

    let seed: &[(&str, &str, i64, Option<i64>, &Category, &str, bool)] = &[
        (
            "1",
            "Wireless Bluetooth Headphones",
            8999,
            Some(17999),
            &electronics,
            "Over-ear headphones with active noise cancellation",
            true,
        ),
        (
            "2",
            "Smart Fitness Watch",
            12999,
            Some(19999),
            &electronics,
            "Heart-rate tracking and a week of battery",
            true,
        ),
        (
            "3",
            "Portable Phone Charger",
            2499,
            Some(4999),
            &electronics,
            "10,000 mAh pocket power bank",
            false,
        ),
        (
            "4",
            "Premium Cotton T-Shirt",
            1899,
            Some(2999),
            &fashion,
            "Soft everyday tee in twelve colors",
            false,
        ),
        (
            "5",
            "Running Shoes",
            7999,
            Some(11999),
            &fashion,
            "Lightweight trainers with red trim",
            true,
        ),
    ];

    seed.iter()
        .enumerate()
        .map(
            |(age, (id, name, price, compare_at, category, description, featured))| {
                ProductSummary {
                    id: id.to_string(),
                    name: name.to_string(),
                    price_cents: *price,
                    compare_at_price_cents: *compare_at,
                    images: vec![format!("/{}.jpg", name.to_lowercase().replace(' ', "-"))],
                    category: Some((*category).clone()),
                    description: Some(description.to_string()),
                    is_featured: *featured,
                    created_at: Utc::now() - ChronoDuration::days(age as i64),
                }
            },
        )
        .collect()
}

fn print_results(label: &str, coordinator: &SearchCoordinator) {
    let state = coordinator.snapshot();
    println!();
    println!(
        "{}: {} result(s) for \"{}\"",
        label,
        state.results.len(),
        state.query
    );
    for product in &state.results {
        let deal = product
            .discount_percent()
            .map(|pct| format!("  (-{}%)", pct))
            .unwrap_or_default();
        println!("  {} {}{}", product.price(), product.name, deal);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing: default INFO, overridable with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Debounce override from environment
    let debounce_ms: u64 = env::var("SHOPHUB_DEBOUNCE_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(300);
    let config = SearchConfig {
        debounce: Duration::from_millis(debounce_ms),
        ..SearchConfig::default()
    };

    info!(debounce_ms, "ShopHub console starting");

    // -------------------------------------------------------------------------
    // Search: normal path
    // -------------------------------------------------------------------------
    let products = sample_products();
    let catalog = Arc::new(StaticCatalog::new(products));
    let coordinator = SearchCoordinator::with_config(catalog, config.clone());
    coordinator.load_catalog().await;

    // Simulate typing: only the settled query should reach the source
    coordinator.set_query("w");
    coordinator.set_query("wa");
    coordinator.set_query("watch");
    tokio::time::sleep(Duration::from_millis(debounce_ms + 100)).await;
    print_results("Search", &coordinator);

    // -------------------------------------------------------------------------
    // Search: fallback path (backend down, cached catalog filtered locally)
    // -------------------------------------------------------------------------
    let flaky = Arc::new(FlakyCatalog {
        inner: StaticCatalog::new(sample_products()),
    });
    let degraded = SearchCoordinator::with_config(flaky, config);
    degraded.load_catalog().await;

    degraded.set_query("red");
    tokio::time::sleep(Duration::from_millis(debounce_ms + 100)).await;
    print_results("Fallback search", &degraded);

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------
    let store = CartStore::new();
    store.subscribe(Arc::new(LoggingObserver));

    // Pages map a ProductSummary to a cart line on "Add to Cart"
    let add_to_cart = |product: &ProductSummary| CartLine {
        id: product.id.parse().unwrap_or_default(),
        name: product.name.clone(),
        price_cents: product.price_cents,
        image: product.primary_image().to_string(),
    };

    let state = coordinator.snapshot();
    let watch = &state.catalog[1];
    let charger = &state.catalog[2];

    store.add_item(add_to_cart(watch));
    store.add_item(add_to_cart(watch)); // merges, quantity 2
    store.add_item(add_to_cart(charger));
    store.update_quantity(charger.id.parse().unwrap_or_default(), 3);

    let snapshot = store.snapshot();
    println!();
    println!("Cart ({} items):", snapshot.item_count);
    for item in &snapshot.items {
        println!(
            "  {} x{} = {}",
            item.name,
            item.quantity,
            item.line_total()
        );
    }
    println!("Total: {}", Money::from_cents(snapshot.total_cents));

    store.clear();
    info!("done");

    Ok(())
}
