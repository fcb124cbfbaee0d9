//! In-memory implementation of ProductRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::models::Product;
use crate::repository::ProductRepository;

/// Process-local product store.
///
/// Clones share the same map. Every operation takes the lock exactly once,
/// so a reader never sees a half-applied write.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with [`sample_catalogue`]
    pub fn with_sample_data() -> Self {
        Self::with_products(sample_catalogue())
    }

    /// Create a store holding `products`, keyed by their ids
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Vec<Product> {
        self.products.read().await.values().cloned().collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Option<Product> {
        self.products.read().await.get(id).cloned()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn put(&self, product: Product) -> Product {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        product
    }

    #[instrument(skip(self, product))]
    async fn replace(&self, id: &str, mut product: Product) -> Option<Product> {
        let mut products = self.products.write().await;
        let slot = products.get_mut(id)?;

        product.id = id.to_string();
        *slot = product.clone();
        Some(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> bool {
        self.products.write().await.remove(id).is_some()
    }

    async fn exists(&self, id: &str) -> bool {
        self.products.read().await.contains_key(id)
    }

    async fn count(&self) -> usize {
        self.products.read().await.len()
    }
}

fn sample(id: &str, name: &str, description: &str, cents: i64, quantity: i32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        price: Decimal::new(cents, 2),
        quantity,
    }
}

/// The default inventory loaded at start-up when seeding is enabled
pub fn sample_catalogue() -> Vec<Product> {
    vec![
        sample("1", "Laptop", "High-performance laptop for professional use", 129999, 15),
        sample("2", "Smartphone", "Latest model with advanced camera features", 89999, 30),
        sample("3", "Wireless Headphones", "Noise-cancelling over-ear headphones", 24999, 50),
        sample("4", "4K Monitor", "27-inch 4K UHD display", 44999, 20),
        sample("5", "Mechanical Keyboard", "RGB backlit mechanical keyboard", 12999, 40),
        sample("6", "Wireless Mouse", "Ergonomic wireless mouse", 4999, 60),
        sample("7", "Tablet", "10-inch tablet with stylus support", 59999, 25),
        sample("8", "HD Webcam", "1080p webcam for video conferencing", 8999, 35),
        sample("9", "Bluetooth Speaker", "Portable waterproof speaker", 7999, 45),
        sample("10", "USB-C Charger", "65W fast charging adapter", 3999, 100),
    ]
}
