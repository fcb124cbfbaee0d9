use async_trait::async_trait;

use crate::models::Product;

/// Repository trait for Product storage
///
/// Absence is never an error here: lookups and replacements report a missing
/// id as `None` and deletion of a missing id is a no-op. Implementations must
/// make each single-record mutation atomic with respect to other calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All stored products, in no particular order
    async fn list(&self) -> Vec<Product>;

    /// Get a product by ID
    async fn get(&self, id: &str) -> Option<Product>;

    /// Insert or overwrite by `product.id`, returning the stored value
    async fn put(&self, product: Product) -> Product;

    /// Overwrite an existing product, forcing its id to `id`.
    /// Returns `None` without inserting when `id` is unknown.
    async fn replace(&self, id: &str, product: Product) -> Option<Product>;

    /// Remove a product. Returns whether anything was removed.
    async fn delete(&self, id: &str) -> bool;

    /// Check whether a product ID is stored
    async fn exists(&self, id: &str) -> bool;

    /// Number of stored products
    async fn count(&self) -> usize;
}
