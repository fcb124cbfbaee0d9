//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductPatch, ProductRequest};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer validates input, assigns identifiers, and turns the
/// repository's `None`/`false` answers into domain errors.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        Ok(self.repository.list().await)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get(id)
            .await
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Create a new product under a freshly generated id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductRequest) -> ProductResult<Product> {
        input.validate()?;

        let product = Product::from_request(Uuid::new_v4().to_string(), input);
        let product = self.repository.put(product).await;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace every field of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: ProductRequest) -> ProductResult<Product> {
        input.validate()?;

        let product = self
            .repository
            .replace(id, Product::from_request(id, input))
            .await
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Overwrite only the fields present in `patch`
    ///
    /// Read and write are separate store calls; a concurrent delete between
    /// them surfaces as `NotFound`.
    #[instrument(skip(self, patch))]
    pub async fn patch_product(&self, id: &str, patch: ProductPatch) -> ProductResult<Product> {
        patch.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_patch(patch);

        let product = self
            .repository
            .replace(id, product)
            .await
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        info!(product_id = %id, "Product patched");
        Ok(product)
    }

    /// Delete a product. Unknown ids succeed as well.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if self.repository.delete(id).await {
            info!(product_id = %id, "Product deleted");
        }
        Ok(())
    }

    /// Number of stored products
    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<usize> {
        Ok(self.repository.count().await)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
