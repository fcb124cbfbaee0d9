use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Product entity - an item held in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the server on creation
    #[schema(example = "1")]
    pub id: String,
    /// Product name
    #[schema(example = "Laptop")]
    pub name: String,
    /// Product description
    #[schema(example = "High-performance laptop for professional use")]
    pub description: Option<String>,
    /// Price in USD
    #[schema(value_type = f64, example = 1299.99)]
    pub price: Decimal,
    /// Available quantity in stock
    #[schema(example = 15)]
    pub quantity: i32,
}

/// Body for creating or fully replacing a product.
///
/// A client-supplied `id` is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Wireless Headphones")]
    pub name: String,
    #[schema(example = "Noise-cancelling over-ear headphones")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_price"))]
    #[schema(value_type = f64, example = 249.99)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    #[schema(example = 50)]
    pub quantity: i32,
}

/// Body for partially updating a product. Absent or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductPatch {
    #[schema(example = "Updated Headphones")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_price"))]
    #[schema(value_type = Option<f64>, example = 299.99)]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    #[schema(example = 100)]
    pub quantity: Option<i32>,
}

fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Product name is required")));
    }
    Ok(())
}

fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price_not_positive")
            .with_message(Cow::Borrowed("Price must be greater than 0")));
    }
    Ok(())
}

impl Product {
    /// Build a record with the given id from a create/replace body
    pub fn from_request(id: impl Into<String>, input: ProductRequest) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        }
    }

    /// Overwrite every field present in `patch`. Empty strings and zeros count as present.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}
