//! Products Domain
//!
//! This module provides a complete domain implementation for managing an
//! in-memory product inventory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, id assignment
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let repository = InMemoryProductRepository::with_sample_data();
//! let service = ProductService::new(repository);
//!
//! // Mount under e.g. `/api/v1/products`
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::{sample_catalogue, InMemoryProductRepository};
pub use models::{Product, ProductPatch, ProductRequest};
pub use repository::ProductRepository;
pub use service::ProductService;
