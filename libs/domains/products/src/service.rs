//! Product service: turns client records into repository calls

use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductPayload};
use crate::repository::ProductRepository;

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate `record` and store it under a fresh id. A client-sent `id` is ignored.
    #[instrument(skip(self, record))]
    pub async fn create_product(&self, record: &Value) -> ProductResult<Product> {
        let payload = ProductPayload::from_record(record)?;
        self.repository.create(payload).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// An unknown category yields an empty list without a storage round trip.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        match filter.resolve() {
            Some(query) => self.repository.list(query).await,
            None => Ok(Vec::new()),
        }
    }

    /// Replace every field of an existing product.
    ///
    /// Existence is checked before the record is validated, so a bad body
    /// for a missing id reports `NotFound`.
    #[instrument(skip(self, record))]
    pub async fn update_product(&self, id: i32, record: &Value) -> ProductResult<Product> {
        self.get_product(id).await?;

        let payload = ProductPayload::from_record(record)?;
        self.repository.update(id, payload).await
    }

    /// Idempotent: deleting a missing product succeeds.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(product_id = id, "Delete of absent product");
        }
        Ok(())
    }
}
