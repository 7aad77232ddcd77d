use async_trait::async_trait;

use crate::db::ProductStore;
use crate::errors::StoreError;
use crate::models::product::{NewProduct, Product, ProductPatch};

/// A store whose backend is unreachable. Every call fails.
pub struct BrokenStore;

fn offline() -> StoreError {
    sled::Error::Unsupported("backend offline".to_string()).into()
}

#[async_trait]
impl ProductStore for BrokenStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(offline())
    }

    async fn get(&self, _id: &str) -> Result<Option<Product>, StoreError> {
        Err(offline())
    }

    async fn insert(&self, _product: NewProduct) -> Result<Product, StoreError> {
        Err(offline())
    }

    async fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        Err(offline())
    }

    async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
        Err(offline())
    }
}
