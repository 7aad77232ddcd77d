pub mod product_repository;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::product::{NewProduct, Product, ProductPatch};

#[derive(Clone)]
pub struct Database {
    pub db: sled::Db,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, sled::Error> {
        let db = sled::open(path)?;
        Ok(Database { db })
    }

    #[allow(dead_code)]
    pub fn in_memory() -> Result<Self, sled::Error> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Database { db })
    }
}

/// Document collection holding products. Ids and timestamps are assigned by the store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError>;

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Applies the patch and returns the merged document, or `None` if the id is unknown.
    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
