use crate::db::{Database, ProductStore};
use crate::errors::StoreError;
use crate::models::product::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;
use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

const PRODUCTS_TREE: &str = "products";

#[derive(Debug, Encode, Decode)]
pub struct StoredProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub active: bool,
    pub image_url: String,
    pub created_at: i64, // Epoch milliseconds
    pub updated_at: i64,
}

impl From<Product> for StoredProduct {
    fn from(product: Product) -> Self {
        StoredProduct {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            active: product.active,
            image_url: product.image_url,
            created_at: product.created_at.timestamp_millis(),
            updated_at: product.updated_at.timestamp_millis(),
        }
    }
}

impl From<StoredProduct> for Product {
    fn from(stored: StoredProduct) -> Self {
        Product {
            id: stored.id,
            name: stored.name,
            description: stored.description,
            price: stored.price,
            category: stored.category,
            stock: stored.stock,
            active: stored.active,
            image_url: stored.image_url,
            created_at: from_millis(stored.created_at),
            updated_at: from_millis(stored.updated_at),
        }
    }
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}

/// Current time at the precision the store keeps, so returned documents equal what a later read
/// yields.
fn now_millis() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis())
}

fn encode_product(product: Product) -> Result<Vec<u8>, StoreError> {
    let stored = StoredProduct::from(product);
    Ok(bincode::encode_to_vec(&stored, bincode::config::standard())?)
}

fn decode_product(data: &[u8]) -> Result<Product, StoreError> {
    let (stored, _): (StoredProduct, usize) =
        bincode::decode_from_slice(data, bincode::config::standard())?;
    Ok(Product::from(stored))
}

/// `products` collection in the embedded sled database.
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    fn tree(&self) -> Result<sled::Tree, StoreError> {
        Ok(self.db.db.open_tree(PRODUCTS_TREE)?)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let tree = self.tree()?;
        let mut products = tree
            .iter()
            .values()
            .map(|value| decode_product(&value?))
            .collect::<Result<Vec<_>, StoreError>>()?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        match self.tree()?.get(id.as_bytes())? {
            Some(data) => Ok(Some(decode_product(&data)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let tree = self.tree()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let product = product.into_product(id, now_millis());

        let encoded = encode_product(product.clone())?;
        tree.insert(product.id.as_bytes(), encoded)?;
        tree.flush_async().await?;

        info!(product_id = %product.id, name = %product.name, "Product created in database");
        Ok(product)
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        let tree = self.tree()?;
        loop {
            let Some(current) = tree.get(id.as_bytes())? else {
                return Ok(None);
            };
            let mut product = decode_product(&current)?;
            patch.clone().apply_to(&mut product, now_millis());
            let encoded = encode_product(product.clone())?;

            // Swap against the record that was read so a concurrent delete stays deleted
            match tree.compare_and_swap(id.as_bytes(), Some(current), Some(encoded))? {
                Ok(()) => {
                    tree.flush_async().await?;
                    info!(product_id = %id, "Product updated in database");
                    return Ok(Some(product));
                }
                Err(_) => debug!(product_id = %id, "Product changed during update, retrying"),
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let tree = self.tree()?;
        let removed = tree.remove(id.as_bytes())?.is_some();
        if removed {
            tree.flush_async().await?;
            info!(product_id = %id, "Product deleted from database");
        }
        Ok(removed)
    }
}
