use std::sync::Arc;

use tracing::info;

use crate::db::ProductStore;
use crate::errors::{ServiceError, ServiceResult, StoreError};
use crate::models::product::{NewProduct, NumericInput, Product, ProductInput, ProductPatch};
use crate::models::response::Outcome;

pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// An absent field stays absent; a present one must not be blank.
fn present_non_blank(
    value: &Option<String>,
    field: &'static str,
) -> Result<Option<String>, ServiceError> {
    match value {
        Some(_) => non_blank(value)
            .map(Some)
            .ok_or_else(|| ServiceError::MissingFields(vec![field])),
        None => Ok(None),
    }
}

fn parse_price(price: &NumericInput) -> Result<f64, ServiceError> {
    price.as_f64().filter(|p| *p > 0.0).ok_or(ServiceError::InvalidPrice)
}

fn parse_stock(stock: &NumericInput) -> Result<u32, ServiceError> {
    stock.as_stock().ok_or(ServiceError::InvalidStock)
}

fn require_id(id: &str) -> Result<&str, ServiceError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ServiceError::MissingId);
    }
    Ok(id)
}

/// Wraps a storage failure with a generic context; the cause is logged at the HTTP boundary.
fn store_failure(context: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |e| ServiceError::internal(context, e)
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        ProductService { store }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Product>> {
        let products = self.store.list().await.map_err(store_failure("Error fetching products"))?;
        Ok(Outcome::new(products, "Products retrieved successfully"))
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Product> {
        let id = require_id(id)?;
        match self.store.get(id).await.map_err(store_failure("Error fetching product"))? {
            Some(product) => Ok(Outcome::new(product, "Product retrieved successfully")),
            None => Err(ServiceError::NotFound(id.to_string())),
        }
    }

    pub async fn create(&self, input: ProductInput) -> ServiceResult<Product> {
        let price = input.price.as_ref().map(parse_price).transpose()?;
        let name = non_blank(&input.name);
        let category = non_blank(&input.category);

        let (name, price, category) = match (name, price, category) {
            (Some(name), Some(price), Some(category)) => (name, price, category),
            (name, price, category) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if price.is_none() {
                    missing.push("price");
                }
                if category.is_none() {
                    missing.push("category");
                }
                return Err(ServiceError::MissingFields(missing));
            }
        };

        let stock = input.stock.as_ref().map(parse_stock).transpose()?.unwrap_or(0);
        let new_product = NewProduct {
            name,
            description: input
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            price,
            category,
            stock,
            active: input.active.unwrap_or(true),
            image_url: input.image_url.as_deref().map(str::trim).unwrap_or_default().to_string(),
        };

        let product = self
            .store
            .insert(new_product)
            .await
            .map_err(store_failure("Error creating product"))?;
        info!(product_id = %product.id, "Product created");
        Ok(Outcome::new(product, "Product created successfully"))
    }

    pub async fn update(&self, id: &str, input: ProductInput) -> ServiceResult<Product> {
        let id = require_id(id)?;
        let patch = Self::build_patch(input)?;

        let updated = self
            .store
            .update(id, patch)
            .await
            .map_err(store_failure("Error updating product"))?;
        match updated {
            Some(product) => {
                info!(product_id = %id, "Product updated");
                Ok(Outcome::new(product, "Product updated successfully"))
            }
            None => Err(ServiceError::NotFound(id.to_string())),
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = require_id(id)?;
        if self.store.delete(id).await.map_err(store_failure("Error deleting product"))? {
            info!(product_id = %id, "Product deleted");
            Ok(Outcome::new((), "Product deleted successfully"))
        } else {
            Err(ServiceError::NotFound(id.to_string()))
        }
    }

    fn build_patch(input: ProductInput) -> Result<ProductPatch, ServiceError> {
        let price = input.price.as_ref().map(parse_price).transpose()?;
        let stock = input.stock.as_ref().map(parse_stock).transpose()?;

        let name = present_non_blank(&input.name, "name")?;
        let category = present_non_blank(&input.category, "category")?;

        Ok(ProductPatch {
            name,
            description: input.description.map(|s| s.trim().to_string()),
            price,
            category,
            stock,
            active: input.active,
            image_url: input.image_url.map(|s| s.trim().to_string()),
        })
    }
}
