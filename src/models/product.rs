use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub active: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated product that has not been persisted yet. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub active: bool,
    pub image_url: String,
}

impl NewProduct {
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            active: self.active,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sparse set of field changes for a partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Overwrites the provided fields and refreshes `updated_at`.
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(active) = self.active {
            product.active = active;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        product.updated_at = now;
    }
}

/// Clients send prices and stock either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Integer value truncated toward zero. Negative or non-numeric input yields `None`.
    pub fn as_stock(&self) -> Option<u32> {
        let value = self.as_f64()?.trunc();
        if value < 0.0 || value > f64::from(u32::MAX) {
            return None;
        }
        Some(value as u32)
    }
}

/// Request body for both create and update. Every field is optional at the wire level; the
/// product service decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<NumericInput>,
    pub category: Option<String>,
    #[schema(value_type = Option<u32>)]
    pub stock: Option<NumericInput>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}
