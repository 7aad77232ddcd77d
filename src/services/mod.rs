pub mod auth_service;
pub mod credentials;
pub mod product_service;
