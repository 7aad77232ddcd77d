use crate::errors::ServiceError;
use crate::models::product::{Product, ProductInput};
use crate::models::response::ApiResponse;
use crate::models::user::Claims;
use crate::services::product_service::ProductService;
use actix_web::{web, HttpResponse};
use tracing::info;

/// List every product, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products retrieved", body = Vec<Product>),
        (status = 500, description = "Storage failure")
    ),
    tag = "Products"
)]
pub async fn list_products(
    products: web::Data<ProductService>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = products.list_all().await?;
    let count = outcome.data.len();
    Ok(HttpResponse::Ok().json(ApiResponse::from(outcome).with_count(count)))
}

/// Fetch a single product
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "No product with this id")
    ),
    tag = "Products"
)]
pub async fn get_product(
    products: web::Data<ProductService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = products.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::from(outcome)))
}

/// Create a product (protected)
#[utoipa::path(
    post,
    path = "/api/products/create",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing fields, invalid price or invalid stock"),
        (status = 401, description = "Token missing or expired"),
        (status = 403, description = "Token invalid")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Products"
)]
pub async fn create_product(
    claims: web::ReqData<Claims>,
    products: web::Data<ProductService>,
    payload: web::Json<ProductInput>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = products.create(payload.into_inner()).await?;
    info!(product_id = %outcome.data.id, email = %claims.email, "Admin created product");
    Ok(HttpResponse::Created().json(ApiResponse::from(outcome)))
}

/// Partially update a product (protected)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid field values"),
        (status = 401, description = "Token missing or expired"),
        (status = 403, description = "Token invalid"),
        (status = 404, description = "No product with this id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Products"
)]
pub async fn update_product(
    claims: web::ReqData<Claims>,
    products: web::Data<ProductService>,
    id: web::Path<String>,
    payload: web::Json<ProductInput>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = products.update(&id, payload.into_inner()).await?;
    info!(product_id = %id, email = %claims.email, "Admin updated product");
    Ok(HttpResponse::Ok().json(ApiResponse::from(outcome)))
}

/// Delete a product (protected)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Token missing or expired"),
        (status = 403, description = "Token invalid"),
        (status = 404, description = "No product with this id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Products"
)]
pub async fn delete_product(
    claims: web::ReqData<Claims>,
    products: web::Data<ProductService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = products.delete(&id).await?;
    info!(product_id = %id, email = %claims.email, "Admin deleted product");
    Ok(HttpResponse::Ok().json(ApiResponse::message_only(outcome.message)))
}
