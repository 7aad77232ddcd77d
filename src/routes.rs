use actix_web::{error::InternalError, error::ResponseError, web};

use crate::errors::ServiceError;
use crate::handlers::{api, auth, products};
use crate::middleware::auth::AuthMiddleware;

pub const AVAILABLE_ROUTES: &[&str] = &[
    "GET /",
    "GET /api/health",
    "POST /auth/login",
    "GET /auth/verify",
    "GET /api/products",
    "GET /api/products/:id",
    "POST /api/products/create",
    "PUT /api/products/:id",
    "DELETE /api/products/:id",
];

/// Malformed or mistyped JSON bodies answer with the usual 400 envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = ServiceError::InvalidBody(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    })
}

/// Registers every route. Expects `web::Data` for `AuthService`, `ProductService` and
/// `ServerInfo` to be supplied by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(api::index))
        .route("/api/health", web::get().to(api::health))
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(auth::login))
                .route("/verify", web::get().to(auth::verify)),
        )
        // Reads are public, mutations require a bearer token
        .service(
            web::scope("/api/products")
                .route("", web::get().to(products::list_products))
                .route("/", web::get().to(products::list_products))
                .route(
                    "/create",
                    web::post().to(products::create_product).wrap(AuthMiddleware),
                )
                .route("/{id}", web::get().to(products::get_product))
                .route(
                    "/{id}",
                    web::put().to(products::update_product).wrap(AuthMiddleware),
                )
                .route(
                    "/{id}",
                    web::delete().to(products::delete_product).wrap(AuthMiddleware),
                ),
        )
        .default_service(web::to(api::not_found));
}
