mod config;
mod db;
mod errors;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;


use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::AppConfig;
use db::product_repository::ProductRepository;
use db::Database;
use dotenv::dotenv;
use handlers::api::ServerInfo;
use services::auth_service::AuthService;
use services::credentials::StaticCredentials;
use services::product_service::ProductService;
use std::env;
use std::sync::Arc;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use utils::auth::TokenIssuer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::api::index,
        handlers::api::health,
        handlers::auth::login,
        handlers::auth::verify,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
    ),
    components(
        schemas(
            handlers::api::HealthResponse,
            handlers::api::HealthChecks,
            handlers::api::IndexResponse,
            handlers::api::EndpointMap,
            handlers::auth::LoginRequest,
            handlers::auth::LoginResponse,
            handlers::auth::VerifyResponse,
            models::product::Product,
            models::product::ProductInput,
            models::user::AdminUser,
            models::user::Claims,
        )
    ),
    tags(
        (name = "Health", description = "Banner and liveness endpoints"),
        (name = "Authentication", description = "Admin login and token checks"),
        (name = "Products", description = "Product catalogue; mutations require a JWT")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by POST /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing subscriber for structured logging
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .json()
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let database = Database::new(&config.db_path).map_err(|e| {
        error!(error = %e, db_path = %config.db_path, "Failed to open database");
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    info!(db_path = %config.db_path, "Database initialized");

    let credentials =
        StaticCredentials::new(config.admin_email.clone(), config.admin_password.clone());
    let auth_service = web::Data::new(AuthService::new(
        Arc::new(credentials),
        TokenIssuer::new(&config.jwt_secret),
    ));
    let product_store = Arc::new(ProductRepository::new(database));
    let product_service = web::Data::new(ProductService::new(product_store));
    let server_info = web::Data::new(ServerInfo::new(&config));

    let bind_address = config.bind_address();
    info!(bind_address = %bind_address, "Starting products API server");
    info!("Available endpoints:");
    for route in routes::AVAILABLE_ROUTES {
        info!("   {route}");
    }
    info!(
        swagger_url = format!("http://{}/swagger-ui/", bind_address),
        "Swagger UI available"
    );

    HttpServer::new(move || {
        // Configure CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(auth_service.clone())
            .app_data(product_service.clone())
            .app_data(server_info.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Swagger UI
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
