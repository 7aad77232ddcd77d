use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
    web::{self, ServiceConfig},
};
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::{
    config::AppConfig,
    db::{product_repository::ProductRepository, Database, ProductStore},
    handlers::api::ServerInfo,
    routes,
    services::{
        auth_service::AuthService, credentials::StaticCredentials, product_service::ProductService,
    },
    utils::auth::TokenIssuer,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
// Test-only signing secret. DO NOT re-use it anywhere.
pub const JWT_SECRET: &str = "endpoint-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: JWT_SECRET.to_string(),
        jwt_uses_default: false,
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        ..AppConfig::default()
    }
}

pub fn temp_store() -> Arc<dyn ProductStore> {
    Arc::new(ProductRepository::new(Database::in_memory().expect("temporary database")))
}

/// Registers app data and routes the same way `main` does, on top of the given store.
pub fn configure_app(store: Arc<dyn ProductStore>) -> impl FnOnce(&mut ServiceConfig) {
    configure_app_with(store, test_config())
}

pub fn configure_app_with(
    store: Arc<dyn ProductStore>,
    config: AppConfig,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let credentials =
            StaticCredentials::new(config.admin_email.clone(), config.admin_password.clone());
        let auth = AuthService::new(Arc::new(credentials), TokenIssuer::new(&config.jwt_secret));
        cfg.app_data(web::Data::new(auth))
            .app_data(web::Data::new(ProductService::new(store)))
            .app_data(web::Data::new(ServerInfo::new(&config)));
        routes::configure(cfg);
    }
}

pub fn valid_token() -> String {
    TokenIssuer::new(JWT_SECRET).issue(ADMIN_EMAIL).unwrap()
}

pub fn expired_token() -> String {
    TokenIssuer::new(JWT_SECRET)
        .issue_at(ADMIN_EMAIL, Utc::now() - Duration::hours(25))
        .unwrap()
}

pub fn foreign_token() -> String {
    TokenIssuer::new("some-other-secret").issue(ADMIN_EMAIL).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Sends the request and returns the status with the body parsed as JSON (`Null` if it isn't).
pub async fn call<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
