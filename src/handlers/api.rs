use crate::config::AppConfig;
use crate::routes::AVAILABLE_ROUTES;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Facts about the running process that the informational endpoints report.
pub struct ServerInfo {
    pub started_at: Instant,
    pub jwt_uses_default: bool,
    pub admin_configured: bool,
}

impl ServerInfo {
    pub fn new(config: &AppConfig) -> Self {
        ServerInfo {
            started_at: Instant::now(),
            jwt_uses_default: config.jwt_uses_default,
            admin_configured: config.admin_configured(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: u64,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub jwt_configured: bool,
    pub jwt_uses_default: bool,
    pub admin_configured: bool,
}

#[derive(Serialize, ToSchema)]
pub struct EndpointMap {
    pub products: String,
    pub login: String,
    pub verify: String,
    pub health: String,
    pub docs: String,
}

#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointMap,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFoundResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub available_routes: Vec<String>,
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner and endpoint map", body = IndexResponse)
    ),
    tag = "Health"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(IndexResponse {
        message: "Products API - server running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointMap {
            products: "/api/products".to_string(),
            login: "/auth/login".to_string(),
            verify: "/auth/verify".to_string(),
            health: "/api/health".to_string(),
            docs: "/swagger-ui/".to_string(),
        },
    })
}

/// Public liveness endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(info: web::Data<ServerInfo>) -> impl Responder {
    if info.jwt_uses_default {
        warn!("Health check: Using default JWT secret - NOT SECURE FOR PRODUCTION");
    }

    // Liveness always answers 200; degraded only flags insecure or incomplete configuration
    let status = if info.jwt_uses_default || !info.admin_configured {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: info.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            jwt_configured: !info.jwt_uses_default,
            jwt_uses_default: info.jwt_uses_default,
            admin_configured: info.admin_configured,
        },
    })
}

pub async fn not_found(req: HttpRequest) -> impl Responder {
    debug!(method = %req.method(), path = %req.path(), "No route matched");
    HttpResponse::NotFound().json(RouteNotFoundResponse {
        success: false,
        error: "RouteNotFound".to_string(),
        message: format!("The route {} {} does not exist on this server", req.method(), req.path()),
        available_routes: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
    })
}
