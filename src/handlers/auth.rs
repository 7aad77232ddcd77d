use crate::errors::ServiceError;
use crate::middleware::auth::bearer_token;
use crate::models::response::ApiResponse;
use crate::models::user::{AdminUser, Claims};
use crate::services::auth_service::AuthService;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
    pub token_type: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: Claims,
    pub expires_at: String,
}

/// Login with the administrator credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn login(
    auth: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();
    info!(email = ?payload.email, "Login attempt");

    let outcome = auth.login(payload.email.as_deref(), payload.password.as_deref())?;
    let data = LoginResponse {
        token: outcome.data.token,
        user: outcome.data.user,
        token_type: TOKEN_TYPE.to_string(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data, outcome.message)))
}

/// Check a bearer token and echo its decoded claims
#[utoipa::path(
    get,
    path = "/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Token missing, expired or invalid")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
pub async fn verify(
    auth: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse, ServiceError> {
    let token = bearer_token(req.headers()).ok_or(ServiceError::TokenRequired)?;

    let claims = match auth.verify_token(&token) {
        Ok(claims) => claims,
        // The debug endpoint reports every token problem as 401, unlike the middleware
        Err(ServiceError::TokenInvalid) => {
            warn!("Token verification failed: invalid token");
            return Ok(HttpResponse::Unauthorized().json(ServiceError::TokenInvalid.to_envelope()));
        }
        Err(e) => {
            warn!(reason = e.kind(), "Token verification failed");
            return Err(e);
        }
    };

    let expires_at = chrono::DateTime::from_timestamp(claims.exp as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        VerifyResponse {
            valid: true,
            user: claims,
            expires_at,
        },
        "Token is valid",
    )))
}
