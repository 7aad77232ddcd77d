use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::response::Outcome;
use crate::models::user::{AdminUser, Claims};
use crate::services::credentials::CredentialVerifier;
use crate::utils::auth::TokenIssuer;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub user: AdminUser,
}

pub struct AuthService {
    credentials: Arc<dyn CredentialVerifier>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialVerifier>, issuer: TokenIssuer) -> Self {
        AuthService {
            credentials,
            issuer,
        }
    }

    pub fn login(&self, email: Option<&str>, password: Option<&str>) -> ServiceResult<LoginData> {
        let (email, password) = match (email, password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => {
                warn!("Login failed: incomplete credentials");
                return Err(ServiceError::IncompleteCredentials);
            }
        };

        if !self.credentials.verify(email, password) {
            warn!(email = %email, "Login failed: invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.issuer.issue(email)?;
        info!(email = %email, "Admin logged in successfully");

        let data = LoginData {
            token,
            user: AdminUser::admin(email),
        };
        Ok(Outcome::new(data, "Authentication successful"))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        self.issuer.verify(token)
    }
}
