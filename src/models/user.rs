use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct AdminUser {
    pub email: String,
    pub role: String,
}

impl AdminUser {
    pub fn admin(email: &str) -> Self {
        AdminUser {
            email: email.to_owned(),
            role: ADMIN_ROLE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Claims {
    pub sub: String,   // Subject (admin email)
    pub email: String, // Admin email
    pub iss: String,   // Issuer
    pub aud: String,   // Audience
    pub exp: usize,    // Expiration time
    pub iat: usize,    // Issued at
}
