use crate::errors::ServiceError;
use crate::models::user::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

pub const TOKEN_ISSUER: &str = "products-api";
pub const TOKEN_AUDIENCE: &str = "products-client";
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Signs and verifies HS256 bearer tokens with a single process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Create a JWT for `email`, valid for 24 hours from now
    pub fn issue(&self, email: &str) -> Result<String, ServiceError> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: email.to_owned(),
            email: email.to_owned(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (issued_at + self.lifetime).timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal("Could not sign authentication token", e))
    }

    /// Decode and validate a JWT. Expiry is reported separately from every other failure.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::TokenInvalid,
            })
    }
}
