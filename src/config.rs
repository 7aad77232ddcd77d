use std::env;

use tracing::warn;

use crate::errors::ConfigError;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "./data/products.db";

/// Process-wide settings, read once at startup and shared read-only afterwards.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub jwt_secret: String,
    /// True when `JWT_SECRET` was not set and the development default is in use.
    pub jwt_uses_default: bool,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_uses_default: true,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "PORT",
                    value,
                })?,
            Err(_) => defaults.port,
        };
        let db_path = env::var("DB_PATH").unwrap_or(defaults.db_path);

        let (jwt_secret, jwt_uses_default) = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                let is_default = secret == DEFAULT_JWT_SECRET;
                (secret, is_default)
            }
            _ => {
                warn!(
                    "JWT_SECRET not set, using development default - NOT SECURE FOR PRODUCTION"
                );
                (defaults.jwt_secret, true)
            }
        };

        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());
        if admin_email.is_none() || admin_password.is_none() {
            warn!("ADMIN_EMAIL or ADMIN_PASSWORD is not set. Login is disabled");
        }

        Ok(AppConfig {
            host,
            port,
            db_path,
            jwt_secret,
            jwt_uses_default,
            admin_email,
            admin_password,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn admin_configured(&self) -> bool {
        self.admin_email.is_some() && self.admin_password.is_some()
    }
}
