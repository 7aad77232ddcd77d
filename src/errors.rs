use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use tracing::error;

use crate::models::response::ApiResponse;

pub type ServiceResult<T> = Result<crate::models::response::Outcome<T>, ServiceError>;

pub const GENERIC_SERVER_ERROR: &str = "An unexpected error occurred on the server";

/// Every failure a service operation can report. Domain errors carry their client-facing message;
/// `Internal` keeps the underlying cause for the logs only.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Email and password are required")]
    IncompleteCredentials,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("A valid product ID must be provided")]
    MissingId,
    #[error("The following fields are required: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Price must be a number greater than 0")]
    InvalidPrice,
    #[error("Stock must be a non-negative integer")]
    InvalidStock,
    #[error("Request body is not valid JSON for this endpoint. {0}")]
    InvalidBody(String),
    #[error("No product found with ID: {0}")]
    NotFound(String),
    #[error("An authentication token must be provided")]
    TokenRequired,
    #[error("The token has expired, please log in again")]
    TokenExpired,
    #[error("The provided token is not valid")]
    TokenInvalid,
    #[error("{context}")]
    Internal { context: &'static str, cause: String },
}

impl ServiceError {
    pub fn internal(context: &'static str, cause: impl ToString) -> Self {
        ServiceError::Internal {
            context,
            cause: cause.to_string(),
        }
    }

    /// Stable machine-readable code placed in the `error` field of the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::IncompleteCredentials => "IncompleteCredentials",
            ServiceError::InvalidCredentials => "InvalidCredentials",
            ServiceError::MissingId => "MissingId",
            ServiceError::MissingFields(_) => "MissingFields",
            ServiceError::InvalidPrice => "InvalidPrice",
            ServiceError::InvalidStock => "InvalidStock",
            ServiceError::InvalidBody(_) => "InvalidBody",
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::TokenRequired => "TokenRequired",
            ServiceError::TokenExpired => "TokenExpired",
            ServiceError::TokenInvalid => "TokenInvalid",
            ServiceError::Internal { .. } => "InternalError",
        }
    }

    pub fn to_envelope(&self) -> ApiResponse<()> {
        match self {
            ServiceError::Internal { .. } => {
                ApiResponse::failure(self.kind(), GENERIC_SERVER_ERROR)
            }
            _ => ApiResponse::failure(self.kind(), self.to_string()),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::IncompleteCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingId => StatusCode::BAD_REQUEST,
            Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPrice => StatusCode::BAD_REQUEST,
            Self::InvalidStock => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TokenRequired => StatusCode::UNAUTHORIZED,
            Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::TokenInvalid => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Internal { context, cause } = self {
            error!(context = %context, cause = %cause, "Internal error while handling request");
        }
        HttpResponse::build(self.status_code()).json(self.to_envelope())
    }
}

/// Persistence failures. These never reach a client directly; services wrap them in
/// [`ServiceError::Internal`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error. {0}")]
    Backend(#[from] sled::Error),
    #[error("Could not encode document. {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("Could not decode document. {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
