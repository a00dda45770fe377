use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Every failure the HTTP surface can report, mapped onto the JSON
/// `{"message": …}` body the frontend expects.
///
/// Upstream feed provider failures never reach this type: the feed
/// services swallow them and substitute the bundled sample dataset.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Post already saved")]
    AlreadySaved,

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Something went wrong")]
    Database(#[from] sqlx::Error),

    #[error("Something went wrong")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Something went wrong")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub fn internal(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(error))
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(..) | Self::UnknownField(..) => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateUsername | Self::AlreadySaved => StatusCode::CONFLICT,
            Self::InvalidCredential | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(..) | Self::Token(..) | Self::Internal(..) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string(),
        }))
    }
}
