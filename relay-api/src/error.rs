use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Request body is not a parseable email")]
    UnparseableEmail,

    #[error("Missing or invalid relay token")]
    Unauthorized,

    #[error("Telegram delivery failed: {0}")]
    Delivery(String),

    #[error("Telegram is not configured")]
    NotConfigured,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UnparseableEmail => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::Delivery(_) => StatusCode::BAD_GATEWAY,
            RelayError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
