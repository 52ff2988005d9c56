use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures produced by the conversation core and the completion provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The chat session has ended. Please start a new session.")]
    SessionEnded,

    #[error("Completion provider not configured: API key missing")]
    NotConfigured,

    #[error("Empty response from completion provider")]
    EmptyResponse,

    #[error("Error with completion provider: {0}")]
    UpstreamFailure(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("LLM error: {0}")]
    LlmError(String),
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        let message = err.to_string();
        match err {
            ChatError::InvalidArgument(_) => ApiError::UnprocessableEntity(message),
            ChatError::SessionEnded => ApiError::BadRequest(message),
            ChatError::NotConfigured => ApiError::ServiceUnavailable(message),
            ChatError::EmptyResponse | ChatError::UpstreamFailure(_) => ApiError::LlmError(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::LlmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                ("NotFound", msg)
            },
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                ("BadRequest", msg)
            },
            ApiError::UnprocessableEntity(msg) => {
                tracing::warn!("Unprocessable entity: {}", msg);
                ("UnprocessableEntity", msg)
            },
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                ("ServiceUnavailable", msg)
            },
            ApiError::LlmError(msg) => {
                tracing::error!("LLM error: {}", msg);
                ("LlmError", msg)
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
