use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Handler failures. Rendered as HTML pages, the way the real service does.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("missing or unknown auth_key")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Forbidden => (
                StatusCode::FORBIDDEN,
                Html("<!doctype html><title>403 Forbidden</title><h1>Forbidden</h1><p>Wrong credentials or missing session.</p>".to_string()),
            )
                .into_response(),
            ServiceError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Html(format!(
                    "<!doctype html><title>400 Bad Request</title><h1>Bad Request</h1><p>{message}</p>"
                )),
            )
                .into_response(),
            ServiceError::Multipart(err) => err.into_response(),
        }
    }
}
