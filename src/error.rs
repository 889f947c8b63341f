use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Carries the localized message shown to the client.
    #[error("{0}")]
    NotFound(&'static str),
    #[error("bad payload: {0}")]
    Payload(String),
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                tracing::debug!(msg, "not found");
                (StatusCode::NOT_FOUND, msg).into_response()
            }
            err @ (AppError::Payload(_) | AppError::Database(_)) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
