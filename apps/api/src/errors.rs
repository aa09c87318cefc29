use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cms::CmsError;
use crate::resume::assembler::ResumeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "error": <label>, "details": <message> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("Resume generation failed: {0}")]
    Generation(String),
}

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::MissingTranslationKey(_) => AppError::Configuration(err.to_string()),
            other => AppError::Generation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid request", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                    msg.clone(),
                )
            }
            AppError::Cms(e) => {
                tracing::error!("CMS error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch content",
                    e.to_string(),
                )
            }
            AppError::Generation(msg) => {
                tracing::error!("Resume generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate PDF",
                    msg.clone(),
                )
            }
        };

        let body = Json(json!({
            "error": label,
            "details": details
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::language::Language;
    use crate::resume::render::RenderError;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_key_maps_to_configuration_error() {
        let err = AppError::from(ResumeError::MissingTranslationKey(Language::Dutch));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server configuration error");
        assert!(body["details"].as_str().unwrap().contains("ANTHROPIC_API_KEY"));
    }

    #[tokio::test]
    async fn test_other_resume_errors_map_to_generation_failure() {
        let err = AppError::from(ResumeError::Render(RenderError::Export("boom".to_string())));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate PDF");
        assert!(body["details"].as_str().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = body_of(AppError::Validation("bad lang".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request");
        assert_eq!(body["details"], "bad lang");
    }
}
