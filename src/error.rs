/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - service 層のエラー (validation / permission / not found / collaborator) を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{
    id_codec::IdCodecError,
    image_attachment::ImageAttachmentError,
    permission::PermissionError,
    promotion::PromotionServiceError,
    validation::{FieldError, ValidationErrorMessage},
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error(transparent)]
    Validation(ValidationErrorMessage),
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message, Vec::new())
            }
            AppError::Validation(report) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                report.to_string(),
                report.errors,
            ),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found."),
                Vec::new(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
                Vec::new(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "forbidden".into(),
                Vec::new(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
                Vec::new(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PromotionServiceError> for AppError {
    fn from(e: PromotionServiceError) -> Self {
        match e {
            PromotionServiceError::Validation(report) => AppError::Validation(report),
            PromotionServiceError::Permission(PermissionError::Denied { .. }) => {
                AppError::Forbidden
            }
            PromotionServiceError::NotFound => AppError::not_found("promotion"),
            PromotionServiceError::Permission(PermissionError::Backend(_))
            | PromotionServiceError::Store(_) => {
                tracing::error!(error = ?e, "promotion service failure");
                AppError::Internal
            }
        }
    }
}

impl From<ImageAttachmentError> for AppError {
    fn from(e: ImageAttachmentError) -> Self {
        match e {
            ImageAttachmentError::Validation(report) => AppError::Validation(report),
            ImageAttachmentError::Store(err) => {
                tracing::error!(error = ?err, "image store failure");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // client supplied an id we never handed out (e.g. /promotions/{id})
            IdCodecError::Unknown => AppError::not_found("promotion"),
            _ => {
                tracing::error!(error = ?e, "id codec failure");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_carry_every_field() {
        let mut report = ValidationErrorMessage::single("title", "title is required");
        report.errors.push(FieldError {
            path: "description".into(),
            message: "description is required".into(),
        });

        let res = AppError::Validation(report).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = body_json(res).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["errors"],
            json!([
                {"path": "title", "message": "title is required"},
                {"path": "description", "message": "description is required"},
            ])
        );
    }

    #[tokio::test]
    async fn denied_permission_is_forbidden() {
        let err = PromotionServiceError::Permission(PermissionError::Denied {
            user_id: uuid::Uuid::nil(),
            role: "admin",
        });

        let res = AppError::from(err).into_response();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(body_json(res).await.get("errors").is_none());
    }

    #[test]
    fn unknown_public_id_is_not_found() {
        assert!(matches!(
            AppError::from(IdCodecError::Unknown),
            AppError::NotFound {
                resource: "promotion"
            }
        ));
    }
}
