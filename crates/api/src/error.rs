use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taller_core::error::CoreError;
use taller_core::validation::FieldViolation;

/// Message shown when a workshop cannot be deleted because of dependents.
pub const HAS_RELATIONS_MESSAGE: &str =
    "No se puede eliminar este taller porque tiene relaciones con otros registros.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taller_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body is not usable JSON (syntax, content type).
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// Query string parameters failed to parse.
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// A path segment failed to parse.
    #[error(transparent)]
    Path(#[from] PathRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Field-level violations carry their own payload.
                CoreError::InvalidFields(fields) => return invalid_fields_response(fields),
                CoreError::HasRelations { .. } => (
                    StatusCode::BAD_REQUEST,
                    "HAS_RELATIONS",
                    HAS_RELATIONS_MESSAGE.to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Extractor rejections ---
            AppError::Json(rejection) => {
                (rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            AppError::Query(rejection) => {
                (rejection.status(), "INVALID_QUERY", rejection.body_text())
            }
            AppError::Path(rejection) => {
                (rejection.status(), "INVALID_PATH", rejection.body_text())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn invalid_fields_response(fields: &[FieldViolation]) -> Response {
    let body = json!({
        "error": "Los datos enviados no son válidos.",
        "code": "VALIDATION_ERROR",
        "fields": fields,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (23505) map to 409.
/// - Check constraint violations (23514) map to 400; validation normally
///   catches these first.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                Some("23514") => (
                    StatusCode::BAD_REQUEST,
                    "CONSTRAINT_VIOLATION",
                    format!("Value violates check constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
