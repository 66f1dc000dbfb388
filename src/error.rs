use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not enough permissions")]
    Forbidden,

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_authenticated() -> Self {
        AppError::Unauthorized("Invalid authentication credentials".into())
    }

    /// Status and client-facing message. Constraint violations reported by the
    /// database are client errors; everything else from the store is a 500.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::DbError(err) => match err.as_database_error() {
                Some(db) if db.is_unique_violation() => duplicate(),
                Some(db) if db.is_foreign_key_violation() => missing_reference(),
                _ => internal(),
            },
            AppError::OrmError(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => missing_reference(),
                _ => internal(),
            },
            AppError::Internal(_) => internal(),
        }
    }
}

fn duplicate() -> (StatusCode, String) {
    (
        StatusCode::BAD_REQUEST,
        "A record with the same unique value already exists".into(),
    )
}

fn missing_reference() -> (StatusCode, String) {
    (
        StatusCode::BAD_REQUEST,
        "Referenced record does not exist".into(),
    )
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".into(),
    )
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            match &self {
                AppError::DbError(err) => tracing::error!(error = %err, "database error"),
                AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
                AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
                _ => {}
            }
        }

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// The first failing rule, picked in field-name order so the message is stable.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let message = fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None if err.code == "blank" => format!("{field} must not be blank"),
                    None => format!("{field} is invalid"),
                })
            })
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::BadRequest(message)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let (status, message) =
            AppError::BadRequest("Email already registered".into()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Email already registered");
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            AppError::not_authenticated().status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden.status_and_message().0,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal Server Error");
    }

    #[test]
    fn validation_failures_become_bad_requests_with_the_rule_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "password",
            validator::ValidationError::new("length")
                .with_message("password must be between 8 and 128 characters".into()),
        );
        errors.add("full_name", validator::ValidationError::new("blank"));

        let (status, message) = AppError::from(errors).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "full_name must not be blank");
    }

    #[test]
    fn orm_errors_without_a_constraint_violation_are_internal() {
        let err = AppError::OrmError(sea_orm::DbErr::RecordNotFound("x".into()));
        assert_eq!(
            err.status_and_message().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
