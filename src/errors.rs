use crate::domain::insights::InsightError;
use crate::domain::integrations::IntegrationError;
use crate::domain::pulse::PulseError;
use crate::domain::teams::TeamError;
use crate::domain::vault::VaultError;
use crate::outbound::db::error::Error as DatabaseError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct AppErrorResponse {
    code: u16,
    error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("auth required")]
    Unauthorized(Option<String>),

    #[error("internal server error")]
    InternalServerError,

    #[error("bad request")]
    BadRequest(Option<String>),

    #[error("not found")]
    NotFound(Option<String>),

    #[error("resource already exists")]
    Conflict(Option<String>),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unauthorized(Some(message))
            | Self::BadRequest(Some(message))
            | Self::NotFound(Some(message))
            | Self::Conflict(Some(message)) => message.clone(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        (
            status,
            Json(AppErrorResponse {
                code: status.as_u16(),
                error: self.message(),
            }),
        )
            .into_response()
    }
}

pub fn internal_error<E: std::fmt::Debug>(err: E) -> AppError {
    tracing::error!(error = ?err, "request failed");
    AppError::InternalServerError
}

pub fn bad_request<E: ToString>(err: E) -> AppError {
    AppError::BadRequest(Some(err.to_string()))
}

pub fn not_found(resource: &str) -> AppError {
    AppError::NotFound(Some(format!("{resource} not found")))
}

//------------------------------------------------------------------------------
// Extractor rejections
//------------------------------------------------------------------------------

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

//------------------------------------------------------------------------------
// Domain errors
//------------------------------------------------------------------------------

impl From<TeamError> for AppError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::Validation(_) => bad_request(err),
            TeamError::AlreadyMember => AppError::Conflict(Some(err.to_string())),
            TeamError::TeamNotFound => not_found("team"),
            TeamError::DatabaseError(_) => internal_error(err),
        }
    }
}

impl From<IntegrationError> for AppError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::Validation(_) => bad_request(err),
            IntegrationError::DatabaseError(DatabaseError::NotFound) => not_found("team"),
            IntegrationError::DatabaseError(_) => internal_error(err),
        }
    }
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::Validation(_) | InsightError::UnsupportedSource(_) => bad_request(err),
            InsightError::DatabaseError(DatabaseError::NotFound) => not_found("team"),
            InsightError::Analysis(_) | InsightError::DatabaseError(_) => internal_error(err),
        }
    }
}

impl From<PulseError> for AppError {
    fn from(err: PulseError) -> Self {
        match err {
            PulseError::Validation(_) => bad_request(err),
            PulseError::DatabaseError(DatabaseError::NotFound) => not_found("team"),
            PulseError::Insights(insight_error) => insight_error.into(),
            PulseError::DatabaseError(_) => internal_error(err),
        }
    }
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::Validation(_) => bad_request(err),
            VaultError::DatabaseError(DatabaseError::NotFound) => not_found("team"),
            VaultError::DatabaseError(_) => internal_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::AnalyzerError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StatusCode::CONFLICT,
            AppError::from(TeamError::AlreadyMember).status_code()
        );
        assert_eq!(
            StatusCode::NOT_FOUND,
            AppError::from(TeamError::TeamNotFound).status_code()
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            AppError::from(VaultError::Validation("title".to_string())).status_code()
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            AppError::from(PulseError::DatabaseError(DatabaseError::InvalidRow(
                "bad".to_string()
            )))
            .status_code()
        );
    }

    #[test]
    fn test_missing_team_reference_is_not_found() {
        let err = AppError::from(IntegrationError::DatabaseError(DatabaseError::NotFound));

        assert_eq!(StatusCode::NOT_FOUND, err.status_code());
        assert_eq!("team not found", err.message());
    }

    #[test]
    fn test_pulse_keeps_insight_error_status() {
        let err = AppError::from(PulseError::Insights(InsightError::Analysis(
            AnalyzerError::Failed("slack".to_string()),
        )));
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, err.status_code());

        let err = AppError::from(PulseError::DatabaseError(DatabaseError::NotFound));
        assert_eq!(StatusCode::NOT_FOUND, err.status_code());
    }

    #[test]
    fn test_message_prefers_detail() {
        assert_eq!(
            "invalid event: title must not be empty",
            AppError::from(VaultError::Validation("title must not be empty".to_string()))
                .message()
        );
        assert_eq!("auth required", AppError::Unauthorized(None).message());
    }
}
