use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moneybook_core::errors::{Error as CoreError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Core(e) => e.kind(),
            ApiError::BadRequest(_) => ErrorKind::Validation,
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InvalidMovementKind => StatusCode::BAD_REQUEST,
        ErrorKind::MovementNotFound | ErrorKind::AccountNotFound => StatusCode::NOT_FOUND,
        ErrorKind::ConstraintViolation | ErrorKind::ArithmeticOverflow => StatusCode::CONFLICT,
        ErrorKind::PersistenceFailure | ErrorKind::Configuration | ErrorKind::Unexpected => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", kind.as_str(), self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind: kind.as_str(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use moneybook_core::errors::DatabaseError;
    use moneybook_core::movements::MovementError;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = CoreError::from(MovementError::NotFound("m".into())).into();
        assert_eq!(status_for(not_found.kind()), StatusCode::NOT_FOUND);

        let bad_kind: ApiError = CoreError::from(MovementError::InvalidKind("LOAN".into())).into();
        assert_eq!(status_for(bad_kind.kind()), StatusCode::BAD_REQUEST);

        let conflict: ApiError =
            CoreError::Database(DatabaseError::ForeignKeyViolation("movements".into())).into();
        assert_eq!(status_for(conflict.kind()), StatusCode::CONFLICT);

        let overflow: ApiError = CoreError::ArithmeticOverflow("balance of A/KRW".into()).into();
        assert_eq!(status_for(overflow.kind()), StatusCode::CONFLICT);

        let failed: ApiError =
            CoreError::Database(DatabaseError::QueryFailed("disk I/O".into())).into();
        assert_eq!(status_for(failed.kind()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_is_validation() {
        let err = ApiError::BadRequest("missing field `details`".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
