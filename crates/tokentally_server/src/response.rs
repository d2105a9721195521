//! Mapping from engine outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokentally_core::ErrorBody;
use tokentally_error::{UsageError, UsageErrorKind};

/// HTTP status for a request-terminal error.
pub fn status_for(kind: &UsageErrorKind) -> StatusCode {
    match kind {
        UsageErrorKind::MalformedInput(_) | UsageErrorKind::UnsupportedModel(_) => {
            StatusCode::BAD_REQUEST
        }
        UsageErrorKind::Tokenization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        UsageErrorKind::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

/// A usage error rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub UsageError);

impl From<UsageError> for ApiError {
    fn from(err: UsageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0.kind);
        (status, Json(ErrorBody::new(self.0.kind.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&UsageErrorKind::MalformedInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&UsageErrorKind::UnsupportedModel("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&UsageErrorKind::Tokenization("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&UsageErrorKind::DeadlineExceeded(Duration::from_secs(1))),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
