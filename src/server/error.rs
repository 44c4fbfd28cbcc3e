use crate::domain::model::ErrorResponse;
use crate::utils::error::{ErrorCategory, InterpretError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// HTTP-layer wrapper around `InterpretError`.
#[derive(Debug)]
pub struct ApiError(pub InterpretError);

impl From<InterpretError> for ApiError {
    fn from(err: InterpretError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0.category() {
            ErrorCategory::Input => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: self.0.user_friendly_message(),
                    details: None,
                },
            ),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!("❌ Unexpected fault while interpreting: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Erreur lors de l'interprétation du tirage".to_string(),
                        details: Some(self.0.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: InterpretError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(InterpretError::validation("missing past")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_maps_to_500() {
        assert_eq!(
            status_of(InterpretError::internal("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(InterpretError::ConfigError {
                message: "bad".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
