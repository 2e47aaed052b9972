use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::receipt::errors::ReceiptError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ReceiptError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            ReceiptError::Input(_) => (StatusCode::BAD_REQUEST, "InputError"),
            ReceiptError::Service(_) => (StatusCode::BAD_GATEWAY, "ServiceError"),
            ReceiptError::Parse(_) => (StatusCode::UNPROCESSABLE_ENTITY, "ParseError"),
            ReceiptError::Schema(_) => (StatusCode::UNPROCESSABLE_ENTITY, "SchemaError"),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.user_message().to_string(),
            }),
        )
    }
}
