pub use contact::error_chain_fmt;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

pub mod contact;
pub mod health_check;
pub mod text_format;

#[derive(serde::Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
}

pub fn failure_response(status: StatusCode, error: &str) -> HttpResponse {
    HttpResponse::build(status).json(FailureBody {
        success: false,
        error,
    })
}

/// Answers bodies that are not the expected JSON with the same error shape as
/// every other failure.
pub fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error.message = %error, "Rejected a malformed JSON body");
    let response = failure_response(StatusCode::BAD_REQUEST, "Invalid request body");
    InternalError::from_response(error, response).into()
}
