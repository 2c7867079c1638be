use crate::routes::failure_response;
use crate::text_case::{TextCase, UnknownTextCase, SAMPLE_TEXT};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

#[derive(serde::Deserialize)]
pub struct FormatRequest {
    text: String,
    case: String,
}

#[derive(serde::Serialize)]
struct FormatResponse {
    output: String,
}

#[derive(serde::Serialize)]
struct CaseDescription {
    id: &'static str,
    name: &'static str,
    example: String,
}

impl ResponseError for UnknownTextCase {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        failure_response(self.status_code(), &self.to_string())
    }
}

pub async fn format_text(body: web::Json<FormatRequest>) -> Result<HttpResponse, UnknownTextCase> {
    let case: TextCase = body.case.parse()?;
    Ok(HttpResponse::Ok().json(FormatResponse {
        output: case.convert(&body.text),
    }))
}

pub async fn list_cases() -> HttpResponse {
    let cases: Vec<CaseDescription> = TextCase::ALL
        .iter()
        .map(|case| CaseDescription {
            id: case.id(),
            name: case.label(),
            example: case.convert(SAMPLE_TEXT),
        })
        .collect();
    HttpResponse::Ok().json(cases)
}
