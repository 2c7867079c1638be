use crate::domain::{ContactSubmission, ValidationError};
use crate::email_client::{DeliveryError, DeliveryFailure, EmailClient};
use crate::routes::failure_response;
use crate::verification_client::{VerificationClient, VerificationError, VerificationFailure};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use std::fmt::Formatter;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
    verification_token: Option<String>,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        ContactSubmission::parse(form.name, form.email, form.message, form.verification_token)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveredBody {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    VerificationError(#[from] VerificationError),
    #[error(transparent)]
    ProviderError(#[from] DeliveryError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ContactError {
    pub fn user_message(&self) -> String {
        match self {
            ContactError::ValidationError(e) => e.user_message(),
            ContactError::VerificationError(e) => match e.failure {
                VerificationFailure::MissingToken => "Verification token is required",
                VerificationFailure::NotConfigured => "Verification service not configured",
                _ => "Verification failed. Please try again.",
            }
            .to_string(),
            ContactError::ProviderError(e) => match e.failure {
                DeliveryFailure::NotConfigured => "Email service not configured",
                DeliveryFailure::Auth => "Email service authentication failed",
                DeliveryFailure::BadRequest => "Invalid email data",
                DeliveryFailure::RateLimited => "Too many requests. Please try again later.",
                DeliveryFailure::Unknown => "Failed to send message. Please try again later.",
            }
            .to_string(),
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::VerificationError(e) => match e.failure {
                VerificationFailure::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            ContactError::ProviderError(e) => match e.failure {
                DeliveryFailure::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        failure_response(self.status_code(), &self.user_message())
    }
}

#[tracing::instrument(
    name = "Handling a contact submission",
    skip(form, verification_client, email_client),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn contact(
    form: web::Json<ContactForm>,
    verification_client: web::Data<VerificationClient>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = form.into_inner().try_into()?;
    tracing::Span::current()
        .record("submitter_email", &tracing::field::display(&submission.email));
    tracing::Span::current()
        .record("submitter_name", &tracing::field::display(submission.name.as_ref()));

    let message_id = forward_submission(&submission, &verification_client, &email_client).await?;
    tracing::info!(message_id = ?message_id, "Contact submission delivered");

    Ok(HttpResponse::Ok().json(DeliveredBody {
        success: true,
        message: "Message sent successfully! I'll get back to you soon.",
        message_id,
    }))
}

/// Verifies the submission's token when the mode asks for it, then makes
/// exactly one delivery attempt.
pub async fn forward_submission(
    submission: &ContactSubmission,
    verification_client: &VerificationClient,
    email_client: &EmailClient,
) -> Result<Option<String>, ContactError> {
    verification_client
        .check(submission.verification_token.as_ref())
        .await?;
    let message_id = email_client
        .send_email(
            &submission.email,
            &submission.email_subject(),
            &submission.email_html(Utc::now()),
        )
        .await?;
    Ok(message_id)
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactSettingsBody<'a> {
    email_configured: bool,
    verification: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_key: Option<&'a str>,
}

/// What the contact form needs to know to render itself. Never includes secrets.
pub async fn contact_settings(
    verification_client: web::Data<VerificationClient>,
    email_client: web::Data<EmailClient>,
) -> HttpResponse {
    HttpResponse::Ok().json(ContactSettingsBody {
        email_configured: email_client.is_configured(),
        verification: verification_client.mode().as_str(),
        site_key: verification_client.site_key(),
    })
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
