use crate::domain::EmailAddress;
use crate::routes::error_chain_fmt;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    NotConfigured,
    Auth,
    BadRequest,
    RateLimited,
    Unknown,
}

impl DeliveryFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryFailure::NotConfigured => "not configured",
            DeliveryFailure::Auth => "auth",
            DeliveryFailure::BadRequest => "bad request",
            DeliveryFailure::RateLimited => "rate limited",
            DeliveryFailure::Unknown => "unknown",
        }
    }

    /// The status code decides first; the provider's error name is only
    /// consulted for statuses without a fixed meaning.
    pub fn classify(status: u16, error_name: Option<&str>) -> Self {
        match status {
            401 => DeliveryFailure::Auth,
            400 => DeliveryFailure::BadRequest,
            429 => DeliveryFailure::RateLimited,
            _ => error_name
                .and_then(Self::from_error_name)
                .unwrap_or(DeliveryFailure::Unknown),
        }
    }

    fn from_error_name(name: &str) -> Option<Self> {
        match name {
            "missing_api_key" | "invalid_api_key" | "restricted_api_key" => {
                Some(DeliveryFailure::Auth)
            }
            "validation_error"
            | "invalid_parameter"
            | "missing_required_field"
            | "invalid_from_address" => Some(DeliveryFailure::BadRequest),
            "rate_limit_exceeded" | "daily_quota_exceeded" => Some(DeliveryFailure::RateLimited),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error)]
#[error("Failed to deliver the contact message ({failure})")]
pub struct DeliveryError {
    pub failure: DeliveryFailure,
    /// Status returned by the provider, when it answered at all.
    pub provider_status: Option<u16>,
    #[source]
    source: anyhow::Error,
}

impl DeliveryError {
    pub fn new(
        failure: DeliveryFailure,
        provider_status: Option<u16>,
        source: anyhow::Error,
    ) -> Self {
        Self {
            failure,
            provider_status,
            source,
        }
    }

    fn not_configured(setting: &str) -> Self {
        Self::new(
            DeliveryFailure::NotConfigured,
            None,
            anyhow::anyhow!("The `{}` setting of the email client is missing", setting),
        )
    }
}

impl fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    api_key: Option<Secret<String>>,
    sender_name: String,
    sender: Option<EmailAddress>,
    recipient: Option<EmailAddress>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    #[serde(alias = "messageId")]
    id: Option<String>,
}

#[derive(serde::Deserialize, Default)]
struct ProviderErrorBody {
    message: Option<String>,
    name: Option<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        api_key: Option<Secret<String>>,
        sender_name: String,
        sender: Option<EmailAddress>,
        recipient: Option<EmailAddress>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.filter(|key| !key.expose_secret().trim().is_empty()),
            sender_name,
            sender,
            recipient,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.sender.is_some() && self.recipient.is_some()
    }

    /// Sends one email to the site owner. Returns the provider's message id.
    #[tracing::instrument(
        name = "Sending an email through the provider",
        skip(self, reply_to, subject, html_content),
        fields(reply_to = %reply_to)
    )]
    pub async fn send_email(
        &self,
        reply_to: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<Option<String>, DeliveryError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| DeliveryError::not_configured("api_key"))?;
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| DeliveryError::not_configured("sender_email"))?;
        let recipient = self
            .recipient
            .as_ref()
            .ok_or_else(|| DeliveryError::not_configured("recipient_email"))?;

        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: format!("{} <{}>", self.sender_name, sender),
            to: vec![recipient.as_ref()],
            reply_to: reply_to.as_ref(),
            subject,
            html: html_content,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                DeliveryError::new(
                    DeliveryFailure::Unknown,
                    None,
                    anyhow::Error::new(e).context("Failed to reach the email provider"),
                )
            })?;

        let status = response.status();
        if status.is_success() {
            return match response.json::<SendEmailResponse>().await {
                Ok(body) => Ok(body.id),
                Err(e) => {
                    tracing::warn!(
                        error.cause_chain = ?e,
                        "The email provider accepted the email without a readable message id"
                    );
                    Ok(None)
                }
            };
        }

        let body: ProviderErrorBody = response.json().await.unwrap_or_default();
        let failure = DeliveryFailure::classify(status.as_u16(), body.name.as_deref());
        Err(DeliveryError::new(
            failure,
            Some(status.as_u16()),
            anyhow::anyhow!(
                "The email provider answered {}: {} ({})",
                status,
                body.message.as_deref().unwrap_or("no message"),
                body.name.as_deref().unwrap_or("no error name"),
            ),
        ))
    }
}
