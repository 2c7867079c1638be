use crate::domain::VerificationToken;
use crate::routes::error_chain_fmt;
use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// How submissions are screened by the bot-verification service.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Tokens are ignored and the service is never called.
    Disabled,
    /// A token is verified when the client sends one.
    Optional,
    /// Every submission must carry a token that the service accepts.
    Required,
}

impl VerificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMode::Disabled => "disabled",
            VerificationMode::Optional => "optional",
            VerificationMode::Required => "required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    InvalidSecret,
    ExpiredOrDuplicateToken,
    GenericFailure,
    MissingToken,
    NotConfigured,
}

impl VerificationFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationFailure::InvalidSecret => "invalid-secret",
            VerificationFailure::ExpiredOrDuplicateToken => "expired-or-duplicate-token",
            VerificationFailure::GenericFailure => "generic-failure",
            VerificationFailure::MissingToken => "missing-token",
            VerificationFailure::NotConfigured => "not-configured",
        }
    }

    /// Maps the service's `error-codes` to a failure, first known code wins.
    pub fn from_error_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        codes
            .iter()
            .find_map(|code| match code.as_ref() {
                "invalid-input-secret" | "missing-input-secret" => {
                    Some(VerificationFailure::InvalidSecret)
                }
                "timeout-or-duplicate" => Some(VerificationFailure::ExpiredOrDuplicateToken),
                _ => None,
            })
            .unwrap_or(VerificationFailure::GenericFailure)
    }
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error)]
#[error("Bot verification failed ({failure})")]
pub struct VerificationError {
    pub failure: VerificationFailure,
    #[source]
    source: anyhow::Error,
}

impl VerificationError {
    pub fn new(failure: VerificationFailure, source: anyhow::Error) -> Self {
        Self { failure, source }
    }

    fn generic(source: anyhow::Error) -> Self {
        Self::new(VerificationFailure::GenericFailure, source)
    }
}

impl fmt::Debug for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct VerificationClient {
    http_client: Client,
    base_url: String,
    mode: VerificationMode,
    secret_key: Option<Secret<String>>,
    site_key: Option<String>,
}

#[derive(serde::Serialize)]
struct SiteVerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(serde::Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl VerificationClient {
    pub fn new(
        base_url: String,
        mode: VerificationMode,
        secret_key: Option<Secret<String>>,
        site_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            mode,
            secret_key: secret_key.filter(|key| !key.expose_secret().trim().is_empty()),
            site_key: site_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn mode(&self) -> VerificationMode {
        self.mode
    }

    /// The public key the client-side widget is rendered with.
    pub fn site_key(&self) -> Option<&str> {
        self.site_key.as_deref()
    }

    /// Applies the configured mode to a submission's token.
    pub async fn check(&self, token: Option<&VerificationToken>) -> Result<(), VerificationError> {
        match (self.mode, token) {
            (VerificationMode::Disabled, _) => Ok(()),
            (VerificationMode::Optional, None) => Ok(()),
            (VerificationMode::Required, None) => Err(VerificationError::new(
                VerificationFailure::MissingToken,
                anyhow::anyhow!("The submission did not carry a verification token"),
            )),
            (_, Some(token)) => self.verify(token).await,
        }
    }

    #[tracing::instrument(name = "Verifying a submission token", skip(self, token))]
    pub async fn verify(&self, token: &VerificationToken) -> Result<(), VerificationError> {
        let secret_key = self.secret_key.as_ref().ok_or_else(|| {
            VerificationError::new(
                VerificationFailure::NotConfigured,
                anyhow::anyhow!("No verification secret key is configured"),
            )
        })?;
        let url = format!("{}/recaptcha/api/siteverify", self.base_url);
        let request_body = SiteVerifyRequest {
            secret: secret_key.expose_secret(),
            response: token.as_ref(),
        };

        let response = self
            .http_client
            .post(&url)
            .form(&request_body)
            .send()
            .await
            .context("Failed to reach the verification service")
            .map_err(VerificationError::generic)?
            .error_for_status()
            .context("The verification service answered with an error status")
            .map_err(VerificationError::generic)?;
        let body: SiteVerifyResponse = response
            .json()
            .await
            .context("Failed to decode the verification service response")
            .map_err(VerificationError::generic)?;

        if body.success {
            Ok(())
        } else {
            let failure = VerificationFailure::from_error_codes(&body.error_codes);
            Err(VerificationError::new(
                failure,
                anyhow::anyhow!(
                    "The verification service rejected the token: {:?}",
                    body.error_codes
                ),
            ))
        }
    }
}
