use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::verification_client::{VerificationClient, VerificationMode};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub verification: VerificationSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    pub sender_email: Option<String>,
    pub recipient_email: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<EmailClient, reqwest::Error> {
        let timeout = self.timeout();
        let sender = configured_address("sender_email", self.sender_email);
        let recipient = configured_address("recipient_email", self.recipient_email);
        EmailClient::new(
            self.base_url,
            self.api_key,
            self.sender_name,
            sender,
            recipient,
            timeout,
        )
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct VerificationSettings {
    pub mode: VerificationMode,
    pub base_url: String,
    pub secret_key: Option<Secret<String>>,
    pub site_key: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl VerificationSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<VerificationClient, reqwest::Error> {
        let timeout = self.timeout();
        VerificationClient::new(
            self.base_url,
            self.mode,
            self.secret_key,
            self.site_key,
            timeout,
        )
    }
}

fn default_sender_name() -> String {
    "Portfolio Contact".to_string()
}

// A bad address is left out rather than refusing to start; sending then
// fails as "not configured".
fn configured_address(setting: &str, value: Option<String>) -> Option<EmailAddress> {
    let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())?;
    match EmailAddress::parse(value) {
        Ok(address) => Some(address),
        Err(e) => {
            tracing::warn!(
                setting,
                error.message = %e,
                "Ignoring an invalid email address in the configuration"
            );
            None
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    // Read the shared settings first
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_EMAIL_CLIENT__API_KEY=...` sets `Settings.email_client.api_key`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
