use folio::configuration::{get_configuration, Settings};
use folio::startup::run;
use folio::telemetry::{get_subscriber, init_subscriber};
use folio::verification_client::VerificationMode;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::net::TcpListener;
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub verification_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_contact(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/contact", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contact_settings(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/contact/settings", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_text_format(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/text-format", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_text_format_cases(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/text-format/cases", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Boots the server against mock third-party services. `customise` runs last,
/// so tests can switch verification modes or remove settings.
pub async fn spawn_app_with<F>(customise: F) -> TestApp
where
    F: FnOnce(&mut Settings),
{
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let verification_server = MockServer::start().await;

    let mut config = get_configuration()
        .expect("Failed to read configuration");
    config.email_client.base_url = email_server.uri();
    config.email_client.api_key = Some(Secret::new(Uuid::new_v4().to_string()));
    config.email_client.sender_email = Some("portfolio@example.com".to_string());
    config.email_client.recipient_email = Some("owner@example.com".to_string());
    config.email_client.timeout_milliseconds = 200;
    config.verification.mode = VerificationMode::Optional;
    config.verification.base_url = verification_server.uri();
    config.verification.secret_key = Some(Secret::new(Uuid::new_v4().to_string()));
    config.verification.site_key = Some("test-site-key".to_string());
    config.verification.timeout_milliseconds = 200;
    customise(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr()
        .unwrap()
        .port();

    let email_client = config.email_client
        .client()
        .expect("Failed to build the email client");
    let verification_client = config.verification
        .client()
        .expect("Failed to build the verification client");

    let server = run(
        listener,
        email_client,
        verification_client
    )
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        email_server,
        verification_server,
        api_client: reqwest::Client::new(),
    }
}
