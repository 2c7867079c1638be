use folio::configuration::get_configuration;
use folio::startup::run;
use folio::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "folio".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let config = get_configuration()
        .expect("Failed to read configuration");
    let address = format!(
        "{address}:{port}",
        address = config.application.host,
        port = config.application.port
    );
    let listener = TcpListener::bind(address)?;
    let email_client = config.email_client.client()?;
    let verification_client = config.verification.client()?;

    run(listener, email_client, verification_client)?.await?;
    Ok(())
}
