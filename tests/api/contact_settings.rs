use crate::helpers::{spawn_app, spawn_app_with};
use folio::verification_client::VerificationMode;

#[tokio::test]
async fn contact_settings_describe_a_configured_form() {
    let app = spawn_app().await;

    let response = app.get_contact_settings().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "emailConfigured": true,
            "verification": "optional",
            "siteKey": "test-site-key"
        })
    );
}

#[tokio::test]
async fn contact_settings_report_missing_email_configuration() {
    let app = spawn_app_with(|config| {
        config.email_client.sender_email = None;
        config.verification.mode = VerificationMode::Disabled;
        config.verification.site_key = None;
    })
    .await;

    let body: serde_json::Value = app.get_contact_settings().await.json().await.unwrap();

    assert_eq!(body["emailConfigured"], false);
    assert_eq!(body["verification"], "disabled");
    assert!(body.get("siteKey").is_none());
}
