use crate::domain::{
    ContactMessage, EmailAddress, Field, SubmitterName, ValidationError, VerificationToken,
};
use chrono::{DateTime, Utc};

/// A contact form payload whose fields have all been checked.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub message: ContactMessage,
    pub verification_token: Option<VerificationToken>,
}

impl ContactSubmission {
    /// Every required field is checked for presence, in form order, before the
    /// email address is checked for shape.
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
        verification_token: Option<String>,
    ) -> Result<ContactSubmission, ValidationError> {
        let name = require(Field::Name, name)?;
        let email = require(Field::Email, email)?;
        let message = require(Field::Message, message)?;

        Ok(Self {
            name: SubmitterName::parse(name)?,
            email: EmailAddress::parse(email)?,
            message: ContactMessage::parse(message)?,
            verification_token: verification_token.and_then(VerificationToken::parse),
        })
    }

    pub fn email_subject(&self) -> String {
        let name: String = self
            .name
            .as_ref()
            .chars()
            .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
            .collect();
        format!("New Contact Form Message from {}", name)
    }

    pub fn email_html(&self, sent_at: DateTime<Utc>) -> String {
        let name = htmlescape::encode_minimal(self.name.as_ref());
        let email = htmlescape::encode_minimal(self.email.as_ref());
        let message = htmlescape::encode_minimal(self.message.as_ref())
            .replace("\r\n", "\n")
            .replace('\n', "<br>");

        format!(
            r#"
        <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
          <div style="background: linear-gradient(135deg, #3b82f6, #8b5cf6); padding: 30px; text-align: center;">
            <h1 style="color: white; margin: 0; font-size: 24px;">New Contact Form Message</h1>
          </div>
          <div style="padding: 30px; background: #f8fafc; border-left: 4px solid #3b82f6;">
            <h2 style="color: #1e293b; margin-top: 0;">Contact Details</h2>
            <div style="background: white; padding: 20px; border-radius: 8px; margin: 20px 0;">
              <p style="margin: 10px 0;"><strong>Name:</strong> {name}</p>
              <p style="margin: 10px 0;"><strong>Email:</strong> {email}</p>
            </div>
            <div style="background: white; padding: 20px; border-radius: 8px; margin: 20px 0;">
              <h3 style="color: #1e293b; margin-top: 0;">Message:</h3>
              <p style="line-height: 1.6; color: #475569;">{message}</p>
            </div>
            <div style="margin-top: 30px; padding: 15px; background: #e0f2fe; border-radius: 8px;">
              <p style="margin: 0; color: #0369a1; font-size: 14px;">
                <strong>Reply directly to this email to respond to {name}</strong>
              </p>
            </div>
          </div>
          <div style="padding: 20px; text-align: center; color: #64748b; font-size: 12px;">
            <p>This message was sent from your portfolio contact form.</p>
            <p>Sent on {sent_at}</p>
          </div>
        </div>
            "#,
            name = name,
            email = email,
            message = message,
            sent_at = sent_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

fn require(field: Field, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ValidationError::required(field)),
    }
}
