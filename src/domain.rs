mod contact_message;
mod contact_submission;
mod email_address;
mod submitter_name;
mod validation_error;
mod verification_token;

pub use contact_message::ContactMessage;
pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;
pub use submitter_name::SubmitterName;
pub use validation_error::{Field, Reason, ValidationError};
pub use verification_token::VerificationToken;
