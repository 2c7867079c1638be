use crate::domain::{Field, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterName(String);

impl SubmitterName {
    pub fn parse(s: String) -> Result<SubmitterName, ValidationError> {
        if s.trim().is_empty() {
            Err(ValidationError::required(Field::Name))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
