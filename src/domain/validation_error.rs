use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Required,
    Format,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::Format => "format",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted field that was missing or malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("The {field} field failed validation ({reason})")]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub fn required(field: Field) -> Self {
        Self {
            field,
            reason: Reason::Required,
        }
    }

    pub fn format(field: Field) -> Self {
        Self {
            field,
            reason: Reason::Format,
        }
    }

    /// Text shown to the visitor who sent the form.
    pub fn user_message(&self) -> String {
        match self.reason {
            Reason::Required => format!("The {} field is required", self.field),
            Reason::Format => format!("Invalid {} format", self.field),
        }
    }
}
