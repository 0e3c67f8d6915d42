//! Validation result collector shared by all fields of a form

use serde::{Deserialize, Serialize};

/// Error code attached to every format failure
pub const VALIDATION_CODE: &str = "validation";

/// A single failure reported by a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Accumulates validation failures; valid iff empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a format failure for `field`
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Validation failed for '{field}': {message}");
        self.messages.push(ValidationMessage {
            field: field.to_string(),
            message,
            code: VALIDATION_CODE.to_string(),
        });
    }

    /// True when no field reported anything
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Messages reported for one field
    pub fn field_messages<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationMessage> + 'a {
        self.messages.iter().filter(move |m| m.field == field)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append everything another result collected
    pub fn merge(&mut self, other: ValidationResult) {
        self.messages.extend(other.messages);
    }
}
