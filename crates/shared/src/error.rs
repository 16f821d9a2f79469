use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ContactField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Delivery,
    Unexpected,
}

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please refresh the page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is empty")]
    MissingName,
    #[error("email address is missing or malformed")]
    InvalidEmail,
    #[error("message is empty")]
    MissingMessage,
}

impl ValidationError {
    pub fn field(&self) -> ContactField {
        match self {
            ValidationError::MissingName => ContactField::Name,
            ValidationError::InvalidEmail => ContactField::Email,
            ValidationError::MissingMessage => ContactField::Message,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "Please enter your name",
            ValidationError::InvalidEmail => "Please enter a valid email address",
            ValidationError::MissingMessage => "Please enter your message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("email delivery unavailable: {0}")]
    Unavailable(String),
    #[error("invalid email service configuration: {0}")]
    Configuration(String),
    #[error("email request failed: {0}")]
    Transport(String),
    #[error("email provider rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl DeliveryError {
    /// Provider and transport detail never reaches the visitor.
    pub fn user_message(&self) -> &'static str {
        "Failed to send message. Try again later."
    }
}

/// Serialisable summary of any fault that surfaced to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub code: ErrorCode,
    pub message: String,
}

impl PageError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unexpected() -> Self {
        Self::new(ErrorCode::Unexpected, UNEXPECTED_ERROR_MESSAGE)
    }
}

impl From<ValidationError> for PageError {
    fn from(value: ValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.user_message())
    }
}

impl From<&DeliveryError> for PageError {
    fn from(value: &DeliveryError) -> Self {
        Self::new(ErrorCode::Delivery, value.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_detail_is_not_part_of_the_user_message() {
        let err = DeliveryError::Rejected {
            status: 412,
            body: "The Public Key is invalid".into(),
        };
        let summary = PageError::from(&err);
        assert_eq!(summary.code, ErrorCode::Delivery);
        assert!(!summary.message.contains("Public Key"));
        assert!(err.to_string().contains("412"));
    }

    #[test]
    fn validation_errors_map_to_their_field() {
        assert_eq!(ValidationError::MissingName.field(), ContactField::Name);
        assert_eq!(ValidationError::InvalidEmail.field(), ContactField::Email);
        assert_eq!(ValidationError::MissingMessage.field(), ContactField::Message);
        assert_eq!(
            PageError::from(ValidationError::InvalidEmail).message,
            "Please enter a valid email address"
        );
    }
}
