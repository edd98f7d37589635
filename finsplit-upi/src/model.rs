use std::fmt;

use finsplit_domain::Money;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpiValidationError {
    #[error("UPI ID is required")]
    Empty,
    #[error("invalid UPI ID format, expected user@provider")]
    Malformed,
    #[error("username part should be at least 3 characters")]
    UsernameTooShort,
}

/// A validated, normalized UPI ID (`username@handle`, lowercase).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UpiId {
    formatted: String,
    at: usize,
}

impl UpiId {
    /// Validates and normalizes a UPI ID.
    ///
    /// Both sides of the `@` may contain word characters, dots, and
    /// hyphens; the username needs at least three characters. The stored
    /// form is lowercased.
    pub fn parse(input: &str) -> Result<Self, UpiValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UpiValidationError::Empty);
        }

        let formatted = trimmed.to_lowercase();
        let at = formatted.find('@').ok_or(UpiValidationError::Malformed)?;
        let username = &formatted[..at];
        let handle = &formatted[at + 1..];
        if username.is_empty() || handle.is_empty() || handle.contains('@') {
            return Err(UpiValidationError::Malformed);
        }
        if !username.chars().all(is_upi_char) || !handle.chars().all(is_upi_char) {
            return Err(UpiValidationError::Malformed);
        }
        if username.chars().count() < 3 {
            return Err(UpiValidationError::UsernameTooShort);
        }

        Ok(Self { formatted, at })
    }

    pub fn as_str(&self) -> &str {
        &self.formatted
    }

    pub fn username(&self) -> &str {
        &self.formatted[..self.at]
    }

    /// The provider handle, i.e. everything after the `@`.
    pub fn handle(&self) -> &str {
        &self.formatted[self.at + 1..]
    }
}

impl fmt::Display for UpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

fn is_upi_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '-'
}

/// What is known about the provider behind a UPI handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderInfo {
    pub code: String,
    pub name: String,
    pub is_bank: bool,
    pub is_wallet: bool,
    pub is_telecom: bool,
    pub supports_qr: bool,
    pub supports_link: bool,
}

/// Everything a debtor needs to pay one settlement instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    pub payment_link: String,
    pub recipient_upi: UpiId,
    pub amount: Money,
    pub note: String,
    pub transaction_ref: String,
    pub recipient_name: String,
}
