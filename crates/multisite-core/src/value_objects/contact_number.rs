//! WhatsApp contact number and its deep link

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Longest contact number accepted, in characters
pub const MAX_CONTACT_NUMBER_LEN: usize = 32;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// A trimmed, non-empty contact number as typed by an operator.
///
/// Formatting characters (spaces, dashes, parentheses, a leading `+`) are kept
/// for display and only removed when building the deep link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Validate raw input
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContactNumber);
        }
        if trimmed.chars().count() > MAX_CONTACT_NUMBER_LEN {
            return Err(DomainError::ContactNumberTooLong {
                max: MAX_CONTACT_NUMBER_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the ASCII digits of the number
    pub fn digits(&self) -> String {
        digits_of(&self.0)
    }

    /// `https://wa.me/<digits>` link for this number
    pub fn deep_link(&self) -> String {
        whatsapp_link(&self.0)
    }
}

/// Build a WhatsApp deep link from any stored number, valid or not
pub fn whatsapp_link(number: &str) -> String {
    format!("{WHATSAPP_BASE_URL}{}", digits_of(number))
}

fn digits_of(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContactNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ContactNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
