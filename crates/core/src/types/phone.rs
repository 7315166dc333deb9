//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty after trimming.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a non-digit character.
    #[error("phone number may only contain digits and an optional leading +")]
    InvalidCharacter,
    /// The digit count is outside the accepted range.
    #[error("phone number must have between {min} and {max} digits")]
    BadLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// A recipient or profile phone number.
///
/// Accepts local (`0912345678`) and international (`+84912345678`) forms.
/// Spaces and dots commonly typed between groups are stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 9;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 12;

    /// Parse a `Phone` from user input.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input is empty, contains characters
    /// other than digits/separators/a leading +, or has a digit count
    /// outside 9..=12.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c == ' ' || c == '.' || c == '-' {
                // separator, dropped
            } else {
                return Err(PhoneError::InvalidCharacter);
            }
        }

        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        let normalized = if trimmed.starts_with('+') {
            format!("+{digits}")
        } else {
            digits
        };

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_form() {
        let phone = Phone::parse("0912 345 678").expect("valid");
        assert_eq!(phone.as_str(), "0912345678");
    }

    #[test]
    fn test_international_form() {
        let phone = Phone::parse("+84 912.345.678").expect("valid");
        assert_eq!(phone.as_str(), "+84912345678");
    }

    #[test]
    fn test_empty_after_trim() {
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_rejects_letters() {
        assert_eq!(Phone::parse("09abc12345"), Err(PhoneError::InvalidCharacter));
    }

    #[test]
    fn test_rejects_short_and_long() {
        assert!(matches!(
            Phone::parse("12345"),
            Err(PhoneError::BadLength { .. })
        ));
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::BadLength { .. })
        ));
    }
}
