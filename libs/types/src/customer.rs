//! Customer identity
//!
//! A customer is identified by phone number alone. Display names are not
//! unique and may be spelled differently across orders.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RecordError;

/// Number of digits in a normalized phone number.
pub const PHONE_DIGITS: usize = 10;

/// Phone number reduced to exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Strip every non-digit character and require exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        Self::parse_with_country_code(raw, None)
    }

    /// Like [`Phone::parse`], but a leading `country_code` is dropped when
    /// the digits are exactly that code followed by ten digits
    /// (`"+91 98765 43210"` with code `"91"`).
    pub fn parse_with_country_code(
        raw: &str,
        country_code: Option<&str>,
    ) -> Result<Self, RecordError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        let digits = match country_code {
            Some(code)
                if !code.is_empty()
                    && digits.len() == code.len() + PHONE_DIGITS
                    && digits.starts_with(code) =>
            {
                digits[code.len()..].to_string()
            }
            _ => digits,
        };

        if digits.len() != PHONE_DIGITS {
            return Err(RecordError::InvalidPhone {
                phone: raw.to_string(),
            });
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = RecordError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_punctuation_is_ignored(digits in "[0-9]{10}", sep in "[ .()-]{0,3}") {
            let formatted = format!("{}{}{}", &digits[..5], sep, &digits[5..]);
            let phone = Phone::parse(&formatted).unwrap();
            prop_assert_eq!(phone.as_str(), digits.as_str());
        }
    }
}
