//! 12-hour clock times
//!
//! Order times arrive as strings such as `"10:05 AM"`. They carry no date
//! and are only ever used to place an order into an hour-of-day bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TimeFormatError;

/// AM/PM designator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::AM => "AM",
            Meridiem::PM => "PM",
        }
    }
}

/// A parsed 12-hour clock time.
///
/// Accepted syntax: `H[:MM[:SS]] AM|PM`. The designator is
/// case-insensitive and may follow the digits with or without a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl TimeOfDay {
    pub fn parse(input: &str) -> Result<Self, TimeFormatError> {
        let trimmed = input.trim();
        let upper = trimmed.to_ascii_uppercase();

        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest, Meridiem::AM)
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest, Meridiem::PM)
        } else {
            return Err(TimeFormatError::MissingDesignator {
                input: input.to_string(),
            });
        };

        let malformed = || TimeFormatError::Malformed {
            input: input.to_string(),
        };

        let parts: Vec<&str> = clock.trim_end().split(':').collect();
        if parts.len() > 3 {
            return Err(malformed());
        }

        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(parts.iter()) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            *slot = part.parse().map_err(|_| malformed())?;
        }
        let [hour, minute, second] = fields;

        if !(1..=12).contains(&hour) {
            return Err(TimeFormatError::HourOutOfRange {
                input: input.to_string(),
                hour,
            });
        }
        if minute > 59 {
            return Err(TimeFormatError::MinuteOutOfRange {
                input: input.to_string(),
                minute,
            });
        }
        if second > 59 {
            return Err(malformed());
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            meridiem,
        })
    }

    /// Hour on the 12-hour clock (1-12).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Hour on the 24-hour clock: 12AM is 0, 12PM is 12, 1PM is 13.
    pub fn hour_of_day(&self) -> u8 {
        match (self.meridiem, self.hour) {
            (Meridiem::AM, 12) => 0,
            (Meridiem::AM, h) => h,
            (Meridiem::PM, 12) => 12,
            (Meridiem::PM, h) => h + 12,
        }
    }

    /// Hour bucket label without zero padding, e.g. `"9AM"`, `"12PM"`.
    pub fn bucket_key(&self) -> String {
        format!("{}{}", self.hour, self.meridiem.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem.as_str())
    }
}
