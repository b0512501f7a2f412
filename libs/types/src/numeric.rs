//! Line-item quantities
//!
//! A quantity is a whole number of units, always at least one. Totals are
//! accumulated in `u64` so that summing many `u32` quantities cannot overflow
//! at any realistic input size.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RecordError;

/// Positive whole-unit quantity of one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a raw quantity. Zero, negative, and out-of-range values are
    /// rejected.
    pub fn try_new(raw: i64) -> Result<Self, RecordError> {
        if raw < 1 || raw > u32::MAX as i64 {
            return Err(RecordError::NonPositiveQuantity { quantity: raw });
        }
        Ok(Self(raw as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Widened value for accumulation.
    pub fn as_u64(&self) -> u64 {
        self.0 as u64
    }
}

impl TryFrom<i64> for Quantity {
    type Error = RecordError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::try_new(raw)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
