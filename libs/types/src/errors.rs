//! Error types for the order aggregation engine
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level analytics error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Invalid time format in record {order_id}: {source}")]
    InvalidTimeFormat {
        order_id: String,
        #[source]
        source: TimeFormatError,
    },
}

/// A record that violates the record-model invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Order has no line items")]
    EmptyLineItems,

    #[error("Quantity must be a positive integer, got {quantity}")]
    NonPositiveQuantity { quantity: i64 },

    #[error("Item name is blank")]
    BlankItemName,

    #[error("Phone must contain exactly 10 digits: {phone:?}")]
    InvalidPhone { phone: String },
}

/// A time-of-day string that cannot be read as hour + AM/PM
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Missing AM/PM designator: {input:?}")]
    MissingDesignator { input: String },

    #[error("Hour {hour} outside 1-12: {input:?}")]
    HourOutOfRange { input: String, hour: u32 },

    #[error("Minute {minute} outside 0-59: {input:?}")]
    MinuteOutOfRange { input: String, minute: u32 },

    #[error("Malformed time: {input:?}")]
    Malformed { input: String },
}
