//! Record model for the order aggregation engine
//!
//! Every derived view in the engine is a pure function of a collection of
//! [`order::OrderRecord`]s. This crate owns that record shape and the checks
//! that a record must pass before anything downstream may consume it.
//!
//! # Modules
//! - `ids`: Unique record identifiers (OrderId)
//! - `numeric`: Positive line-item quantities
//! - `customer`: Normalized phone numbers (customer identity)
//! - `time`: 12-hour clock times and hour-of-day buckets
//! - `order`: Order records, line items, and their raw input form
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod customer;
pub mod time;
pub mod order;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::customer::*;
    pub use crate::time::*;
    pub use crate::order::*;
    pub use crate::errors::*;
}
