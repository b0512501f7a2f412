//! Inclusive calendar-date ranges

use chrono::{Duration, NaiveDate};
use order_types::order::OrderRecord;
use serde::{Deserialize, Serialize};

/// Inclusive date range; an open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Range that admits every date.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Seven days starting at `start`, both ends inclusive.
    pub fn week_starting(start: NaiveDate) -> Self {
        Self::new(Some(start), Some(start + Duration::days(6)))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Records dated inside the range, in input order.
    pub fn select(&self, records: &[OrderRecord]) -> Vec<OrderRecord> {
        records
            .iter()
            .filter(|r| self.contains(r.date()))
            .cloned()
            .collect()
    }
}
