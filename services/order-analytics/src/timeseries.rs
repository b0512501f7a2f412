//! Time Bucketer
//!
//! Counts orders per hour-of-day bucket (`"9AM"`, `"2PM"`, ...) and per
//! calendar day.
//!
//! Hour buckets ignore the record date: orders at 10AM on two different
//! days land in the same `"10AM"` bucket. The series is meant for
//! single-day or demo-scale views.
//!
//! Buckets are keyed by 24-hour hour-of-day in a `BTreeMap`, so the series
//! comes out in chronological order (12AM first, 11PM last) rather than in
//! string order.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use order_types::errors::AnalyticsError;
use order_types::order::OrderRecord;
use order_types::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Order count for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Hour and designator without padding, e.g. `"2PM"`.
    pub bucket_key: String,
    /// Hour on the 24-hour clock (0-23).
    pub hour_of_day: u8,
    pub count: u64,
}

/// Order count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub orders: u64,
    /// Distinct phones that ordered on this day.
    pub customers: usize,
    pub quantity: u64,
}

/// Accumulates records into hour-of-day buckets.
///
/// A record whose time cannot be parsed is refused and leaves every
/// bucket untouched.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesBuilder {
    buckets: BTreeMap<u8, TimeBucket>,
    records_seen: u64,
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record into its bucket.
    pub fn add(&mut self, record: &OrderRecord) -> Result<(), AnalyticsError> {
        let time = TimeOfDay::parse(record.time_of_day()).map_err(|source| {
            AnalyticsError::InvalidTimeFormat {
                order_id: record.id().to_string(),
                source,
            }
        })?;

        self.buckets
            .entry(time.hour_of_day())
            .or_insert_with(|| TimeBucket {
                bucket_key: time.bucket_key(),
                hour_of_day: time.hour_of_day(),
                count: 0,
            })
            .count += 1;
        self.records_seen += 1;
        Ok(())
    }

    /// Records counted so far.
    pub fn records_seen(&self) -> u64 {
        self.records_seen
    }

    /// Buckets in hour-of-day order.
    pub fn finish(self) -> Vec<TimeBucket> {
        self.buckets.into_values().collect()
    }
}

/// Hour-of-day series over every record.
///
/// Fails on the first record with an unparseable time; no partial series
/// is returned.
pub fn build_time_series(records: &[OrderRecord]) -> Result<Vec<TimeBucket>, AnalyticsError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = TimeSeriesBuilder::new();
    for record in records {
        builder.add(record)?;
    }

    debug!(records = builder.records_seen(), "Built time series");
    Ok(builder.finish())
}

/// Orders, customers and quantity per calendar day, ascending by date.
pub fn build_daily_series(records: &[OrderRecord]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, (DailyCount, HashSet<&str>)> = BTreeMap::new();
    for record in records {
        let (day, phones) = days.entry(record.date()).or_insert_with(|| {
            (
                DailyCount {
                    date: record.date(),
                    orders: 0,
                    customers: 0,
                    quantity: 0,
                },
                HashSet::new(),
            )
        });
        day.orders += 1;
        day.quantity += record.total_quantity();
        phones.insert(record.phone().as_str());
    }

    days.into_values()
        .map(|(mut day, phones)| {
            day.customers = phones.len();
            day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_types::customer::Phone;
    use order_types::errors::TimeFormatError;
    use order_types::order::LineItem;

    fn at(time: &str, day: u32) -> OrderRecord {
        OrderRecord::new(
            "Raj",
            Phone::parse("9999999999").unwrap(),
            vec![LineItem::new("Shirt", 2).unwrap()],
            time,
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        )
        .unwrap()
    }

    fn keys(series: &[TimeBucket]) -> Vec<&str> {
        series.iter().map(|b| b.bucket_key.as_str()).collect()
    }

    #[test]
    fn test_same_hour_shares_bucket() {
        let series = build_time_series(&[at("10:05 AM", 1), at("10:45 AM", 1)]).unwrap();
        assert_eq!(
            series,
            vec![TimeBucket {
                bucket_key: "10AM".to_string(),
                hour_of_day: 10,
                count: 2,
            }]
        );
    }

    #[test]
    fn test_chronological_not_string_order() {
        let series = build_time_series(&[
            at("03:10 PM", 1),
            at("02:00 PM", 1),
            at("11:30 AM", 1),
            at("09:00 AM", 1),
        ])
        .unwrap();
        assert_eq!(keys(&series), vec!["9AM", "11AM", "2PM", "3PM"]);
    }

    #[test]
    fn test_midnight_and_noon() {
        let series = build_time_series(&[
            at("12:15 PM", 1),
            at("11:59 PM", 1),
            at("12:01 AM", 1),
            at("1:00 AM", 1),
        ])
        .unwrap();
        assert_eq!(keys(&series), vec!["12AM", "1AM", "12PM", "11PM"]);
        assert_eq!(series[0].hour_of_day, 0);
        assert_eq!(series[3].hour_of_day, 23);
    }

    #[test]
    fn test_dates_are_ignored() {
        let series = build_time_series(&[at("10:05 AM", 1), at("10:05 AM", 2)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 2);
    }

    #[test]
    fn test_invalid_time_fails() {
        let bad = at("14:00", 1);
        let err = build_time_series(&[at("10:05 AM", 1), bad.clone()]).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidTimeFormat {
                order_id: bad.id().to_string(),
                source: TimeFormatError::MissingDesignator {
                    input: "14:00".to_string()
                },
            }
        );
    }

    #[test]
    fn test_builder_refusal_leaves_buckets_intact() {
        let mut builder = TimeSeriesBuilder::new();
        builder.add(&at("10:05 AM", 1)).unwrap();
        assert!(builder.add(&at("13:00 PM", 1)).is_err());
        builder.add(&at("10:50 AM", 1)).unwrap();

        assert_eq!(builder.records_seen(), 2);
        let series = builder.finish();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_time_series(&[]).unwrap(), Vec::new());
        assert!(build_daily_series(&[]).is_empty());
    }

    #[test]
    fn test_daily_series() {
        let series =
            build_daily_series(&[at("10:05 AM", 3), at("10:05 AM", 1), at("1:00 PM", 3)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(series[0].orders, 1);
        assert_eq!(series[1].orders, 2);
        assert_eq!(series[1].quantity, 4);
    }

    #[test]
    fn test_daily_series_counts_distinct_customers() {
        let other = OrderRecord::new(
            "Priya",
            Phone::parse("8888888888").unwrap(),
            vec![LineItem::new("Saree", 1).unwrap()],
            "2:00 PM",
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
        )
        .unwrap();
        let series = build_daily_series(&[
            at("10:05 AM", 3),
            other,
            at("11:00 AM", 3),
            at("9:00 AM", 4),
        ]);

        assert_eq!(series[0].orders, 3);
        assert_eq!(series[0].customers, 2);
        assert_eq!(series[1].customers, 1);
    }
}
