//! Period summaries
//!
//! Rolls up the records that fall inside a [`DateRange`]: headline
//! totals, every item ranked by quantity, and a per-day breakdown. A week
//! is `DateRange::week_starting(monday)`.

use order_types::order::OrderRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Aggregator, ItemRanking};
use crate::range::DateRange;
use crate::timeseries::{build_daily_series, DailyCount};

/// Totals for the records inside one date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub total_orders: usize,
    /// Distinct phones across the whole period.
    pub unique_customers: usize,
    pub total_quantity: u64,
    /// Every item in the period, by descending quantity.
    pub top_items: Vec<ItemRanking>,
    /// Days with at least one order, ascending.
    pub daily: Vec<DailyCount>,
}

impl Aggregator {
    /// Summary of the records dated inside `range`.
    pub fn period_summary(&self, records: &[OrderRecord], range: &DateRange) -> PeriodSummary {
        let selected = range.select(records);
        let stats = self.dashboard_stats(&selected);

        debug!(
            records = records.len(),
            selected = selected.len(),
            "Built period summary"
        );

        PeriodSummary {
            range: *range,
            total_orders: stats.total_orders,
            unique_customers: stats.unique_customers,
            total_quantity: stats.total_quantity,
            top_items: self.item_ranking(&selected, i64::MAX),
            daily: build_daily_series(&selected),
        }
    }
}

/// Period summary with exact item-name grouping.
pub fn build_period_summary(records: &[OrderRecord], range: &DateRange) -> PeriodSummary {
    Aggregator::default().period_summary(records, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use order_types::customer::Phone;
    use order_types::order::LineItem;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn order(phone: &str, items: &[(&str, i64)], day: u32) -> OrderRecord {
        OrderRecord::new(
            "Customer",
            Phone::parse(phone).unwrap(),
            items
                .iter()
                .map(|(item, qty)| LineItem::new(*item, *qty).unwrap())
                .collect(),
            "10:00 AM",
            d(day),
        )
        .unwrap()
    }

    #[test]
    fn test_week_summary() {
        let records = vec![
            order("9999999999", &[("Shirt", 4)], 3),
            order("9999999999", &[("Jeans", 2), ("Shirt", 1)], 4),
            order("8888888888", &[("Saree", 6)], 4),
            order("7777777777", &[("Kurta", 9)], 6),
            order("6666666666", &[("Shirt", 50)], 11),
        ];

        let summary = build_period_summary(&records, &DateRange::week_starting(d(4)));

        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.unique_customers, 3);
        assert_eq!(summary.total_quantity, 18);

        let ranked: Vec<(&str, u64)> = summary
            .top_items
            .iter()
            .map(|r| (r.item.as_str(), r.count))
            .collect();
        assert_eq!(ranked, vec![("Kurta", 9), ("Saree", 6), ("Jeans", 2), ("Shirt", 1)]);

        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.daily[0].date, d(4));
        assert_eq!(summary.daily[0].orders, 2);
        assert_eq!(summary.daily[0].customers, 2);
        assert_eq!(summary.daily[0].quantity, 9);
        assert_eq!(summary.daily[1].date, d(6));
    }

    #[test]
    fn test_empty_period() {
        let records = vec![order("9999999999", &[("Shirt", 4)], 3)];
        let summary = build_period_summary(&records, &DateRange::week_starting(d(10)));

        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.unique_customers, 0);
        assert_eq!(summary.total_quantity, 0);
        assert!(summary.top_items.is_empty());
        assert!(summary.daily.is_empty());
    }

    #[test]
    fn test_unbounded_range_covers_everything() {
        let records = vec![
            order("9999999999", &[("Shirt", 4)], 3),
            order("8888888888", &[("Shirt", 1)], 20),
        ];
        let summary = build_period_summary(&records, &DateRange::unbounded());
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.top_items[0].count, 5);
    }
}
