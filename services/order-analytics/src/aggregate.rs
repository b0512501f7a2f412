//! Aggregator
//!
//! Groups records by customer (phone) and by item name to produce customer
//! summaries, item rankings, item statistics, and dashboard headline
//! numbers. Every operation is a pure function of the full record set.
//!
//! Grouping is order-preserving: customers and items appear in the order
//! they were first seen, and ranking ties keep that order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use order_types::order::OrderRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label shown when there is no most-ordered item.
pub const NO_DATA_LABEL: &str = "N/A";

/// Decimal places kept for per-order averages.
const AVG_DP: u32 = 2;

/// How item names are turned into grouping keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKeyPolicy {
    /// Raw item name: case-sensitive, no trimming.
    #[default]
    Exact,
    /// Trimmed, lowercased name. The first spelling seen (trimmed) is
    /// displayed.
    TrimCasefold,
}

impl ItemKeyPolicy {
    fn key(&self, item_name: &str) -> String {
        match self {
            ItemKeyPolicy::Exact => item_name.to_string(),
            ItemKeyPolicy::TrimCasefold => item_name.trim().to_lowercase(),
        }
    }

    fn display(&self, item_name: &str) -> String {
        match self {
            ItemKeyPolicy::Exact => item_name.to_string(),
            ItemKeyPolicy::TrimCasefold => item_name.trim().to_string(),
        }
    }
}

/// Configuration for the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub item_key: ItemKeyPolicy,
}

/// Item name with an accumulated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantity {
    pub item: String,
    pub quantity: u64,
}

/// Consolidated view of one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// Name on the first record seen for this phone.
    pub name: String,
    pub phone: String,
    /// Accumulated quantity per item, in first-seen order.
    pub items: Vec<ItemQuantity>,
    pub total_quantity: u64,
    /// Number of records placed by this customer.
    pub total_orders: usize,
}

impl CustomerSummary {
    pub fn quantity_of(&self, item: &str) -> Option<u64> {
        self.items.iter().find(|i| i.item == item).map(|i| i.quantity)
    }
}

/// Item paired with its total ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRanking {
    pub item: String,
    pub count: u64,
}

/// Most ordered item, or an explicit marker that there was no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum MostOrderedItem {
    Item(String),
    NoData,
}

impl MostOrderedItem {
    pub fn as_item(&self) -> Option<&str> {
        match self {
            MostOrderedItem::Item(name) => Some(name),
            MostOrderedItem::NoData => None,
        }
    }
}

impl fmt::Display for MostOrderedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MostOrderedItem::Item(name) => write!(f, "{name}"),
            MostOrderedItem::NoData => write!(f, "{NO_DATA_LABEL}"),
        }
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Distinct phone numbers.
    pub unique_customers: usize,
    pub most_ordered_item: MostOrderedItem,
    pub total_quantity: u64,
}

impl DashboardStats {
    /// Stats of an empty record set.
    pub fn empty() -> Self {
        Self {
            total_orders: 0,
            unique_customers: 0,
            most_ordered_item: MostOrderedItem::NoData,
            total_quantity: 0,
        }
    }
}

/// Per-item statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    pub item: String,
    pub total_quantity: u64,
    /// Number of line items naming this item.
    pub order_count: usize,
    /// Distinct phone numbers that ordered this item.
    pub unique_customers: usize,
    /// `total_quantity / order_count`, rounded to two decimal places.
    pub avg_quantity_per_order: Decimal,
}

/// Insertion-ordered accumulator keyed by string.
struct OrderedTally<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> OrderedTally<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Entry for `key`, created with `init` on first sight.
    fn entry(&mut self, key: String, init: impl FnOnce() -> T) -> &mut T {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push(init());
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot]
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn into_entries(self) -> Vec<T> {
        self.entries
    }
}

/// Groups records into summaries, rankings, and statistics.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// One summary per distinct phone, in first-seen order.
    pub fn customer_summaries(&self, records: &[OrderRecord]) -> Vec<CustomerSummary> {
        if records.is_empty() {
            return Vec::new();
        }

        let policy = self.config.item_key;
        let mut customers: OrderedTally<(CustomerSummary, OrderedTally<ItemQuantity>)> =
            OrderedTally::new();

        for record in records {
            let (summary, items) = customers.entry(record.phone().as_str().to_string(), || {
                (
                    CustomerSummary {
                        name: record.customer_name().to_string(),
                        phone: record.phone().as_str().to_string(),
                        items: Vec::new(),
                        total_quantity: 0,
                        total_orders: 0,
                    },
                    OrderedTally::new(),
                )
            });

            summary.total_orders += 1;
            for line in record.line_items() {
                let quantity = line.quantity().as_u64();
                let entry = items.entry(policy.key(line.item_name()), || ItemQuantity {
                    item: policy.display(line.item_name()),
                    quantity: 0,
                });
                entry.quantity += quantity;
                summary.total_quantity += quantity;
            }
        }

        debug!(
            records = records.len(),
            customers = customers.len(),
            "Built customer summaries"
        );

        customers
            .into_entries()
            .into_iter()
            .map(|(mut summary, items)| {
                summary.items = items.into_entries();
                summary
            })
            .collect()
    }

    /// Items by descending total quantity, ties in first-seen order,
    /// truncated to `limit`. A `limit` of zero or less yields nothing.
    pub fn item_ranking(&self, records: &[OrderRecord], limit: i64) -> Vec<ItemRanking> {
        if limit <= 0 || records.is_empty() {
            return Vec::new();
        }

        let policy = self.config.item_key;
        let mut tally: OrderedTally<ItemRanking> = OrderedTally::new();
        for record in records {
            for line in record.line_items() {
                tally
                    .entry(policy.key(line.item_name()), || ItemRanking {
                        item: policy.display(line.item_name()),
                        count: 0,
                    })
                    .count += line.quantity().as_u64();
            }
        }

        let mut ranking = tally.into_entries();
        // Stable: equal counts keep first-seen order.
        ranking.sort_by(|a, b| b.count.cmp(&a.count));
        ranking.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        ranking
    }

    /// Headline numbers. The most ordered item is the top of a one-entry
    /// ranking.
    pub fn dashboard_stats(&self, records: &[OrderRecord]) -> DashboardStats {
        if records.is_empty() {
            return DashboardStats::empty();
        }

        let unique_customers = records
            .iter()
            .map(|r| r.phone().as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_quantity = records.iter().map(OrderRecord::total_quantity).sum();
        let most_ordered_item = self
            .item_ranking(records, 1)
            .into_iter()
            .next()
            .map_or(MostOrderedItem::NoData, |top| MostOrderedItem::Item(top.item));

        DashboardStats {
            total_orders: records.len(),
            unique_customers,
            most_ordered_item,
            total_quantity,
        }
    }

    /// Per-item statistics by descending total quantity (stable).
    pub fn item_analysis(&self, records: &[OrderRecord]) -> Vec<ItemStats> {
        if records.is_empty() {
            return Vec::new();
        }

        struct Acc<'a> {
            item: String,
            total_quantity: u64,
            order_count: usize,
            customers: HashSet<&'a str>,
        }

        let policy = self.config.item_key;
        let mut tally: OrderedTally<Acc<'_>> = OrderedTally::new();
        for record in records {
            for line in record.line_items() {
                let acc = tally.entry(policy.key(line.item_name()), || Acc {
                    item: policy.display(line.item_name()),
                    total_quantity: 0,
                    order_count: 0,
                    customers: HashSet::new(),
                });
                acc.total_quantity += line.quantity().as_u64();
                acc.order_count += 1;
                acc.customers.insert(record.phone().as_str());
            }
        }

        let mut stats: Vec<ItemStats> = tally
            .into_entries()
            .into_iter()
            .map(|acc| ItemStats {
                avg_quantity_per_order: (Decimal::from(acc.total_quantity)
                    / Decimal::from(acc.order_count as u64))
                .round_dp(AVG_DP),
                item: acc.item,
                total_quantity: acc.total_quantity,
                order_count: acc.order_count,
                unique_customers: acc.customers.len(),
            })
            .collect();
        stats.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        stats
    }
}

/// Customer summaries with exact item-name grouping.
pub fn build_customer_summaries(records: &[OrderRecord]) -> Vec<CustomerSummary> {
    Aggregator::default().customer_summaries(records)
}

/// Item ranking with exact item-name grouping.
pub fn build_item_ranking(records: &[OrderRecord], limit: i64) -> Vec<ItemRanking> {
    Aggregator::default().item_ranking(records, limit)
}

/// Dashboard statistics with exact item-name grouping.
pub fn build_dashboard_stats(records: &[OrderRecord]) -> DashboardStats {
    Aggregator::default().dashboard_stats(records)
}

/// Item statistics with exact item-name grouping.
pub fn build_item_analysis(records: &[OrderRecord]) -> Vec<ItemStats> {
    Aggregator::default().item_analysis(records)
}
