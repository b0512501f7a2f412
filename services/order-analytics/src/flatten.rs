//! Flattener
//!
//! Expands nested order records into one row per (record, line item) pair,
//! the unit of tabular display.

use std::collections::HashMap;

use chrono::NaiveDate;
use order_types::ids::OrderId;
use order_types::order::OrderRecord;
use serde::{Deserialize, Serialize};

/// One (record, line item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlattenedRow {
    /// Composite of record id, line position, and item name.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub item: String,
    pub quantity: u32,
    pub time: String,
    pub date: NaiveDate,
}

/// Composite row id.
///
/// The line position keeps ids distinct when a record lists the same item
/// twice. `occurrence` counts earlier records in the same input that share
/// `record_id`; it is omitted when zero, so records with unique ids get
/// plain `{record_id}:{line}:{item}` ids.
pub fn row_id(
    record_id: OrderId,
    occurrence: usize,
    line_index: usize,
    item_name: &str,
) -> String {
    if occurrence == 0 {
        format!("{record_id}:{line_index}:{item_name}")
    } else {
        format!("{record_id}#{occurrence}:{line_index}:{item_name}")
    }
}

/// Flatten records into rows, preserving record order and, within a record,
/// line-item order.
pub fn flatten(records: &[OrderRecord]) -> Vec<FlattenedRow> {
    let capacity = records.iter().map(|r| r.line_items().len()).sum();
    let mut rows = Vec::with_capacity(capacity);
    let mut seen: HashMap<OrderId, usize> = HashMap::new();

    for record in records {
        let occurrence = seen.entry(record.id()).or_insert(0);
        let current = *occurrence;
        *occurrence += 1;

        for (index, line) in record.line_items().iter().enumerate() {
            rows.push(FlattenedRow {
                id: row_id(record.id(), current, index, line.item_name()),
                name: record.customer_name().to_string(),
                phone: record.phone().as_str().to_string(),
                item: line.item_name().to_string(),
                quantity: line.quantity().get(),
                time: record.time_of_day().to_string(),
                date: record.date(),
            });
        }
    }

    rows
}
