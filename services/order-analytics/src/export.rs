//! Export row sets
//!
//! Turns records and summaries into flat, export-ready rows with a fixed
//! column order. Writing those rows as Excel, CSV, or PDF is left to the
//! caller; this module fixes the logical layout and renders JSON.

use chrono::NaiveDate;
use order_types::order::OrderRecord;
use serde::{Deserialize, Serialize};

use crate::aggregate::CustomerSummary;

/// A row with a fixed set of named columns.
pub trait ExportRow: Serialize {
    /// Column headers, in output order.
    const COLUMNS: &'static [&'static str];

    /// Cell values, in the same order as [`ExportRow::COLUMNS`].
    fn cells(&self) -> Vec<String>;
}

/// One line item of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Customer Phone")]
    pub customer_phone: String,
    #[serde(rename = "Order Date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Order Time")]
    pub order_time: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

impl ExportRow for OrderDetailRow {
    const COLUMNS: &'static [&'static str] = &[
        "Order ID",
        "Customer Name",
        "Customer Phone",
        "Order Date",
        "Order Time",
        "Product Name",
        "Quantity",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.customer_name.clone(),
            self.customer_phone.clone(),
            self.order_date.format("%Y-%m-%d").to_string(),
            self.order_time.clone(),
            self.product_name.clone(),
            self.quantity.to_string(),
        ]
    }
}

/// One order with its items collapsed into a summary string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummaryRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Customer Phone")]
    pub customer_phone: String,
    #[serde(rename = "Order Date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Order Time")]
    pub order_time: String,
    #[serde(rename = "Total Items")]
    pub total_items: u64,
    #[serde(rename = "Items Summary")]
    pub items_summary: String,
}

impl ExportRow for OrderSummaryRow {
    const COLUMNS: &'static [&'static str] = &[
        "Order ID",
        "Customer Name",
        "Customer Phone",
        "Order Date",
        "Order Time",
        "Total Items",
        "Items Summary",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.customer_name.clone(),
            self.customer_phone.clone(),
            self.order_date.format("%Y-%m-%d").to_string(),
            self.order_time.clone(),
            self.total_items.to_string(),
            self.items_summary.clone(),
        ]
    }
}

/// One customer, totals plus an items summary string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummaryRow {
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Total Orders")]
    pub total_orders: usize,
    #[serde(rename = "Total Quantity")]
    pub total_quantity: u64,
    #[serde(rename = "Items Summary")]
    pub items_summary: String,
}

impl ExportRow for CustomerSummaryRow {
    const COLUMNS: &'static [&'static str] = &[
        "Customer Name",
        "Phone Number",
        "Total Orders",
        "Total Quantity",
        "Items Summary",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.phone_number.clone(),
            self.total_orders.to_string(),
            self.total_quantity.to_string(),
            self.items_summary.clone(),
        ]
    }
}

/// One item of one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerItemRow {
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
}

impl ExportRow for CustomerItemRow {
    const COLUMNS: &'static [&'static str] =
        &["Customer Name", "Phone Number", "Item Name", "Quantity"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.phone_number.clone(),
            self.item_name.clone(),
            self.quantity.to_string(),
        ]
    }
}

/// One row per line item, records in input order.
pub fn order_detail_rows(records: &[OrderRecord]) -> Vec<OrderDetailRow> {
    records
        .iter()
        .flat_map(|record| {
            record.line_items().iter().map(move |line| OrderDetailRow {
                order_id: record.id().to_string(),
                customer_name: record.customer_name().to_string(),
                customer_phone: record.phone().as_str().to_string(),
                order_date: record.date(),
                order_time: record.time_of_day().to_string(),
                product_name: line.item_name().to_string(),
                quantity: line.quantity().get(),
            })
        })
        .collect()
}

/// One row per record: `"Shirt (10), Jeans (5)"`.
pub fn order_summary_rows(records: &[OrderRecord]) -> Vec<OrderSummaryRow> {
    records
        .iter()
        .map(|record| OrderSummaryRow {
            order_id: record.id().to_string(),
            customer_name: record.customer_name().to_string(),
            customer_phone: record.phone().as_str().to_string(),
            order_date: record.date(),
            order_time: record.time_of_day().to_string(),
            total_items: record.total_quantity(),
            items_summary: record
                .line_items()
                .iter()
                .map(|line| format!("{} ({})", line.item_name(), line.quantity()))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

/// One row per customer: `"Shirt: 12, Jeans: 5"`.
pub fn customer_summary_rows(summaries: &[CustomerSummary]) -> Vec<CustomerSummaryRow> {
    summaries
        .iter()
        .map(|summary| CustomerSummaryRow {
            customer_name: summary.name.clone(),
            phone_number: summary.phone.clone(),
            total_orders: summary.total_orders,
            total_quantity: summary.total_quantity,
            items_summary: summary
                .items
                .iter()
                .map(|i| format!("{}: {}", i.item, i.quantity))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

/// One row per (customer, item), customers then items in summary order.
pub fn customer_item_rows(summaries: &[CustomerSummary]) -> Vec<CustomerItemRow> {
    summaries
        .iter()
        .flat_map(|summary| {
            summary.items.iter().map(move |i| CustomerItemRow {
                customer_name: summary.name.clone(),
                phone_number: summary.phone.clone(),
                item_name: i.item.clone(),
                quantity: i.quantity,
            })
        })
        .collect()
}

/// Render a row set as a pretty-printed JSON array keyed by column header.
pub fn to_json<T: ExportRow>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
