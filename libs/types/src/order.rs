//! Order records
//!
//! An [`OrderRecord`] is validated once, at construction. Every field is
//! private so a record cannot drift out of its invariants afterwards:
//! at least one line item, every quantity positive, phone normalized.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::customer::Phone;
use crate::errors::RecordError;
use crate::ids::OrderId;
use crate::numeric::Quantity;

/// One purchased item inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem")]
pub struct LineItem {
    item_name: String,
    quantity: Quantity,
}

impl LineItem {
    /// The item name is kept exactly as given; only a name that is empty
    /// after trimming is rejected.
    pub fn new(item_name: impl Into<String>, quantity: i64) -> Result<Self, RecordError> {
        let item_name = item_name.into();
        if item_name.trim().is_empty() {
            return Err(RecordError::BlankItemName);
        }
        Ok(Self {
            item_name,
            quantity: Quantity::try_new(quantity)?,
        })
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// One order placed by one customer at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct OrderRecord {
    id: OrderId,
    customer_name: String,
    phone: Phone,
    line_items: Vec<LineItem>,
    time_of_day: String,
    date: NaiveDate,
}

impl OrderRecord {
    /// Create a record with a fresh id.
    pub fn new(
        customer_name: impl Into<String>,
        phone: Phone,
        line_items: Vec<LineItem>,
        time_of_day: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, RecordError> {
        Self::with_id(OrderId::new(), customer_name, phone, line_items, time_of_day, date)
    }

    /// Create a record under an id assigned elsewhere.
    pub fn with_id(
        id: OrderId,
        customer_name: impl Into<String>,
        phone: Phone,
        line_items: Vec<LineItem>,
        time_of_day: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, RecordError> {
        if line_items.is_empty() {
            return Err(RecordError::EmptyLineItems);
        }
        Ok(Self {
            id,
            customer_name: customer_name.into(),
            phone,
            line_items,
            time_of_day: time_of_day.into(),
            date,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Time as received, e.g. `"10:05 AM"`. Parsed only when bucketing.
    pub fn time_of_day(&self) -> &str {
        &self.time_of_day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Sum of every line-item quantity in this record.
    pub fn total_quantity(&self) -> u64 {
        self.line_items.iter().map(|li| li.quantity.as_u64()).sum()
    }
}

/// Line item as received from an upstream source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub item_name: String,
    pub quantity: i64,
}

/// Order record as received from an upstream source, before validation.
///
/// `id` is optional; a record without one is assigned a fresh id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub phone: String,
    #[serde(alias = "items")]
    pub line_items: Vec<RawLineItem>,
    pub time_of_day: String,
    pub date: NaiveDate,
}

impl RawOrder {
    /// Validate into an [`OrderRecord`], optionally stripping a country
    /// calling code from the phone number.
    pub fn into_record(self, country_code: Option<&str>) -> Result<OrderRecord, RecordError> {
        let phone = Phone::parse_with_country_code(&self.phone, country_code)?;
        let line_items = self
            .line_items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        OrderRecord::with_id(
            self.id.unwrap_or_default(),
            self.customer_name,
            phone,
            line_items,
            self.time_of_day,
            self.date,
        )
    }
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = RecordError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        LineItem::new(raw.item_name, raw.quantity)
    }
}

impl TryFrom<RawOrder> for OrderRecord {
    type Error = RecordError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        raw.into_record(None)
    }
}
