//! View Engine
//!
//! Filter, sort, and page a collection of [`FlattenedRow`]s for tabular
//! display. Every call takes an explicit [`ViewConfig`]; nothing is
//! remembered between calls.
//!
//! Pipeline: filter (search text AND item AND date range) → stable sort →
//! page window. `total` is counted after filtering and before paging.

use std::cmp::Ordering;

use chrono::NaiveDate;
use order_types::customer::PHONE_DIGITS;
use serde::{Deserialize, Serialize};

use crate::flatten::FlattenedRow;
use crate::range::DateRange;

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Phone,
    Item,
    Quantity,
    Time,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Immutable description of one table view.
///
/// Built with the `with_*` / `sorted_by` / `on_page` methods, each of which
/// returns a new config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Case-insensitive substring matched against name, phone, and item.
    pub search_text: String,
    /// Exact item name; empty means any item.
    pub item_filter: String,
    pub date_range: DateRange,
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
    /// 1-based; clamped into the valid page range.
    pub page: i64,
    /// Zero is treated as one.
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            item_filter: String::new(),
            date_range: DateRange::unbounded(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewConfig {
    /// No filters, no sort, one page holding every row.
    pub fn identity() -> Self {
        Self {
            page_size: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self.page = 1;
        self
    }

    pub fn with_item_filter(mut self, item: impl Into<String>) -> Self {
        self.item_filter = item.into();
        self.page = 1;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self.page = 1;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = Some(key);
        self.sort_direction = direction;
        self
    }

    pub fn on_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Column-header click: the current key flips direction, a new key
    /// sorts ascending. Returns to the first page.
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        let direction = match self.sort_key {
            Some(current) if current == key => self.sort_direction.toggled(),
            _ => SortDirection::Ascending,
        };
        Self {
            sort_key: Some(key),
            sort_direction: direction,
            page: 1,
            ..self.clone()
        }
    }
}

/// One window of a filtered, sorted row set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub rows: Vec<FlattenedRow>,
    /// Rows matching the filters, before paging.
    pub total: usize,
    /// Page actually returned, after clamping.
    pub page: usize,
    pub page_count: usize,
}

/// Apply `config` to `rows`.
pub fn present(rows: &[FlattenedRow], config: &ViewConfig) -> Page {
    let search = SearchQuery::new(&config.search_text);
    let item_filter = config.item_filter.as_str();

    let mut matching: Vec<&FlattenedRow> = rows
        .iter()
        .filter(|row| search.matches(row))
        .filter(|row| item_filter.is_empty() || row.item == item_filter)
        .filter(|row| config.date_range.contains(row.date))
        .collect();

    if let Some(key) = config.sort_key {
        sort_rows(&mut matching, key, config.sort_direction);
    }

    let total = matching.len();
    let page_size = config.page_size.max(1);
    let page_count = total.div_ceil(page_size);
    let last_page = page_count.max(1);
    let page = usize::try_from(config.page.max(1))
        .unwrap_or(usize::MAX)
        .min(last_page);

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        rows: matching[start..end].iter().map(|row| (*row).clone()).collect(),
        total,
        page,
        page_count,
    }
}

/// Search text, prepared once per call.
struct SearchQuery {
    lowered: String,
    /// Digits of a phone-like query (`"98765 43210"`), matched against the
    /// stored ten-digit phone. A country-code prefix (`"+91 98765 43210"`)
    /// is dropped.
    phone_digits: Option<String>,
}

impl SearchQuery {
    fn new(text: &str) -> Self {
        let trimmed = text.trim();
        let looks_like_phone = trimmed.chars().any(|c| c.is_ascii_digit())
            && trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')' | '.'));

        // Digits beyond PHONE_DIGITS are a country-code prefix.
        let phone_digits = looks_like_phone.then(|| {
            let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
            match digits.len().checked_sub(PHONE_DIGITS) {
                Some(extra) if extra > 0 => digits[extra..].to_string(),
                _ => digits,
            }
        });

        Self {
            lowered: trimmed.to_lowercase(),
            phone_digits,
        }
    }

    fn matches(&self, row: &FlattenedRow) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        row.name.to_lowercase().contains(&self.lowered)
            || row.phone.to_lowercase().contains(&self.lowered)
            || row.item.to_lowercase().contains(&self.lowered)
            || self
                .phone_digits
                .as_deref()
                .is_some_and(|digits| row.phone.contains(digits))
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Number(u32),
    Date(NaiveDate),
}

fn sort_value(row: &FlattenedRow, key: SortKey) -> SortValue {
    match key {
        SortKey::Id => SortValue::Text(row.id.to_lowercase()),
        SortKey::Name => SortValue::Text(row.name.to_lowercase()),
        SortKey::Phone => SortValue::Text(row.phone.to_lowercase()),
        SortKey::Item => SortValue::Text(row.item.to_lowercase()),
        SortKey::Time => SortValue::Text(row.time.to_lowercase()),
        SortKey::Quantity => SortValue::Number(row.quantity),
        SortKey::Date => SortValue::Date(row.date),
    }
}

/// Stable in both directions: rows with equal keys keep their input order.
fn sort_rows(rows: &mut Vec<&FlattenedRow>, key: SortKey, direction: SortDirection) {
    let mut keyed: Vec<(SortValue, &FlattenedRow)> =
        rows.iter().map(|row| (sort_value(row, key), *row)).collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let cmp: Ordering = a.cmp(b);
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });

    *rows = keyed.into_iter().map(|(_, row)| row).collect();
}
