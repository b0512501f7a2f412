//! Determinism and scenario tests for the analytics engine
//!
//! Validates that every derived view is a pure function of the record set:
//! identical inputs give identical outputs, and the documented scenarios
//! produce exactly the documented results.

use chrono::NaiveDate;
use order_analytics::export::{customer_summary_rows, order_detail_rows, to_json};
use order_analytics::{
    build_customer_summaries, build_dashboard_stats, build_item_ranking, build_time_series,
    flatten, present, IngestPolicy, IngesterConfig, MostOrderedItem, RecordIngester,
    SortDirection, SortKey, ViewConfig,
};
use order_types::errors::AnalyticsError;
use order_types::order::{OrderRecord, RawLineItem, RawOrder};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn raw(name: &str, phone: &str, items: &[(&str, i64)], time: &str, day: u32) -> RawOrder {
    RawOrder {
        id: None,
        customer_name: name.to_string(),
        phone: phone.to_string(),
        line_items: items
            .iter()
            .map(|(item, quantity)| RawLineItem {
                item_name: item.to_string(),
                quantity: *quantity,
            })
            .collect(),
        time_of_day: time.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
    }
}

/// Build a realistic record set through the ingestion boundary.
fn build_scenario() -> Vec<OrderRecord> {
    let batch = vec![
        raw("Raj", "9999999999", &[("Shirt", 10), ("Jeans", 5)], "10:05 AM", 1),
        raw("Raj Kumar", "99999-99999", &[("Shirt", 2)], "10:45 AM", 1),
        raw("Priya", "8888888888", &[("Saree", 3)], "02:00 PM", 1),
        raw("Anil", "7777777777", &[("Kurta", 4), ("Dupatta", 2)], "11:10 AM", 2),
        raw("Meena", "6666666666", &[("Saree", 1), ("Kurta", 1)], "03:30 PM", 2),
        raw("priya", "(888) 888-8888", &[("Dupatta", 6)], "09:00 AM", 3),
    ];

    let report = RecordIngester::new(IngesterConfig {
        policy: IngestPolicy::AbortOnFirst,
        country_code: None,
    })
    .ingest_batch(batch)
    .unwrap();
    report.accepted
}

/// Test 1: The three-record example produces exactly the documented views.
#[test]
fn test_documented_example() {
    init_tracing();
    let records: Vec<OrderRecord> = build_scenario().into_iter().take(3).collect();

    let summaries = build_customer_summaries(&records);
    assert_eq!(summaries.len(), 2);
    let raj = &summaries[0];
    assert_eq!(raj.phone, "9999999999");
    assert_eq!(raj.name, "Raj");
    assert_eq!(raj.quantity_of("Shirt"), Some(12));
    assert_eq!(raj.quantity_of("Jeans"), Some(5));
    assert_eq!(raj.items.len(), 2);
    assert_eq!(raj.total_quantity, 17);

    let top = build_item_ranking(&records, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].item, "Shirt");
    assert_eq!(top[0].count, 12);

    let series = build_time_series(&records).unwrap();
    let keys: Vec<(&str, u64)> = series
        .iter()
        .map(|b| (b.bucket_key.as_str(), b.count))
        .collect();
    assert_eq!(keys, vec![("10AM", 2), ("2PM", 1)]);
}

/// Test 2: Full scenario views.
#[test]
fn test_full_scenario() {
    init_tracing();
    let records = build_scenario();

    let stats = build_dashboard_stats(&records);
    assert_eq!(stats.total_orders, 6);
    assert_eq!(stats.unique_customers, 4);
    assert_eq!(stats.total_quantity, 34);
    assert_eq!(stats.most_ordered_item, MostOrderedItem::Item("Shirt".to_string()));

    // Shirt 12, Dupatta 8, Kurta 5, Jeans 5, Saree 4
    let ranking: Vec<(String, u64)> = build_item_ranking(&records, 10)
        .into_iter()
        .map(|r| (r.item, r.count))
        .collect();
    assert_eq!(
        ranking,
        vec![
            ("Shirt".to_string(), 12),
            ("Dupatta".to_string(), 8),
            ("Jeans".to_string(), 5),
            ("Kurta".to_string(), 5),
            ("Saree".to_string(), 4),
        ]
    );

    let series = build_time_series(&records).unwrap();
    let keys: Vec<&str> = series.iter().map(|b| b.bucket_key.as_str()).collect();
    assert_eq!(keys, vec!["9AM", "10AM", "11AM", "2PM", "3PM"]);
}

/// Test 3: Two runs over the same records produce identical serialized views.
#[test]
fn test_identical_outputs_across_runs() {
    let records = build_scenario();

    fn render(records: &[OrderRecord]) -> Vec<String> {
        let rows = flatten(records);
        let config = ViewConfig::default()
            .with_search("a")
            .sorted_by(SortKey::Quantity, SortDirection::Descending)
            .with_page_size(4);

        vec![
            serde_json::to_string(&build_customer_summaries(records)).unwrap(),
            serde_json::to_string(&build_item_ranking(records, 3)).unwrap(),
            serde_json::to_string(&build_dashboard_stats(records)).unwrap(),
            serde_json::to_string(&build_time_series(records).unwrap()).unwrap(),
            serde_json::to_string(&present(&rows, &config)).unwrap(),
            to_json(&order_detail_rows(records)).unwrap(),
            to_json(&customer_summary_rows(&build_customer_summaries(records))).unwrap(),
        ]
    }

    let first = render(&records);
    let second = render(&records);
    for (i, (a, b)) in first.iter().zip(second.iter()).enumerate() {
        assert_eq!(a, b, "View {} differs between runs", i);
    }
}

/// Test 4: No view mutates the record collection.
#[test]
fn test_views_do_not_mutate_records() {
    let records = build_scenario();
    let before = serde_json::to_string(&records).unwrap();

    let _ = build_customer_summaries(&records);
    let _ = build_dashboard_stats(&records);
    let _ = build_time_series(&records);
    let _ = present(&flatten(&records), &ViewConfig::default());

    assert_eq!(before, serde_json::to_string(&records).unwrap());
}

/// Test 5: Skip-and-continue ingestion still aggregates the valid remainder.
#[test]
fn test_bad_record_does_not_block_batch() {
    init_tracing();
    let batch = vec![
        raw("Raj", "9999999999", &[("Shirt", 10)], "10:05 AM", 1),
        raw("Ghost", "123", &[("Shirt", 50)], "10:05 AM", 1),
        raw("Priya", "8888888888", &[("Saree", -1)], "02:00 PM", 1),
        raw("Priya", "8888888888", &[("Saree", 3)], "02:00 PM", 1),
    ];

    let report = RecordIngester::with_defaults().ingest_batch(batch).unwrap();
    assert_eq!(report.rejected.len(), 2);

    let stats = build_dashboard_stats(&report.accepted);
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_quantity, 13);
}

/// Test 6: A bad time fails the series but not the other views.
#[test]
fn test_invalid_time_is_isolated() {
    let mut batch = vec![raw("Raj", "9999999999", &[("Shirt", 1)], "10:05 AM", 1)];
    batch.push(raw("Priya", "8888888888", &[("Saree", 3)], "25:00 PM", 1));
    let records = RecordIngester::with_defaults()
        .ingest_batch(batch)
        .unwrap()
        .accepted;

    assert!(matches!(
        build_time_series(&records),
        Err(AnalyticsError::InvalidTimeFormat { .. })
    ));
    assert_eq!(build_customer_summaries(&records).len(), 2);
}
