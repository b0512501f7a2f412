//! Stress test: 100,000 generated orders
//!
//! Generates 100k orders, runs every view over them and reports timings.

use order_analytics::{
    build_customer_summaries, build_dashboard_stats, build_item_ranking, build_time_series,
    flatten, present, ViewConfig,
};
use order_simulation::{GeneratorConfig, OrderGenerator};
use std::time::Instant;

#[test]
#[ignore] // Run with: cargo test --test stress_100k -- --ignored
fn test_100k_orders() {
    let start = Instant::now();
    let records = OrderGenerator::new(GeneratorConfig::default(), 42)
        .unwrap()
        .generate(100_000)
        .unwrap();
    let generated = start.elapsed();

    let start = Instant::now();
    let stats = build_dashboard_stats(&records);
    let summaries = build_customer_summaries(&records);
    let ranking = build_item_ranking(&records, 5);
    let series = build_time_series(&records).unwrap();
    let rows = flatten(&records);
    let page = present(&rows, &ViewConfig::default().with_search("raj"));
    let analysed = start.elapsed();

    println!("\n=== Stress Test: 100k Orders ===");
    println!("Generation:    {:.2?}", generated);
    println!("Views:         {:.2?}", analysed);
    println!("Rows:          {}", rows.len());
    println!("Customers:     {}", summaries.len());
    println!("Top item:      {}", stats.most_ordered_item);
    println!("Search hits:   {}", page.total);
    println!("================================\n");

    assert_eq!(stats.total_orders, 100_000);
    assert_eq!(ranking.len(), 5);
    assert_eq!(series.iter().map(|b| b.count).sum::<u64>(), 100_000);
}
