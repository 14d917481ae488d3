//! Aggregation benchmark
//!
//! Run with: cargo run --bin summary_bench --release -- --records 100000

use std::time::Instant;

use rand::Rng;
use stock_summary::{aggregate, filter_then_aggregate, Money, ProductRecord, RecordFilter};

const PROVIDERS: &[&str] = &["factory-a", "factory-b", "shopping-c"];
const SELLERS: &[&str] = &["ana", "bruno", "carla"];

fn synthetic_records(count: usize) -> Vec<ProductRecord> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|i| {
            let purchase = Money::from_cents(rng.gen_range(100..50_000));
            let sale = Money::from_cents(rng.gen_range(100..80_000));
            let provider = PROVIDERS[rng.gen_range(0..PROVIDERS.len())];

            let mut record = ProductRecord::new(format!("p-{i}"), provider, rng.gen_range(0..20), purchase, sale)
                .with_description(format!("Item {i}"));
            if rng.gen_bool(0.6) {
                record = record.with_seller(SELLERS[rng.gen_range(0..SELLERS.len())]);
            }
            if rng.gen_bool(0.4) {
                record = record.mark_sold();
            }
            record
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let record_count: usize = args
        .iter()
        .position(|a| a == "--records")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    println!("Aggregation bench - {} synthetic records", record_count);
    let records = synthetic_records(record_count);

    let start = Instant::now();
    let totals = aggregate(&records);
    let full = start.elapsed();

    let filter = RecordFilter::new().unassigned_seller().with_provider(PROVIDERS[0]);
    let start = Instant::now();
    let filtered = filter_then_aggregate(&records, |r| filter.matches(r));
    let partial = start.elapsed();

    if totals.total_quantity_in_stock + totals.total_quantity_sold != totals.total_quantity {
        anyhow::bail!("quantity partition does not add up");
    }

    println!("\n=== Bench Results ===");
    println!("Total quantity: {}", totals.total_quantity);
    println!("Total sale value: {}", totals.total_sale_value);
    println!("Aggregate: {:.2}ms", full.as_secs_f64() * 1000.0);
    println!("Filtered quantity: {}", filtered.total_quantity);
    println!("Filter + aggregate: {:.2}ms", partial.as_secs_f64() * 1000.0);
    println!(
        "Rate: {:.0} records/sec",
        record_count as f64 / full.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}
