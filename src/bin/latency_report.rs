use hdrhistogram::Histogram;
use osoms::search::{linear_search, sentinel_search};
use osoms::sort::compare_sorts;
use osoms::{synth, RecordStore, SearchQuery, MAX_RECORDS};
use std::time::Instant;

const LOOKUPS: usize = 20_000;

fn print_histogram(name: &str, histogram: &Histogram<u64>) {
    println!("\n=== {} Latency (ns) ===", name);
    println!("Samples: {}", histogram.len());
    println!("---------------------------");
    println!("Min:    {:8} ns", histogram.min());
    println!("P50:    {:8} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:8} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:8} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:8} ns", histogram.value_at_quantile(0.999));
    println!("Max:    {:8} ns", histogram.max());
    println!("Mean:   {:8.0} ns", histogram.mean());
    println!("---------------------------");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Preparing {} synthetic orders...", MAX_RECORDS);
    let records = synth::generate(7, MAX_RECORDS);
    let mut store = RecordStore::from_records(records, MAX_RECORDS)?;

    // Sorts: one run each on the same starting order
    let comparison = compare_sorts(&mut store);
    println!("\n=== Sort Timings ===");
    for stats in [comparison.insertion, comparison.quick] {
        println!(
            "{:<15} {:>10.2} ms {:>12} swaps",
            stats.algorithm.name(),
            stats.elapsed_ms(),
            stats.moves
        );
    }

    // Lookups: a spread of present keys plus some misses
    let queries: Vec<SearchQuery> = (0..LOOKUPS)
        .map(|i| {
            let record = &store.records()[(i * 7919) % store.len()];
            if i % 10 == 0 {
                SearchQuery::new(record.order_id, "Nobody")
            } else {
                SearchQuery::new(record.order_id, record.customer_name.clone())
            }
        })
        .collect();

    let mut linear = Histogram::<u64>::new_with_bounds(1, 1_000_000_000, 3)?;
    let mut sentinel = Histogram::<u64>::new_with_bounds(1, 1_000_000_000, 3)?;

    println!("\nRunning {} lookups per method...", LOOKUPS);
    for query in &queries {
        let start = Instant::now();
        std::hint::black_box(linear_search(&store, query));
        linear.saturating_record(start.elapsed().as_nanos() as u64);

        let start = Instant::now();
        std::hint::black_box(sentinel_search(&store, query));
        sentinel.saturating_record(start.elapsed().as_nanos() as u64);
    }

    print_histogram("Linear Search", &linear);
    print_histogram("Sentinel Search", &sentinel);
    Ok(())
}
