//! Time 100 rounds of generating and sorting an array of random floats.
//!
//! Run with: cargo run --example simple_measure

use execution_timer::{DurationFilter, ExecutionTimer, MatchCondition};

fn main() {
    let timer = ExecutionTimer::default();

    for _ in 0..100 {
        timer.mark("ARRAY INIT");
        let mut values: Vec<f64> = (0..1000).map(|_| rand::random::<f64>()).collect();

        timer.mark("SORT BEGIN");
        values.sort_by(f64::total_cmp);
        timer.mark("SORT END");
    }

    let sorting = DurationFilter::start_label(MatchCondition::Exact("SORT BEGIN".into()));
    let total = timer.sum_durations(&sorting);
    let stats = timer.stats(&sorting);

    println!("Sorting 100 arrays with 1000 doubles took: {total:.6} seconds");
    println!(
        "Minimum sorting time: {:.6} seconds",
        stats.map_or(0.0, |s| s.min)
    );
    println!(
        "Maximum sorting time: {:.6} seconds",
        stats.map_or(0.0, |s| s.max)
    );
}
