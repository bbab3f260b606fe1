//! Compare two selection sort variants against the standard library sort.
//!
//! Run with: cargo run --example sort_measure -- --time-source cpu --trials 20

use clap::Parser;
use execution_timer::{DurationFilter, ExecutionTimer, MatchCondition, TimeSourceKind, TimerError};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type SortAction = fn(&mut [f64]);

struct SortEntry {
    label: &'static str,
    action: SortAction,
    description: &'static str,
}

static ENTRIES: [SortEntry; 3] = [
    SortEntry {
        label: "selection sort 1",
        action: selection_sort_len_in_loop,
        description: "slice length re-read in the loop condition",
    },
    SortEntry {
        label: "selection sort 2",
        action: selection_sort_cached_len,
        description: "slice length cached before the loop",
    },
    SortEntry {
        label: "system sort",
        action: system_sort,
        description: "slice::sort_by with total_cmp",
    },
];

#[derive(Debug, Parser)]
#[command(about = "Benchmark sorting algorithms with an execution timer")]
struct Args {
    /// Clock to measure with: monotonic, cpu_utilization (or cpu)
    #[arg(long, default_value = "cpu_utilization", value_parser = TimeSourceKind::parse)]
    time_source: TimeSourceKind,

    /// Length of each random array
    #[arg(long, default_value_t = 2000)]
    array_len: usize,

    /// Trials per algorithm
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// Extra filters to report, e.g. `start:prefix:system sort`
    #[arg(long = "filter", value_parser = str::parse::<DurationFilter>)]
    filters: Vec<DurationFilter>,
}

fn selection_sort_len_in_loop(a: &mut [f64]) {
    let mut i = 0;
    while i < a.len() {
        let mut min = i;
        let mut j = i + 1;
        while j < a.len() {
            if a[j] < a[min] {
                min = j;
            }
            j += 1;
        }
        a.swap(i, min);
        i += 1;
    }
}

fn selection_sort_cached_len(a: &mut [f64]) {
    let n = a.len();
    let mut i = 0;
    while i < n {
        let mut min = i;
        let mut j = i + 1;
        while j < n {
            if a[j] < a[min] {
                min = j;
            }
            j += 1;
        }
        a.swap(min, i);
        i += 1;
    }
}

fn system_sort(a: &mut [f64]) {
    a.sort_by(f64::total_cmp);
}

fn is_sorted(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

struct SortMeasure {
    timer: ExecutionTimer,
    array_len: usize,
    trials: usize,
}

impl SortMeasure {
    fn new(time_source: TimeSourceKind, array_len: usize, trials: usize) -> Self {
        Self {
            timer: ExecutionTimer::new(time_source),
            array_len,
            trials,
        }
    }

    fn measure(&self) {
        self.timer.mark("measure start");
        for entry in &ENTRIES {
            self.run_trials(entry);
        }
        self.timer.mark("measure end");
    }

    fn run_trials(&self, entry: &SortEntry) {
        for trial in 0..self.trials {
            self.timer
                .mark(format!("{} trial: {trial} array generation start", entry.label));
            let mut values: Vec<f64> = (0..self.array_len).map(|_| rand::random()).collect();
            self.timer
                .mark(format!("{} trial: {trial} array generation end", entry.label));

            self.timer.measure(
                format!("{} trial: {trial} sort execution", entry.label),
                "",
                || (entry.action)(&mut values),
            );
            assert!(is_sorted(&values), "{} trial {trial}: array not sorted", entry.label);
        }
    }

    fn array_generation_total(&self) -> f64 {
        let filter =
            DurationFilter::start_label(MatchCondition::Suffix("array generation start".into()));
        self.timer.sum_durations(&filter)
    }

    fn sort_totals(&self) -> Result<Vec<(&'static SortEntry, f64)>, TimerError> {
        ENTRIES
            .iter()
            .map(|entry| {
                let pattern = format!("^{}.*sort execution$", regex::escape(entry.label));
                let filter = DurationFilter::start_label(MatchCondition::regex(&pattern)?);
                Ok((entry, self.timer.sum_durations(&filter)))
            })
            .collect()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    info!(time_source = %args.time_source, array_len = args.array_len, trials = args.trials);

    let sort_measure = SortMeasure::new(args.time_source, args.array_len, args.trials);
    println!(
        "Sorting arrays of {} random doubles; trials: {}; clock: {}",
        args.array_len, args.trials, args.time_source
    );
    sort_measure.measure();

    println!("Measurement running time: {:.6}", sort_measure.timer.total_elapsed());
    println!(" Array generation time: {:.6}", sort_measure.array_generation_total());
    for (entry, seconds) in sort_measure.sort_totals()? {
        println!(" {}; {}; running time: {seconds:.6}", entry.label, entry.description);
    }
    for filter in &args.filters {
        println!(" [{filter}] {:.6}", sort_measure.timer.sum_durations(filter));
    }

    Ok(())
}
