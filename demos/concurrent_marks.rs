//! Worker threads marking the phases of simulated downloads on one shared timer.
//!
//! Run with: RUST_LOG=execution_timer=debug cargo run --example concurrent_marks

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use execution_timer::{DurationFilter, ExecutionTimer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug)]
struct NotFound(String);

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found", self.0)
    }
}

fn download(name: &str) -> Result<Vec<u8>, NotFound> {
    thread::sleep(Duration::from_millis(20 + name.len() as u64 * 3));
    if name == "foobar" {
        Err(NotFound(name.to_string()))
    } else {
        Ok(name.bytes().rev().collect())
    }
}

fn download_and_parse(timer: &ExecutionTimer, name: &str) {
    let payload = timer.try_measure(
        format!("download {name} start"),
        format!("download {name} end"),
        || download(name),
    );
    match payload {
        Ok(bytes) => {
            let parsed = timer.measure(
                format!("parse {name} start"),
                format!("parse {name} end"),
                || String::from_utf8_lossy(&bytes).to_uppercase(),
            );
            timer.mark(format!("present {name}"));
            println!("{name}: {parsed}");
        }
        Err(err) => timer.mark(format!("execution error for {name}, error: {err}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let timer = Arc::new(ExecutionTimer::default());
    timer.mark("application start");

    let workers: Vec<_> = ["ditto", "foobar", "pikachu"]
        .into_iter()
        .map(|name| {
            let timer = Arc::clone(&timer);
            thread::spawn(move || download_and_parse(&timer, name))
        })
        .collect();
    timer.mark("in the middle");

    for worker in workers {
        if worker.join().is_err() {
            timer.mark("worker panicked");
        }
    }
    timer.mark("application end");

    println!("\nApplication ran {:.6} seconds", timer.total_elapsed());
    println!("Application time points:");
    for point in timer.relative_time_points() {
        println!("  {point}");
    }

    let downloads: DurationFilter = "end:regex:^download .* end$".parse()?;
    println!("\nDurations ending a download:");
    for duration in timer.durations_matching(&downloads) {
        println!("  {duration}");
    }

    println!("\n{}", timer.report().to_json_pretty()?);
    Ok(())
}
