//! bank — three-window bank branch on the teller_sim queueing simulator.
//!
//! ```text
//! bank [config.toml] [output-dir]
//! ```
//!
//! Without a config file the branch runs 100 ticks with preferential (A),
//! intermediate (M) and regular (B) customers.  Output lands in
//! `output/bank` unless another directory is given; set `RUST_LOG=debug` to
//! watch every tick.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ts_core::SimConfig;
use ts_driver::SimController;
use ts_sim::ResultBundle;

const DEFAULT_OUTPUT_DIR: &str = "output/bank";
const HISTORY_PREVIEW:    usize = 10;

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<ts_output::CsvWriter> {
    Ok(ts_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<ts_output::SqliteWriter> {
    Ok(ts_output::SqliteWriter::new(dir)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn print_summary(result: &ResultBundle) {
    println!(
        "{:<6} {:<16} {:>8} {:>8} {:>9}",
        "Class", "Teller", "Arrived", "Served", "Unserved"
    );
    println!("{}", "-".repeat(51));
    for s in &result.statistics {
        println!(
            "{:<6} {:<16} {:>8} {:>8} {:>9}",
            s.tag, s.teller, s.arrived, s.served, s.unserved
        );
    }
    println!("{}", "-".repeat(51));
    println!(
        "{:<6} {:<16} {:>8} {:>8} {:>9}",
        "",
        "total",
        result.total_arrived(),
        result.total_served(),
        result.total_unserved()
    );
    println!();

    println!("First {HISTORY_PREVIEW} served customers:");
    println!("{:<8} {:<6} {:>8} {:>8} {:>8}", "Id", "Class", "Arrival", "Start", "End");
    for rec in result.history.iter().take(HISTORY_PREVIEW) {
        let tag = result
            .statistics
            .get(rec.class.index())
            .map_or("?", |s| s.tag.as_str());
        let fmt_tick = |t: Option<ts_core::Tick>| t.map_or_else(|| "-".to_owned(), |t| t.0.to_string());
        println!(
            "{:<8} {:<6} {:>8} {:>8} {:>8}",
            rec.id.to_string(),
            tag,
            rec.arrival.0,
            fmt_tick(rec.service_start),
            fmt_tick(rec.service_end),
        );
    }
    if result.history.is_empty() {
        println!("  (none)");
    }
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => SimConfig::default(),
    };
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    println!("=== bank — teller_sim ===");
    println!(
        "Ticks: {}  |  Classes: {}  |  Seed: {}",
        config.total_ticks,
        config.class_count(),
        config.seed.map_or_else(|| "random".to_owned(), |s| s.to_string())
    );
    println!();

    let writer = open_writer(&out_dir)
        .with_context(|| format!("opening output in {}", out_dir.display()))?;
    let controller = SimController::new(writer);

    let t0 = Instant::now();
    let run_id = controller.start(config)?;
    controller.wait()?;
    let elapsed = t0.elapsed();
    let result = controller.result()?;

    println!(
        "{run_id} complete in {:.3} s: {} of {} ticks{}",
        elapsed.as_secs_f64(),
        result.ticks_run,
        result.total_ticks,
        if result.stopped { " (stopped)" } else { "" }
    );
    if let Some(seed) = result.seed {
        println!("Seed: {seed}");
    }
    println!();
    print_summary(&result);

    let json_path = out_dir.join("result.json");
    let file = File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &*result)?;
    tracing::info!(path = %json_path.display(), "result bundle written");

    Ok(())
}
