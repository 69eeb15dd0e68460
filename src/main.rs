use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use activity_smoother::{
    ActivitySmoother, ChartRenderer, JsonChartRenderer, NextRunBound, ProcessedRide,
    RecordingObserver, RideProcessor, RideRequest, SmoothingConfig,
};
use anyhow::Context;
use clap::Parser;
use flate2::read::GzDecoder;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "activity_smoother")]
#[command(about = "Smooth noisy activity labels of a recorded ride", long_about = None)]
struct Args {
    /// Ride upload (JSON, optionally .json.gz)
    input: PathBuf,

    /// Write the smoothed ride here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write before/after speed chart data (JSON) here
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Print per-pass reports and every correction to stderr
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Request identifier used in log lines
    #[arg(long, default_value = "cli")]
    request_id: String,

    /// JSON file with smoothing thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop samples with coordinate accuracy at or above this (meters)
    #[arg(long)]
    max_accuracy: Option<f64>,

    /// Max plausible walking speed (km/h)
    #[arg(long)]
    max_walking_speed: Option<f64>,

    /// Runs shorter than this many samples are relabelled
    #[arg(long)]
    significance_threshold: Option<usize>,

    /// Reproduce the legacy next-run bound (position < run_count - 1)
    #[arg(long, default_value_t = false)]
    legacy_next_bound: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn load_ride(path: &Path) -> anyhow::Result<RideRequest> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    if path.extension().map(|e| e == "gz").unwrap_or(false) {
        let reader = BufReader::new(GzDecoder::new(file));
        Ok(serde_json::from_reader(reader)?)
    } else {
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn build_config(args: &Args) -> anyhow::Result<SmoothingConfig> {
    let mut config = match &args.config {
        Some(path) => SmoothingConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SmoothingConfig::default(),
    };
    if let Some(v) = args.max_accuracy {
        config.max_coordinate_accuracy_m = v;
    }
    if let Some(v) = args.max_walking_speed {
        config.max_walking_speed_kmh = v;
    }
    if let Some(v) = args.significance_threshold {
        config.significance_threshold = v;
    }
    if args.legacy_next_bound {
        config.next_run_bound = NextRunBound::Legacy;
    }
    config.validate()?;
    Ok(config)
}

fn build_report(result: &ProcessedRide, observer: &RecordingObserver) -> serde_json::Value {
    json!({
        "request_id": result.request_id,
        "input_locations": result.before.len(),
        "output_locations": result.after.len(),
        "passes": result.passes,
        "skipped_passes": observer.skipped_passes(),
        "corrections": observer.events(),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = build_config(&args)?;
    let ride = load_ride(&args.input)?;
    let smoother = ActivitySmoother::with_observer(config, RecordingObserver::new())?;
    let processor = RideProcessor::with_smoother(smoother);
    let result = processor.process(&args.request_id, &ride)?;

    let encoded = serde_json::to_string_pretty(&result.summary)?;
    match &args.output {
        Some(path) => {
            fs::write(path, encoded)?;
            log::info!("Wrote smoothed ride to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", encoded)?;
        }
    }

    if let Some(path) = &args.chart {
        let renderer = JsonChartRenderer { pretty: true };
        fs::write(path, renderer.render(&result.before, &result.after)?)?;
        log::info!("Wrote chart data to {}", path.display());
    }

    if args.report {
        let report = build_report(&result, processor.smoother().observer());
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
