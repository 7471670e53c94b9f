//! Quick-look tool for SWA/EAS CDF files.
//!
//! Loads a file through the product dispatch factory and prints a summary
//! of whichever product type claimed it.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use swa_products::{load, Product};

#[derive(Parser, Debug)]
#[command(name = "quicklook")]
#[command(about = "Quick-look summaries for SWA/EAS data files")]
struct Args {
    /// Path to a .cdf file
    file: String,

    /// Emit the peek summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Energy bins for 3D distribution heatmaps (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "0")]
    energy_bins: Vec<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(file = %args.file, "loading data product");
    let product = load(&args.file)?;

    match product {
        Product::Distribution3d(dist) => {
            println!("3D distribution function ({} sweeps)", dist.times().len());
            println!(
                "  counts shape {:?}, energy {} .. {} {}",
                dist.counts().shape(),
                dist.energy().values.iter().cloned().fold(f64::INFINITY, f64::min),
                dist.energy().values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                dist.energy().unit
            );
            let frames = dist.peek(&args.energy_bins)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&frames)?);
            } else {
                for frame in &frames {
                    let total: f64 = frame.values.iter().sum();
                    println!("  {}  bins {:?} eV  total counts {}", frame.time, frame.energy_ev, total);
                }
            }
        }
        Product::PitchAngleBurst(burst) => {
            println!("2D pitch-angle burst product ({} sweeps)", burst.times().len());
            let series = burst.peek()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                for (t, time) in series.times.iter().enumerate() {
                    let row: f64 = series.values.row(t).sum();
                    println!("  {}  counts {}", time, row);
                }
            }
        }
        Product::PartialMoments(moments) => {
            println!(
                "partial moments ({} rows, {} columns, {} skipped)",
                moments.table().num_rows(),
                moments.table().num_columns(),
                moments.skipped().len()
            );
            let summaries = moments.peek();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    println!("  {:<30} {:>12.4} .. {:<12.4} {}", s.name, s.min, s.max, s.unit);
                }
            }
        }
    }

    Ok(())
}
