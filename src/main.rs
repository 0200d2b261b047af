use anyhow::Result;
use clap::Parser;
use energy_forecast::evaluate::Evaluation;
use energy_forecast::pipeline::{run, DisplayMode, PipelineConfig};
use std::path::PathBuf;

/// Forecast short-horizon energy consumption and track forecast accuracy
#[derive(Debug, Parser)]
#[command(name = "energy_forecast", version)]
struct Cli {
    /// Directory of historical-reading source files (date,hour,energy CSV)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Ground-truth actuals file with the same shape as the sources
    #[arg(long)]
    actuals: Option<PathBuf>,

    /// Forecast artifact, overwritten each run
    #[arg(long, default_value = "comparison/next_day_forecast.csv")]
    forecast_out: PathBuf,

    /// Error history artifact, merged across runs
    #[arg(long, default_value = "comparison/error_history.csv")]
    history: PathBuf,

    /// Number of days to forecast
    #[arg(long, default_value_t = 1)]
    days: usize,

    /// Forecast points per day
    #[arg(long, default_value_t = 24)]
    hours_per_day: usize,

    /// Whether downstream presentation shows predicted-only or both
    #[arg(long, value_enum, default_value = "both")]
    display: DisplayMode,
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = PipelineConfig {
        data_dir: cli.data_dir,
        actuals_file: cli.actuals,
        forecast_file: cli.forecast_out.clone(),
        history_file: cli.history,
        num_days: cli.days,
        hours_per_day: cli.hours_per_day,
        display: cli.display,
    };

    let outcome = run(&config)?;
    println!(
        "Forecast saved to '{}' ({} points)",
        cli.forecast_out.display(),
        outcome.forecast.len()
    );

    match &outcome.evaluation {
        Evaluation::Report(report) => print!("{report}"),
        Evaluation::InsufficientGroundTruth => {
            if outcome.display == DisplayMode::Both {
                println!("Skipping accuracy calculation - actual data not found.");
            }
        }
    }

    Ok(())
}
