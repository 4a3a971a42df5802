use attendance_backend::{
    config::Config,
    domain::services::report::{self, ReportFormat},
    error::{AppError, StartupError},
    infra::factory::bootstrap_state,
};
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Writes the attendance report of the configured store to a file
#[derive(Parser)]
#[command(
    name = "attendance-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export attendance records as a printable HTML document or CSV",
    long_about = None
)]
struct Cli {
    /// Output format: html or csv
    #[arg(long, default_value = "csv")]
    format: ReportFormat,

    /// Destination file
    #[arg(long)]
    out: PathBuf,

    /// IANA time zone for timestamps (defaults to REPORT_TIMEZONE)
    #[arg(long)]
    tz: Option<String>,

    /// Store to read from (defaults to DATABASE_URL)
    #[arg(long = "db")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    match export(cli).await {
        Ok(()) => {}
        Err(StartupError::App(AppError::NothingToExport)) => {
            println!("No records to export");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn export(cli: Cli) -> Result<(), StartupError> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    let state = bootstrap_state(&config).await?;
    let tz = match cli.tz {
        Some(name) => name.parse::<Tz>()
            .map_err(|_| AppError::Validation(format!("Unknown time zone '{}'", name)))?,
        None => config.report_timezone,
    };

    let count = report::write_report(
        state.attendance_repo.as_ref(),
        &state.templates,
        cli.format,
        tz,
        &cli.out,
    ).await?;

    println!("Exported {} record(s) to {}", count, cli.out.display());
    Ok(())
}
