use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use garmin_ical_export::api::GarminApi;
use garmin_ical_export::config::Config;
use garmin_ical_export::data::ActivityFilter;
use garmin_ical_export::export::{self, ExportOptions, MeasurementPreference};

#[derive(Parser)]
#[command(name = "garmin-ical-export")]
#[command(about = "Exports Garmin Connect activities to iCalendar file")]
#[command(version)]
struct Cli {
    /// Your Garmin Connect login e-mail (or GARMIN_USERNAME)
    #[arg(value_name = "LOGIN_EMAIL")]
    garmin_username: Option<String>,

    /// Your Garmin Connect login password (or GARMIN_PASSWORD)
    #[arg(value_name = "PASSWORD")]
    garmin_password: Option<String>,

    /// Export only one type of activity: running, cycling, swimming,
    /// multi_sport, fitness_equipment, hiking, walking, winter_sports,
    /// other or all
    #[arg(long = "activity_type", default_value = "all")]
    activity_type: ActivityFilter,

    /// Max. number of activities to export
    #[arg(long, default_value_t = 10_000)]
    limit: u32,

    /// Units for distances and speeds: metric, imperial, or account to use
    /// the Garmin Connect profile setting
    #[arg(long = "measurement_system", default_value = "metric")]
    measurement_system: MeasurementPreference,

    /// Target .ics file (prints to stdout if not passed)
    #[arg(long = "target_file")]
    target_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::load(cli.garmin_username, cli.garmin_password)?;
    let api = GarminApi::login(&config.credentials, config.endpoints.clone())
        .await
        .context("Failed to sign in to Garmin Connect")?;

    let options = ExportOptions {
        limit: cli.limit,
        filter: cli.activity_type,
        measurement: cli.measurement_system,
    };
    let calendar = export::run(&api, &options, chrono::Utc::now()).await?;

    export::write_calendar(&calendar.serialize(), cli.target_file.as_deref())
}

/// Logs go to stderr so the calendar can be piped from stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("garmin_ical_export=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
