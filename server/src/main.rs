use std::path::PathBuf;
use std::sync::Arc;

use analytics::Summary;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dataset::Dataset;
use platform_obs::{TelemetryConfig, install as install_telemetry};
use server::{
    config::AppConfig,
    http::{self, AppState, ServeConfig},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "promodash", version, about = "Employee promotion dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the dashboard HTTP server.
    Serve(ServeCommand),
    /// Print the summary card values for a dataset and exit.
    Summary {
        #[arg(long, value_name = "FILE", help = "Dataset path override")]
        dataset: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8050)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_telemetry(TelemetryConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Summary { dataset } => print_summary(dataset, &app_config),
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let dataset = Dataset::from_csv_path(&config.dataset_path)?;
    info!(
        rows = dataset.len(),
        path = %config.dataset_path.display(),
        "dataset loaded"
    );
    let state = AppState::new(dataset, config);
    http::serve(cmd.into(), state).await
}

fn print_summary(path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let path = path.unwrap_or_else(|| config.dataset_path.clone());
    let dataset = Dataset::from_csv_path(&path)?;
    let summary = Summary::compute(&dataset);
    println!("Total employees:  {}", summary.total_employees);
    println!("Promoted:         {}", summary.promoted);
    println!("KPI met (>80%):   {}", summary.kpi_met);
    println!("Average age:      {}", summary.average_age);
    Ok(())
}
