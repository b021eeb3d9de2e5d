use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use complaint_client::commands::{self, Command};
use complaint_client::{init_tracing, AppState, ClientConfig};

#[derive(Debug, Parser)]
#[command(name = "complaint-hub", version, about = "Complaint Hub command-line client")]
struct Cli {
    /// Backend base URL. Overrides COMPLAINT_API_BASE_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session database file. Overrides COMPLAINT_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Keep the session in memory only.
    #[arg(long, global = true, default_value_t = false)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.set_api_base_url(url)?;
    }
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    debug!(?config, "Loaded configuration");
    info!(api = %config.api_base_url, "Starting Complaint Hub client v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::init(config, cli.ephemeral)?;
    commands::run(&state, cli.command).await
}
