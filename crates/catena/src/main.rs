//! catena: interactive console for provisioning blockchain test networks

mod tui;
mod workflow;

use catena_bundle::{BundleCodec, ScriptOptions};
use catena_config::{CatenaConfig, Overrides};
use catena_keystore::{Geth, Keystore};
use catena_registry::HttpRegistry;
use clap::Parser;
use std::path::PathBuf;
use tui::TerminalConsole;
use workflow::Workflow;

#[derive(Parser)]
#[command(name = "catena", version)]
#[command(
    about = "Provision blockchain test networks on cloud infrastructure",
    long_about = None
)]
struct Cli {
    /// Registry endpoint (default: http://localhost:1989)
    #[arg(long, env = "CATENA_ENDPOINT")]
    endpoint: Option<String>,

    /// Catena home directory (default: ~/.catena)
    #[arg(long, env = "CATENA_HOME")]
    home: Option<PathBuf>,

    /// geth binary used to create accounts
    #[arg(long, env = "CATENA_GETH")]
    geth: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CatenaConfig::load(Overrides {
        endpoint: cli.endpoint,
        home: cli.home,
        geth: cli.geth,
    })?;
    config.ensure_dirs()?;

    // stdout belongs to the full-screen console, so logs go to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())?;
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        endpoint = %config.endpoint,
        home = %config.home.display(),
        "Starting catena {}",
        env!("CARGO_PKG_VERSION")
    );

    let registry = HttpRegistry::new(config.endpoint.clone());
    let keystore = Keystore::new(config.keys_dir(), config.tmp_dir(), Geth::new(&config.geth));
    let codec = BundleCodec::new(ScriptOptions {
        node_data_root: config.node_data_root.clone(),
        gui_client: config.gui_client_script,
    });

    let mut console = TerminalConsole::new()?;
    let result = Workflow::new(&registry, &keystore, &codec, &mut console)
        .run()
        .await;
    // Restore the terminal before any error is printed
    drop(console);

    if let Err(e) = &result {
        tracing::error!("Fatal: {}", e);
    }
    Ok(result?)
}
