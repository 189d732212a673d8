//! ltapp Server Binary
//!
//! An HTTP target exposing CPU and memory pressure controls and a message
//! buffer for load-testing tools to drive.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use ltapp_config::{ConfigLoader, LtappConfig};
use ltapp_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, e.g. 0.0.0.0:8080
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Default worker count for /startCPULoad without a threads parameter
    #[arg(long, value_name = "N")]
    cpu_threads: Option<usize>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Print default configuration if requested
    if cli.print_config {
        println!("{}", LtappConfig::generate_sample());
        return Ok(());
    }

    // Load configuration
    let mut config = ConfigLoader::new().load(cli.config.as_ref())?;

    // Override with CLI arguments
    apply_cli_overrides(&mut config, &cli)?;

    // Create and start server
    let server = Server::new(config)?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut LtappConfig, cli: &Cli) -> Result<()> {
    if let Some(bind) = cli.bind {
        config.server.bind_address = match bind {
            SocketAddr::V4(addr) => addr.ip().to_string(),
            SocketAddr::V6(addr) => format!("[{}]", addr.ip()),
        };
        config.server.port = bind.port();
    }

    if let Some(threads) = cli.cpu_threads {
        config.load.cpu_threads = threads;
    }

    config
        .validate_all()
        .map_err(|e| anyhow::anyhow!("Invalid command line override: {}", e))?;

    Ok(())
}
