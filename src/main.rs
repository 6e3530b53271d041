//! Lettrics CLI binary entry point.

use clap::Parser;
use lettrics::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    if let Err(e) = lettrics::cli::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
