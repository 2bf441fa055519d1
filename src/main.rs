//! Main entry point for the PPA statistics tool

use ppa_stats::cli::run;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Error: {}", e.user_message());
        process::exit(1);
    }
}
