//! Command-line interface for the PPA statistics tool

use crate::client::LaunchpadClient;
use crate::config::AppConfig;
use crate::error::{PpaStatsError, Result};
use crate::report::{run_report, ReportPlan};
use crate::utils::parse_timeout;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// PPA Stats - download statistics for a Launchpad PPA
#[derive(Parser, Debug)]
#[command(
    name = "ppa-stats",
    version = "1.0.0",
    about = "Print download statistics for the binary packages of a Launchpad PPA",
    long_about = "Print download statistics for the binary packages of a Launchpad PPA.
For every configured series and architecture, lists the published binaries,
prints the total download count of each one that has been downloaded, and
the daily totals of the last 7 days with data."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode (only errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Timeout for requests (e.g. 30s, 2m, 1h)
    #[arg(long)]
    pub timeout: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Main CLI entry point
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_file(cli.config.as_ref())?;
    if let Some(timeout) = &cli.timeout {
        config.launchpad.timeout_seconds = parse_timeout(timeout)?.as_secs();
    }
    config.validate().map_err(PpaStatsError::ValidationError)?;

    if cli.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet, &config.logging.level);
    debug!("Effective configuration: {:?}", config);

    let client = LaunchpadClient::builder()
        .service_root(&config.launchpad.service_root)
        .api_version(&config.launchpad.api_version)
        .consumer_name(&config.launchpad.consumer_name)
        .cache_dir(&config.launchpad.cache_dir)
        .user_agent(&config.launchpad.user_agent)
        .timeout(Duration::from_secs(config.launchpad.timeout_seconds))
        .build()?;

    let session = client.login_anonymously().await?;
    let id = config.archive_id();
    let archive = session.ppa_by_name(&id.owner, &id.name).await?;
    info!("Reporting on {}", id);

    let plan = ReportPlan::from_config(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_report(&archive, &plan, &mut out).await?;

    Ok(())
}

/// Initialize logging based on CLI flags and the configured level
fn init_logging(verbose: bool, quiet: bool, configured: &str) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Report lines own stdout; logs always go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
