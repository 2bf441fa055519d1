//! # PPA Stats
//!
//! Download statistics for the binary packages of a Launchpad PPA.
//! Launchpad has no web page for these numbers, so this tool reads them
//! from the REST API and prints them per series and architecture.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Report on the configured PPA
//! ppa-stats
//!
//! # Same, with a config file and debug logging on stderr
//! ppa-stats --config ppa-stats.toml --verbose
//! ```
//!
//! Output looks like:
//!
//! ```text
//! purple-vk-plugin: 0.9-1 amd64: 42
//! 2013-11-20: 3
//! 2013-11-21: 5
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use ppa_stats::{LaunchpadClient, Result};
//! use ppa_stats::report::ArchiveApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = LaunchpadClient::new()?.login_anonymously().await?;
//!     let archive = session.ppa_by_name("purple-vk-plugin", "dev").await?;
//!
//!     let das = session.distro_arch_series("ubuntu", "saucy", "amd64");
//!     for binary in archive.published_binaries("Published", &das, "amd64").await? {
//!         println!("{} {}", binary.name, archive.download_count(&binary).await?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Defaults match the hardcoded script. Override via file (`--config`) or
//! environment variables `PPA_STATS__SECTION__KEY`:
//!
//! ```toml
//! [archive]
//! owner = "purple-vk-plugin"
//! name = "dev"
//! series = ["precise", "saucy"]
//! architectures = ["i386", "amd64"]
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod types;
pub mod utils;

// Re-export commonly used items at the crate root for convenience
pub use client::{Archive, LaunchpadClient, LaunchpadClientBuilder, Session};
pub use config::AppConfig;
pub use error::{PpaStatsError, Result};
pub use report::{run_report, ArchiveApi};
pub use types::{ArchiveId, DailyTotals, PublishedBinary, Target};

/// Default Launchpad service root
pub const DEFAULT_SERVICE_ROOT: &str = "https://api.launchpad.net";

/// Default web service version
pub const DEFAULT_API_VERSION: &str = "devel";

/// Consumer name presented in the anonymous OAuth credentials
pub const DEFAULT_CONSUMER_NAME: &str = "ppastats";

/// Cache directory for session metadata, relative to the home directory
pub const DEFAULT_CACHE_DIR: &str = "~/.cache/launchpadlib/";

/// Default user agent for requests
pub const DEFAULT_USER_AGENT: &str = "ppa-stats/1.0.0";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Publication status the report filters on
pub const PUBLISHED_STATUS: &str = "Published";

/// Number of most recent days printed per record
pub const DAILY_WINDOW: usize = 7;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
