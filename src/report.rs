//! Download report over the series x architecture query space

use crate::config::AppConfig;
use crate::error::Result;
use crate::types::{DailyTotals, PublishedBinary, Target};
use crate::utils::{api_root, distro_arch_series_link, latest_days};
use crate::DAILY_WINDOW;
use chrono::NaiveDate;
use std::io::Write;
use tracing::{debug, info};

/// Read-only operations the report needs from an archive
#[allow(async_fn_in_trait)]
pub trait ArchiveApi {
    /// Published binaries with `status` for one distro-arch-series link.
    /// `arch` is the architecture name the records are reported under.
    async fn published_binaries(
        &self,
        status: &str,
        distro_arch_series: &str,
        arch: &str,
    ) -> Result<Vec<PublishedBinary>>;

    /// Cumulative download count of a record
    async fn download_count(&self, binary: &PublishedBinary) -> Result<u64>;

    /// Date to count mapping of a record
    async fn daily_download_totals(&self, binary: &PublishedBinary) -> Result<DailyTotals>;
}

/// What to query, in what order
#[derive(Debug, Clone)]
pub struct ReportPlan {
    pub api_root: String,
    pub distribution: String,
    pub status: String,
    pub targets: Vec<Target>,
}

impl ReportPlan {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_root: api_root(&config.launchpad.service_root, &config.launchpad.api_version),
            distribution: config.archive.distribution.clone(),
            status: config.archive.status.clone(),
            targets: config.targets(),
        }
    }

    fn distro_arch_series(&self, target: &Target) -> String {
        distro_arch_series_link(&self.api_root, &self.distribution, &target.series, &target.arch)
    }
}

/// Counters gathered while the report runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub targets: usize,
    pub records: usize,
    pub downloaded: usize,
}

/// `{name}: {version} {arch}: {count}`
pub fn summary_line(binary: &PublishedBinary, count: u64) -> String {
    format!("{}: {} {}: {}", binary.name, binary.version, binary.arch, count)
}

/// `{date}: {count}`
pub fn daily_line(date: NaiveDate, count: u64) -> String {
    format!("{}: {}", date, count)
}

/// Print the report for every target of `plan` to `out`.
///
/// Errors are not caught: the first failure aborts the run, and lines
/// already written stay written.
pub async fn run_report<A, W>(archive: &A, plan: &ReportPlan, out: &mut W) -> Result<ReportSummary>
where
    A: ArchiveApi,
    W: Write,
{
    let mut summary = ReportSummary::default();

    for target in &plan.targets {
        let das = plan.distro_arch_series(target);
        debug!("Querying {} binaries for {}", plan.status, das);

        let binaries = archive
            .published_binaries(&plan.status, &das, &target.arch)
            .await?;
        info!("Found {} published binaries for {}", binaries.len(), target);

        summary.targets += 1;
        for binary in &binaries {
            summary.records += 1;

            let count = archive.download_count(binary).await?;
            if count > 0 {
                summary.downloaded += 1;
                writeln!(out, "{}", summary_line(binary, count))?;
            }

            // Daily detail is printed whether or not the total is zero
            let totals = archive.daily_download_totals(binary).await?;
            for (date, day_count) in latest_days(&totals, DAILY_WINDOW) {
                writeln!(out, "{}", daily_line(date, day_count))?;
            }
            out.flush()?;
        }
    }

    info!(
        "Report completed: {} targets, {} records, {} with downloads",
        summary.targets, summary.records, summary.downloaded
    );
    Ok(summary)
}
