//! Utility functions for the PPA statistics tool

use crate::error::{PpaStatsError, Result};
use crate::types::DailyTotals;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tracing::debug;

/// Build the API root from a service root and a version, e.g.
/// `https://api.launchpad.net` + `devel`
pub fn api_root(service_root: &str, version: &str) -> String {
    format!("{}/{}", service_root.trim_end_matches('/'), version)
}

/// Resource link of a distro-arch-series, e.g.
/// `https://api.launchpad.net/devel/ubuntu/saucy/amd64`
pub fn distro_arch_series_link(api_root: &str, distribution: &str, series: &str, arch: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        api_root.trim_end_matches('/'),
        distribution,
        series,
        arch
    )
}

/// Append a named operation and its parameters to a resource link
pub fn named_operation(link: &str, op: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!(
        "{}{}ws.op={}",
        link,
        if link.contains('?') { '&' } else { '?' },
        urlencoding::encode(op)
    );
    for (key, value) in params {
        url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
    }
    url
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) => rest.trim_start_matches('/'),
        None => return Ok(PathBuf::from(path)),
    };

    let home = home::home_dir().ok_or_else(|| {
        PpaStatsError::validation(format!("Cannot expand '{}': no home directory", path))
    })?;
    debug!("Expanding cache path {} under {}", path, home.display());

    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

/// Anonymous OAuth 1.0 `Authorization` header: empty token, PLAINTEXT
/// signature over an empty consumer secret
pub fn anonymous_oauth_header(consumer_key: &str) -> String {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = Utc::now().timestamp();

    format!(
        "OAuth realm=\"OAuth\", oauth_consumer_key=\"{}\", oauth_token=\"\", \
         oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"{}\", \
         oauth_timestamp=\"{}\", oauth_nonce=\"{}\", oauth_version=\"1.0\"",
        urlencoding::encode(consumer_key),
        urlencoding::encode("&"),
        timestamp,
        nonce
    )
}

/// The `window` most recent dates of a daily mapping, oldest first
pub fn latest_days(totals: &DailyTotals, window: usize) -> Vec<(NaiveDate, u64)> {
    let skip = totals.len().saturating_sub(window);
    totals.iter().skip(skip).map(|(d, c)| (*d, *c)).collect()
}

/// Parse a timeout string (e.g., "30s", "2m", "1h")
pub fn parse_timeout(input: &str) -> Result<std::time::Duration> {
    let input = input.trim().to_lowercase();

    if let Ok(secs) = input.parse::<u64>() {
        return Ok(std::time::Duration::from_secs(secs));
    }

    let (num_str, scale) = if let Some(n) = input.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = input.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = input.strip_suffix('h') {
        (n, 3600)
    } else {
        ("", 0)
    };

    match num_str.parse::<u64>().ok().and_then(|n| n.checked_mul(scale)) {
        Some(secs) if scale > 0 => Ok(std::time::Duration::from_secs(secs)),
        _ => Err(PpaStatsError::ValidationError(format!(
            "Invalid timeout format: '{}'. Use formats like '30s', '5m', '1h'",
            input
        ))),
    }
}
