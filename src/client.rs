//! HTTP client for the Launchpad REST API

use crate::error::{PpaStatsError, Result};
use crate::report::ArchiveApi;
use crate::types::*;
use crate::utils::{anonymous_oauth_header, api_root, distro_arch_series_link, expand_home, named_operation};
use crate::{
    DEFAULT_API_VERSION, DEFAULT_CACHE_DIR, DEFAULT_CONSUMER_NAME, DEFAULT_SERVICE_ROOT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// File the service root document is kept in, inside the cache directory
const SERVICE_ROOT_CACHE_FILE: &str = "service-root.json";

/// Unauthenticated Launchpad client; log in to get a [`Session`]
#[derive(Debug, Clone)]
pub struct LaunchpadClient {
    client: Client,
    api_root: String,
    consumer_name: String,
    cache_dir: PathBuf,
}

impl LaunchpadClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder
    pub fn builder() -> LaunchpadClientBuilder {
        LaunchpadClientBuilder::default()
    }

    /// Versioned API root, e.g. `https://api.launchpad.net/devel`
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Directory holding session metadata
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Open an anonymous session.
    ///
    /// Fetches the service root with anonymous credentials and keeps a copy
    /// in the cache directory.
    pub async fn login_anonymously(self) -> Result<Session> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;

        let url = format!("{}/", self.api_root);
        debug!(
            "Logging in anonymously to {} as '{}'",
            url, self.consumer_name
        );

        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(e @ PpaStatsError::AuthError(_)) => {
                error!("Anonymous login to {} rejected", url);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let body = response.text().await?;
        let root: ServiceRoot = serde_json::from_str(&body)?;

        let cache_file = self.cache_dir.join(SERVICE_ROOT_CACHE_FILE);
        if let Err(e) = tokio::fs::write(&cache_file, &body).await {
            warn!("Could not write {}: {}", cache_file.display(), e);
            return Err(e.into());
        }

        info!("Logged in anonymously to {}", self.api_root);
        Ok(Session { client: self, root })
    }

    /// GET a URL with anonymous credentials; non-200 responses become errors
    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, anonymous_oauth_header(&self.consumer_name))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                PpaStatsError::from(e)
            })?;

        match response.status() {
            StatusCode::OK => Ok(response),
            status => {
                warn!("Unexpected status {} for {}", status, url);
                Err(PpaStatsError::from(status))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            PpaStatsError::unexpected(format!("{} from {}", e, url))
        })
    }
}

/// Logged-in view of the API
#[derive(Debug, Clone)]
pub struct Session {
    client: LaunchpadClient,
    root: ServiceRoot,
}

impl Session {
    /// Service root document received at login
    pub fn service_root(&self) -> &ServiceRoot {
        &self.root
    }

    pub fn api_root(&self) -> &str {
        self.client.api_root()
    }

    /// Resource link of a distro-arch-series under this API root
    pub fn distro_arch_series(&self, distribution: &str, series: &str, arch: &str) -> String {
        distro_arch_series_link(self.client.api_root(), distribution, series, arch)
    }

    /// Look up a PPA by owner and name
    pub async fn ppa_by_name(&self, owner: &str, name: &str) -> Result<Archive> {
        let person = format!("{}/~{}", self.client.api_root(), owner);
        let url = named_operation(&person, "getPPAByName", &[("name", name)]);
        debug!("Resolving archive ~{}/{}", owner, name);

        let not_found = || PpaStatsError::ArchiveNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        };

        let entry: Option<ArchiveEntry> = match self.client.get_json(&url).await {
            Ok(entry) => entry,
            // Launchpad answers 400 for an unknown PPA name, 404 for an unknown owner
            Err(PpaStatsError::NotFound(_))
            | Err(PpaStatsError::ServerError { status: 400, .. }) => return Err(not_found()),
            Err(e) => return Err(e),
        };
        let entry = entry.ok_or_else(not_found)?;

        info!(
            "Resolved archive ~{}/{} ({})",
            owner,
            name,
            entry.displayname.as_deref().unwrap_or(name)
        );
        Ok(Archive {
            client: self.client.clone(),
            id: ArchiveId {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            self_link: entry.self_link,
        })
    }
}

/// A resolved PPA
#[derive(Debug, Clone)]
pub struct Archive {
    client: LaunchpadClient,
    id: ArchiveId,
    self_link: String,
}

impl Archive {
    pub fn id(&self) -> &ArchiveId {
        &self.id
    }

    pub fn self_link(&self) -> &str {
        &self.self_link
    }
}

impl ArchiveApi for Archive {
    async fn published_binaries(
        &self,
        status: &str,
        distro_arch_series: &str,
        arch: &str,
    ) -> Result<Vec<PublishedBinary>> {
        let mut next = Some(named_operation(
            &self.self_link,
            "getPublishedBinaries",
            &[("status", status), ("distro_arch_series", distro_arch_series)],
        ));
        let mut records = Vec::new();

        while let Some(url) = next {
            let page: BinaryCollection = self.client.get_json(&url).await?;
            debug!(
                "Fetched {} of {:?} binaries from {}",
                page.entries.len(),
                page.total_size,
                url
            );
            records.extend(page.entries.into_iter().map(|e| e.into_record(arch)));
            next = page.next_collection_link;
        }

        Ok(records)
    }

    async fn download_count(&self, binary: &PublishedBinary) -> Result<u64> {
        let url = named_operation(&binary.self_link, "getDownloadCount", &[]);
        let count: u64 = self.client.get_json(&url).await?;
        debug!("{} {}: {} downloads", binary.name, binary.version, count);
        Ok(count)
    }

    async fn daily_download_totals(&self, binary: &PublishedBinary) -> Result<DailyTotals> {
        let url = named_operation(&binary.self_link, "getDailyDownloadTotals", &[]);
        self.client.get_json(&url).await
    }
}

/// Builder for creating a LaunchpadClient with custom configuration
#[derive(Debug, Default)]
pub struct LaunchpadClientBuilder {
    service_root: Option<String>,
    api_version: Option<String>,
    consumer_name: Option<String>,
    cache_dir: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl LaunchpadClientBuilder {
    /// Set the service root (without version)
    pub fn service_root<S: Into<String>>(mut self, url: S) -> Self {
        self.service_root = Some(url.into());
        self
    }

    /// Set the web service version
    pub fn api_version<S: Into<String>>(mut self, version: S) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the application name used as OAuth consumer key
    pub fn consumer_name<S: Into<String>>(mut self, name: S) -> Self {
        self.consumer_name = Some(name.into());
        self
    }

    /// Set the session cache directory; `~` is expanded at build time
    pub fn cache_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set the user agent string
    pub fn user_agent<S: Into<String>>(mut self, agent: S) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the LaunchpadClient
    pub fn build(self) -> Result<LaunchpadClient> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        let service_root = self.service_root.as_deref().unwrap_or(DEFAULT_SERVICE_ROOT);
        let api_version = self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION);
        let cache_dir = expand_home(self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR))?;

        Ok(LaunchpadClient {
            client,
            api_root: api_root(service_root, api_version),
            consumer_name: self
                .consumer_name
                .unwrap_or_else(|| DEFAULT_CONSUMER_NAME.to_string()),
            cache_dir,
        })
    }
}
