//! Data types shared by the Launchpad client and the report generator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-day download counts, ordered by date
pub type DailyTotals = BTreeMap<NaiveDate, u64>;

/// Owner and name of a PPA
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveId {
    /// Launchpad account owning the archive
    pub owner: String,

    /// Archive name within the owner's namespace
    pub name: String,
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ppa:{}/{}", self.owner, self.name)
    }
}

/// One point of the series x architecture query space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub series: String,
    pub arch: String,
}

impl Target {
    pub fn new<S: Into<String>, A: Into<String>>(series: S, arch: A) -> Self {
        Self {
            series: series.into(),
            arch: arch.into(),
        }
    }

    /// Expand the cross-product in series-major order
    pub fn cross_product(series: &[String], arches: &[String]) -> Vec<Target> {
        series
            .iter()
            .flat_map(|s| arches.iter().map(move |a| Target::new(s.as_str(), a.as_str())))
            .collect()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.series, self.arch)
    }
}

/// A binary package publication in an archive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishedBinary {
    /// Binary package name
    pub name: String,

    /// Binary package version
    pub version: String,

    /// Architecture the record was listed under
    pub arch: String,

    /// API resource link used for per-record operations
    pub self_link: String,
}

/// Service root document returned by the anonymous login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRoot {
    #[serde(default)]
    pub people_collection_link: Option<String>,

    #[serde(default)]
    pub distributions_collection_link: Option<String>,

    #[serde(default)]
    pub resource_type_link: Option<String>,
}

/// Archive entry as returned by `getPPAByName`
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveEntry {
    pub self_link: String,

    #[serde(default)]
    pub displayname: Option<String>,
}

/// Collection page of `getPublishedBinaries`
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryCollection {
    #[serde(default)]
    pub entries: Vec<BinaryEntry>,

    #[serde(default)]
    pub total_size: Option<u64>,

    #[serde(default)]
    pub next_collection_link: Option<String>,
}

/// Single binary publication entry in a collection page
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryEntry {
    pub binary_package_name: String,
    pub binary_package_version: String,
    pub self_link: String,
}

impl BinaryEntry {
    /// Attach the queried architecture to an API entry
    pub fn into_record(self, arch: &str) -> PublishedBinary {
        PublishedBinary {
            name: self.binary_package_name,
            version: self.binary_package_version,
            arch: arch.to_string(),
            self_link: self.self_link,
        }
    }
}
