//! DSN snapshot pipeline
//!
//! Fetches the spacecraft directory and the live telemetry document, and
//! turns them into a [`DsnSnapshot`] grouped by ground station.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::aggregator::group_by_craft;
use super::directory::SpacecraftDirectory;
use super::error::{DsnError, Result};
use super::fetcher::FeedSource;
use super::normalizer::normalize_signals;
use super::parser::scan_telemetry;
use super::stations::build_stations;
use super::types::{Craft, DsnSnapshot};

const CONFIG_URL: &str = "https://eyes.nasa.gov/apps/dsn-now/config.xml";
const DSN_URL: &str = "https://eyes.nasa.gov/dsn/data/dsn.xml";

/// Locations of the two source documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedUrls {
    /// Spacecraft directory (DSN Now `config.xml`)
    #[serde(default = "default_config_url")]
    pub config_url: String,

    /// Live telemetry (`dsn.xml`)
    #[serde(default = "default_dsn_url")]
    pub dsn_url: String,
}

fn default_config_url() -> String {
    CONFIG_URL.to_string()
}

fn default_dsn_url() -> String {
    DSN_URL.to_string()
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            config_url: default_config_url(),
            dsn_url: default_dsn_url(),
        }
    }
}

pub struct DsnPipeline {
    source: Arc<dyn FeedSource>,
    feeds: FeedUrls,
    /// Echoed into snapshots so clients can build absolute icon URLs
    base_url: Option<String>,
}

impl DsnPipeline {
    pub fn new(source: Arc<dyn FeedSource>, feeds: FeedUrls, base_url: Option<String>) -> Self {
        Self { source, feeds, base_url }
    }

    /// Fetch → parse → group one snapshot.
    pub async fn fetch_snapshot(&self) -> Result<DsnSnapshot> {
        let (config_xml, dsn_xml) = futures::try_join!(
            self.source.fetch(&self.feeds.config_url),
            self.source.fetch(&self.feeds.dsn_url)
        )?;

        let directory = SpacecraftDirectory::parse(&config_xml)?;
        let snapshot = assemble_snapshot(&directory, &dsn_xml, Utc::now(), self.base_url.clone());

        tracing::info!(
            "DSN snapshot: {} crafts across {} stations, updated at {}",
            snapshot.stations.iter().map(|s| s.crafts.len()).sum::<usize>(),
            snapshot.stations.len(),
            snapshot.updated_at
        );

        Ok(snapshot)
    }
}

/// Everything after the fetch: scan, normalize, group and build.
pub fn assemble_snapshot(
    directory: &SpacecraftDirectory,
    dsn_xml: &[u8],
    now: DateTime<Utc>,
    base_url: Option<String>,
) -> DsnSnapshot {
    let scan = scan_telemetry(dsn_xml);
    if scan.halted.is_some() || scan.skipped_dishes > 0 {
        tracing::warn!(
            "Partial telemetry: {} records kept, {} dishes skipped",
            scan.records.len(),
            scan.skipped_dishes
        );
    }

    let signals = normalize_signals(&scan.records, directory);
    let crafts = group_by_craft(signals);
    build_snapshot(&crafts, now, base_url)
}

pub fn build_snapshot(crafts: &[Craft], now: DateTime<Utc>, base_url: Option<String>) -> DsnSnapshot {
    DsnSnapshot {
        base_url,
        stations: build_stations(crafts),
        updated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

impl DsnSnapshot {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(DsnError::Encode)
    }
}
