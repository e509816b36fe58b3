// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub load: LoadOptions,
    pub scrape: ScrapeOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            scrape: ScrapeOptions::default(),
        }
    }
}

/// Where the two partitions live and how many rows to parse per chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub chunk_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from(DEFAULT_DATA_DIR).join(TRAIN_FILE),
            test_path: PathBuf::from(DEFAULT_DATA_DIR).join(TEST_FILE),
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl LoadOptions {
    /// Zero would never make progress; clamp to one row per chunk.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Scheme + host, no trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Honour HTTP(S)_PROXY from the environment.
    pub system_proxy: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            system_proxy: true,
        }
    }
}

impl ScrapeOptions {
    /// `<base>/<slug>.html`. The slug is embedded as-is, without percent-encoding.
    pub fn page_url(&self, slug: &str) -> String {
        join!(self.base_url.trim_end_matches('/'), "/", slug, PAGE_EXT)
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = s!(url.trim().trim_end_matches('/'));
    }
}

pub fn default_log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}
