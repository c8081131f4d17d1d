//! Persistence for the posted-history ledger and the dashboard log.
//!
//! Both stores are single JSON arrays rewritten in full on every update.
//! That is fine at this scale (tens of entries) but it does mean concurrent
//! runs against the same files can lose updates; single-run single-writer
//! usage is assumed.
//!
//! A missing or unreadable file is treated as an empty store so the first run
//! on a fresh host needs no setup. Write failures propagate as
//! [`StoreError`]: losing the dedup ledger silently would mean duplicate
//! posts on the next run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::PublishedRecord;

/// Append-only ledger of article URLs that have been published.
///
/// Membership gates reprocessing: the fetcher excludes every URL in here from
/// its results. A URL is recorded only after a confirmed successful publish,
/// so a failed publish leaves the article eligible for retry on the next run.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl HistoryStore {
    /// Load the history file, returning an empty store when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let urls: Vec<String> = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(urls) => urls,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "History file is not a JSON array; starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No history file yet; starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read history file; starting empty");
                Vec::new()
            }
        };

        let seen = urls.iter().cloned().collect::<HashSet<_>>();
        info!(path = %path.display(), count = urls.len(), "Loaded posted history");
        Self {
            path: path.to_path_buf(),
            urls,
            seen,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// The set of URLs to exclude from scraping.
    pub fn excluded(&self) -> &HashSet<String> {
        &self.seen
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Record a published URL and persist the whole ledger immediately.
    ///
    /// Recording a URL already present is a no-op, keeping each URL in the
    /// file exactly once.
    pub fn record(&mut self, url: &str) -> Result<(), StoreError> {
        if !self.seen.insert(url.to_string()) {
            debug!(%url, "URL already in history; not re-recording");
            return Ok(());
        }
        self.urls.push(url.to_string());
        let json = serde_json::to_string_pretty(&self.urls)?;
        fs::write(&self.path, json)?;
        debug!(%url, total = self.urls.len(), "Recorded URL in history");
        Ok(())
    }
}

/// Append-only log of successful publishes, write-only from the pipeline.
#[derive(Debug)]
pub struct Dashboard {
    path: PathBuf,
}

impl Dashboard {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Append one record, rewriting the file in full.
    pub fn append(&self, record: PublishedRecord) -> Result<(), StoreError> {
        let mut records: Vec<PublishedRecord> = match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Dashboard file is not a JSON array; starting empty");
                Vec::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read dashboard file; starting empty");
                Vec::new()
            }
        };

        records.push(record);
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), total = records.len(), "Appended dashboard record");
        Ok(())
    }
}
