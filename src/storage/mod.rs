//! Storage abstractions for directory output.
//!
//! The primary artifact is a CSV table with one row per faculty member. A JSON
//! snapshot carrying research interests and run stats can be written next to it.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CrawlStats, DirectoryRow};

pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of rows written
    pub row_count: usize,
    /// Where the CSV table landed
    pub csv_location: String,
    /// Where the JSON snapshot landed, if one was written
    pub json_location: Option<String>,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// JSON snapshot of a directory run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO 8601 timestamp of the write
    pub generated_at: DateTime<Utc>,
    pub stats: CrawlStats,
    pub rows: Vec<DirectoryRow>,
}

impl Snapshot {
    pub fn new(rows: &[DirectoryRow], stats: &CrawlStats) -> Self {
        Self {
            generated_at: Utc::now(),
            stats: stats.clone(),
            rows: rows.to_vec(),
        }
    }
}

/// Trait for directory output backends.
#[async_trait]
pub trait DirectoryStorage: Send + Sync {
    /// Write the merged rows.
    async fn write_rows(&self, rows: &[DirectoryRow], stats: &CrawlStats) -> Result<WriteMetadata>;
}
