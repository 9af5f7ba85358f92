//! Local filesystem storage implementation.
//!
//! ## Output Layout
//!
//! ```text
//! {csv_path}     # Faculty Name, About Section, Faculty Email, Profile URL, Department
//! {json_path}    # Optional snapshot: rows with research interests, plus run stats
//! ```
//!
//! Both files are written to a temp path first and then renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CrawlStats, DirectoryRow, OutputConfig};
use crate::storage::{DirectoryStorage, Snapshot, WriteMetadata};

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 5] = [
    "Faculty Name",
    "About Section",
    "Faculty Email",
    "Profile URL",
    "Department",
];

#[derive(Serialize)]
struct CsvRecord<'a> {
    name: &'a str,
    about: &'a str,
    email: String,
    profile_url: &'a str,
    department: String,
}

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    csv_path: PathBuf,
    json_path: Option<PathBuf>,
    department_separator: String,
}

impl LocalStorage {
    /// Create a LocalStorage writing CSV to the given path.
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            json_path: None,
            department_separator: "; ".to_string(),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            csv_path: output.csv_path.clone(),
            json_path: output.json_path.clone(),
            department_separator: output.department_separator.clone(),
        }
    }

    /// Also write a JSON snapshot to the given path.
    pub fn with_json(mut self, json_path: impl Into<PathBuf>) -> Self {
        self.json_path = Some(json_path.into());
        self
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Render rows as CSV bytes, header first.
    pub fn render_csv(&self, rows: &[DirectoryRow]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for row in rows {
            writer.serialize(CsvRecord {
                name: &row.name,
                about: &row.biography,
                email: row.email_cell(),
                profile_url: &row.profile_url,
                department: row.department_cell(&self.department_separator),
            })?;
        }

        writer.into_inner().map_err(|e| AppError::Io(e.into_error()))
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        Self::ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl DirectoryStorage for LocalStorage {
    async fn write_rows(&self, rows: &[DirectoryRow], stats: &CrawlStats) -> Result<WriteMetadata> {
        log::info!("Writing {} rows to {}", rows.len(), self.csv_path.display());

        let bytes = self.render_csv(rows)?;
        Self::write_bytes(&self.csv_path, &bytes).await?;

        let json_location = match &self.json_path {
            Some(path) => {
                let snapshot = Snapshot::new(rows, stats);
                let bytes = serde_json::to_vec_pretty(&snapshot)?;
                Self::write_bytes(path, &bytes).await?;
                Some(path.display().to_string())
            }
            None => None,
        };

        Ok(WriteMetadata {
            row_count: rows.len(),
            csv_location: self.csv_path.display().to_string(),
            json_location,
            timestamp: Utc::now(),
        })
    }
}
