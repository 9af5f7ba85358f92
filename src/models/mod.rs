// src/models/mod.rs

//! Domain models for the faculty crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod department;
mod faculty;
mod site;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export all public types
pub use config::{Config, CrawlerConfig, FailurePolicy, OutputConfig, validate_departments};
pub use department::Department;
pub use faculty::{DirectoryRow, FacultyRecord};
pub use site::{NameFormat, Pagination, SiteDescriptor, SiteSelectors};

/// Counters and timings for one directory run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub department_count: usize,
    pub department_failures: usize,
    pub profile_count: usize,
    pub profile_failures: usize,
    pub row_count: usize,
}

impl CrawlStats {
    /// Wall-clock duration of the run in seconds.
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
