// src/pipeline/crawl.rs

//! Directory crawling pipeline.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, CrawlStats, Department, DirectoryRow, validate_departments};
use crate::services::SiteRegistry;
use crate::storage::{DirectoryStorage, WriteMetadata};
use crate::utils::http::PageFetcher;
use crate::utils::log;

use super::fanout::crawl_departments;
use super::merge::merge_by_name;

/// Merged rows and run statistics.
#[derive(Debug)]
pub struct DirectoryReport {
    pub rows: Vec<DirectoryRow>,
    pub stats: CrawlStats,
    /// Names of departments that produced no rows
    pub failed_departments: Vec<String>,
}

/// Crawl a department map and merge the results by faculty name.
///
/// Crawler settings, department URLs and site ids are checked before the
/// first request.
pub async fn run_directory(
    config: &Config,
    registry: &SiteRegistry,
    departments: &[Department],
    fetcher: &dyn PageFetcher,
) -> Result<DirectoryReport> {
    let start_time = Utc::now();
    log::header("Faculty directory crawl starting");

    config.crawler.validate()?;
    validate_departments(departments)?;
    ::log::info!("Loaded {} department(s)", departments.len());

    log::step(1, 2, "Crawl - Fetching listings and profiles");
    let outcome = crawl_departments(
        fetcher,
        registry,
        departments,
        &config.default_site,
        &config.crawler,
    )
    .await?;

    let profile_count = outcome.profile_total();
    let profile_failures = outcome.profile_failures();
    let failed_departments: Vec<String> =
        outcome.failures.iter().map(|(name, _)| name.clone()).collect();

    log::step(2, 2, "Merge - Combining faculty across departments");
    let rows = merge_by_name(outcome.into_records());

    let stats = CrawlStats {
        start_time,
        end_time: Utc::now(),
        department_count: departments.len(),
        department_failures: failed_departments.len(),
        profile_count,
        profile_failures,
        row_count: rows.len(),
    };

    log::summary(
        "Directory Results",
        &[
            ("Departments", stats.department_count.to_string()),
            ("Failed departments", stats.department_failures.to_string()),
            ("Profiles", stats.profile_count.to_string()),
            ("Failed profiles", stats.profile_failures.to_string()),
            ("Rows", stats.row_count.to_string()),
            ("Elapsed (s)", stats.elapsed_secs().to_string()),
        ],
    );

    Ok(DirectoryReport {
        rows,
        stats,
        failed_departments,
    })
}

/// Crawl a department map and write the merged rows to storage.
pub async fn run_crawler(
    config: &Config,
    registry: &SiteRegistry,
    departments: &[Department],
    fetcher: &dyn PageFetcher,
    storage: &dyn DirectoryStorage,
) -> Result<(DirectoryReport, WriteMetadata)> {
    let report = run_directory(config, registry, departments, fetcher).await?;

    let written = storage.write_rows(&report.rows, &report.stats).await?;
    ::log::info!("Saved {} rows to {}", written.row_count, written.csv_location);
    if let Some(json) = &written.json_location {
        log::sub_item(&format!("JSON snapshot: {json}"));
    }

    Ok((report, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::MemoryFetcher;

    #[tokio::test]
    async fn invalid_department_url_fails_before_any_request() {
        let fetcher = MemoryFetcher::new();
        let registry = SiteRegistry::builtin().unwrap();
        let departments = vec![Department::new("Physics", "not-a-url")];

        let err = run_directory(&Config::default(), &registry, &departments, &fetcher)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn zero_timeout_fails_before_any_request() {
        let fetcher = MemoryFetcher::new()
            .with_page("https://eng.example.edu/chem?page=0", "<p>none</p>");
        let registry = SiteRegistry::builtin().unwrap();
        let departments = vec![Department::new("Chemistry", "https://eng.example.edu/chem")];
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;

        let err = run_directory(&config, &registry, &departments, &fetcher)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn empty_department_map_yields_empty_report() {
        let fetcher = MemoryFetcher::new();
        let registry = SiteRegistry::builtin().unwrap();

        let report = run_directory(&Config::default(), &registry, &[], &fetcher)
            .await
            .unwrap();

        assert!(report.rows.is_empty());
        assert_eq!(report.stats.department_count, 0);
        assert_eq!(fetcher.request_count(), 0);
    }
}
