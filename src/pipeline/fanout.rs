// src/pipeline/fanout.rs

//! Department fan-out: one independent worker per department.
//!
//! Each worker paginates its listing and extracts profiles sequentially into
//! its own buffer. Workers share nothing mutable; results are collected in
//! department-map order.

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, Department, FacultyRecord, FailurePolicy};
use crate::services::{CompiledSite, ListingPaginator, ProfileExtractor, SiteRegistry};
use crate::utils::http::PageFetcher;
use crate::utils::url::validate_url;

/// Result of crawling one department.
#[derive(Debug, Default)]
pub struct DepartmentOutcome {
    pub department: String,
    pub records: Vec<FacultyRecord>,
    pub profile_total: usize,
    pub profile_failures: usize,
}

/// Results of crawling every department in a map.
#[derive(Debug, Default)]
pub struct FanoutOutcome {
    /// Successful departments, in department-map order
    pub departments: Vec<DepartmentOutcome>,

    /// Departments that produced no rows, with the reason
    pub failures: Vec<(String, AppError)>,
}

impl FanoutOutcome {
    pub fn profile_total(&self) -> usize {
        self.departments.iter().map(|d| d.profile_total).sum()
    }

    pub fn profile_failures(&self) -> usize {
        self.departments.iter().map(|d| d.profile_failures).sum()
    }

    /// All extracted records, in department-map order.
    pub fn into_records(self) -> impl Iterator<Item = FacultyRecord> {
        self.departments.into_iter().flat_map(|d| d.records)
    }
}

/// Crawl a single department: paginate its listing, then extract each profile.
pub async fn crawl_department(
    fetcher: &dyn PageFetcher,
    site: &CompiledSite,
    department: &Department,
    policy: FailurePolicy,
) -> Result<DepartmentOutcome> {
    let base = validate_url(&department.url)?;

    let listing = ListingPaginator::new(fetcher, site)
        .collect(base.as_str(), site.descriptor.max_pages())
        .await?;
    let profile_urls = listing.profile_urls(&base);

    log::info!(
        "[{}] {} profile links ({} unique) over {} page(s)",
        department.name,
        listing.links.len(),
        profile_urls.len(),
        listing.pages.len()
    );

    let extractor = ProfileExtractor::new(fetcher, site);
    let mut outcome = DepartmentOutcome {
        department: department.name.clone(),
        profile_total: profile_urls.len(),
        ..DepartmentOutcome::default()
    };

    for url in &profile_urls {
        match extractor.extract(url, &department.name).await {
            Ok(record) => outcome.records.push(record),
            Err(error) => match policy {
                FailurePolicy::Skip => {
                    outcome.profile_failures += 1;
                    log::warn!("[{}] Skipping profile {}: {}", department.name, url, error);
                }
                FailurePolicy::Abort => {
                    return Err(AppError::crawl(
                        &department.name,
                        format!("profile {url}: {error}"),
                    ));
                }
            },
        }
    }

    Ok(outcome)
}

/// Crawl every department, one worker per department.
///
/// Site lookups happen before any request, so an unknown site id fails the
/// whole run up front. After that, a failing department is logged and
/// recorded without stopping the others.
pub async fn crawl_departments(
    fetcher: &dyn PageFetcher,
    registry: &SiteRegistry,
    departments: &[Department],
    default_site: &str,
    config: &CrawlerConfig,
) -> Result<FanoutOutcome> {
    let jobs = departments
        .iter()
        .map(|dept| -> Result<_> { Ok((dept, registry.get(dept.site_or(default_site))?)) })
        .collect::<Result<Vec<_>>>()?;

    let concurrency = config.max_concurrent.clamp(1, jobs.len().max(1));
    let policy = config.on_profile_error;

    let results: Vec<_> = stream::iter(jobs)
        .map(|(dept, site)| async move {
            log::info!("Crawling {} ({})", dept.name, site.id());
            (dept, crawl_department(fetcher, site, dept, policy).await)
        })
        .buffered(concurrency)
        .collect()
        .await;

    let mut outcome = FanoutOutcome::default();
    for (dept, result) in results {
        match result {
            Ok(dept_outcome) => {
                log::info!(
                    "  {}: {} records ({} failed profiles)",
                    dept.name,
                    dept_outcome.records.len(),
                    dept_outcome.profile_failures
                );
                outcome.departments.push(dept_outcome);
            }
            Err(error) => {
                log::error!("Error processing department {}: {}", dept.name, error);
                outcome.failures.push((dept.name.clone(), error));
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::MemoryFetcher;

    const SENTINEL: &str = r#"<div class="results_message_inner typography">There are no results matching these criteria.</div>"#;

    fn listing(slugs: &[&str]) -> String {
        slugs
            .iter()
            .map(|s| format!(r#"<a class="contact_block_name_link" href="/faculty/{s}">x</a>"#))
            .collect()
    }

    fn profile(email: &str) -> String {
        format!(
            r#"<a class="people_meta_detail_info_link" href="mailto:{email}">m</a>
               <h2>About</h2><p>Bio for {email}</p>"#
        )
    }

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_page("https://eng.example.edu/chem?page=0", listing(&["jane-doe", "ann-lee", "jane-doe"]))
            .with_page("https://eng.example.edu/chem?page=1", SENTINEL)
            .with_page("https://eng.example.edu/mse?page=0", listing(&["jane-doe", "bo-chan"]))
            .with_page("https://eng.example.edu/mse?page=1", SENTINEL)
            .with_page("https://eng.example.edu/faculty/jane-doe", profile("jd@example.edu"))
            .with_page("https://eng.example.edu/faculty/ann-lee", profile("al@example.edu"))
    }

    fn departments() -> Vec<Department> {
        vec![
            Department::new("Chemical Engineering", "https://eng.example.edu/chem"),
            Department::new("Materials Science", "https://eng.example.edu/mse"),
        ]
    }

    #[tokio::test]
    async fn skip_policy_continues_past_failed_profile() {
        let fetcher = fetcher();
        let registry = SiteRegistry::builtin().unwrap();
        let site = registry.get("seas").unwrap();
        let depts = departments();
        let dept = &depts[1];

        let outcome = crawl_department(&fetcher, site, dept, FailurePolicy::Skip)
            .await
            .unwrap();

        assert_eq!(outcome.profile_total, 2);
        assert_eq!(outcome.profile_failures, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "Jane Doe");
        assert_eq!(outcome.records[0].department, "Materials Science");
    }

    #[tokio::test]
    async fn abort_policy_fails_department() {
        let fetcher = fetcher();
        let registry = SiteRegistry::builtin().unwrap();
        let site = registry.get("seas").unwrap();
        let depts = departments();
        let dept = &depts[1];

        let err = crawl_department(&fetcher, site, dept, FailurePolicy::Abort)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Crawl { .. }));
    }

    #[tokio::test]
    async fn repeated_links_fetched_once() {
        let fetcher = fetcher();
        let registry = SiteRegistry::builtin().unwrap();
        let site = registry.get("seas").unwrap();
        let depts = departments();
        let dept = &depts[0];

        let outcome = crawl_department(&fetcher, site, dept, FailurePolicy::Skip)
            .await
            .unwrap();

        assert_eq!(outcome.profile_total, 2);
        assert_eq!(outcome.records.len(), 2);
        // two listing pages + two distinct profiles
        assert_eq!(fetcher.request_count(), 4);
    }

    #[tokio::test]
    async fn fanout_keeps_department_order_and_isolates_failures() {
        let fetcher = fetcher();
        let registry = SiteRegistry::builtin().unwrap();
        let mut depts = departments();
        depts.insert(1, Department::new("Physics", "https://eng.example.edu/physics"));

        let outcome = crawl_departments(&fetcher, &registry, &depts, "seas", &CrawlerConfig::default())
            .await
            .unwrap();

        let names: Vec<_> = outcome.departments.iter().map(|d| d.department.as_str()).collect();
        assert_eq!(names, vec!["Chemical Engineering", "Materials Science"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, "Physics");
        assert_eq!(outcome.profile_total(), 4);
        assert_eq!(outcome.profile_failures(), 1);
        assert_eq!(outcome.into_records().count(), 3);
    }

    #[tokio::test]
    async fn unknown_site_fails_before_any_request() {
        let fetcher = fetcher();
        let registry = SiteRegistry::builtin().unwrap();
        let mut depts = departments();
        depts[1].site = Some("law".to_string());

        let result = crawl_departments(&fetcher, &registry, &depts, "seas", &CrawlerConfig::default()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(fetcher.request_count(), 0);
    }
}
