//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Department, SiteDescriptor};
use crate::utils::url::validate_url;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Site used by departments that don't name one
    #[serde(default = "defaults::default_site")]
    pub default_site: String,

    /// Department map, in output order
    #[serde(default = "defaults::default_departments")]
    pub departments: Vec<Department>,

    /// Extra or overriding site descriptors
    #[serde(default)]
    pub sites: Vec<SiteDescriptor>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.crawler.validate()?;
        if self.default_site.trim().is_empty() {
            return Err(AppError::validation("default_site is empty"));
        }
        validate_departments(&self.departments)
    }
}

/// Check that department names are present and unique and URLs are well-formed.
pub fn validate_departments(departments: &[Department]) -> Result<()> {
    let mut seen = HashSet::new();
    for dept in departments {
        if dept.name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Department with URL {} has no name",
                dept.url
            )));
        }
        if !seen.insert(dept.name.as_str()) {
            return Err(AppError::validation(format!(
                "Department '{}' is listed twice",
                dept.name
            )));
        }
        validate_url(&dept.url)?;
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            default_site: defaults::default_site(),
            departments: defaults::default_departments(),
            sites: Vec::new(),
        }
    }
}

/// What to do when a single profile fails to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and continue with the next profile
    #[default]
    Skip,
    /// Abandon the whole department
    Abort,
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum departments crawled at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Profile failure handling
    #[serde(default)]
    pub on_profile_error: FailurePolicy,
}

impl CrawlerConfig {
    /// Reject settings under which every request would fail.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            on_profile_error: FailurePolicy::default(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV output path
    #[serde(default = "defaults::csv_path")]
    pub csv_path: PathBuf,

    /// Optional JSON snapshot path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,

    /// Separator between merged department names
    #[serde(default = "defaults::department_separator")]
    pub department_separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: defaults::csv_path(),
            json_path: None,
            department_separator: defaults::department_separator(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::Department;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; faculty-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        8
    }

    // Output defaults
    pub fn csv_path() -> PathBuf {
        PathBuf::from("faculty.csv")
    }
    pub fn department_separator() -> String {
        "; ".into()
    }

    pub fn default_site() -> String {
        "seas".into()
    }

    pub fn default_departments() -> Vec<Department> {
        const PEOPLE_QUERY: &str =
            "?keyword=&position=2&impact_area=All&research_area=All";
        const BASE: &str = "https://engineering.virginia.edu/department";

        [
            ("Biomedical Engineering", "biomedical-engineering/people"),
            ("Chemical Engineering", "chemical-engineering/people"),
            (
                "Civil and Environmental Engineering",
                "civil-and-environmental-engineering/people",
            ),
            (
                "Electrical and Computer Engineering",
                "electrical-and-computer-engineering/faculty",
            ),
            ("Engineering and Society", "engineering-and-society/people"),
            (
                "Materials Science and Engineering",
                "materials-science-and-engineering/people",
            ),
            (
                "Mechanical and Aerospace Engineering",
                "mechanical-and-aerospace-engineering/people",
            ),
            (
                "Systems and Information Engineering",
                "systems-and-information-engineering/people",
            ),
        ]
        .into_iter()
        .map(|(name, path)| Department::new(name, format!("{BASE}/{path}{PEOPLE_QUERY}")))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_departments_cover_engineering_school() {
        let config = Config::default();
        assert_eq!(config.departments.len(), 8);
        assert_eq!(config.default_site, "seas");
        assert!(config.departments.iter().all(|d| d.site.is_none()));
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.crawler.validate().unwrap_err().is_validation());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_department_names() {
        let mut config = Config::default();
        let first = config.departments[0].clone();
        config.departments.push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_department_url() {
        let mut config = Config::default();
        config.departments.push(Department::new("Physics", "not-a-url"));
        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            on_profile_error = "abort"

            [[departments]]
            name = "Physics"
            url = "https://example.edu/physics/people"
            site = "som"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.on_profile_error, FailurePolicy::Abort);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.output.department_separator, "; ");
        assert_eq!(config.departments.len(), 1);
        assert_eq!(config.departments[0].site.as_deref(), Some("som"));
    }
}
