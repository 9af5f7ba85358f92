//! Department map entries.

use serde::{Deserialize, Serialize};

/// A department and the listing page that enumerates its faculty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    /// Display name, also written to the output's department column
    pub name: String,

    /// Listing page URL
    pub url: String,

    /// Site descriptor id; falls back to the configured default site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Department {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            site: None,
        }
    }

    /// Parse a `NAME=URL` pair as given on the command line.
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (name, url) = pair.split_once('=')?;
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return None;
        }
        Some(Self::new(name, url))
    }

    /// The site id to use, given the configured default.
    pub fn site_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.site.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_splits_on_first_equals() {
        let dept = Department::parse_pair("Physics=https://example.edu/people?x=1&page=").unwrap();
        assert_eq!(dept.name, "Physics");
        assert_eq!(dept.url, "https://example.edu/people?x=1&page=");
    }

    #[test]
    fn parse_pair_rejects_missing_parts() {
        assert!(Department::parse_pair("Physics").is_none());
        assert!(Department::parse_pair("=https://example.edu").is_none());
        assert!(Department::parse_pair("Physics=").is_none());
    }

    #[test]
    fn site_falls_back_to_default() {
        let mut dept = Department::new("Physics", "https://example.edu");
        assert_eq!(dept.site_or("seas"), "seas");
        dept.site = Some("som".to_string());
        assert_eq!(dept.site_or("seas"), "som");
    }
}
