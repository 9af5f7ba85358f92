// src/services/profiles.rs

//! Profile extractor service.
//!
//! Fetches one profile page and pulls name, emails, biography and research
//! interests out of it with the site's selectors. Sections missing from the
//! page come back empty and are logged once each.

use std::collections::BTreeSet;

use scraper::Html;

use crate::error::Result;
use crate::models::{FacultyRecord, NameFormat};
use crate::services::names::format_name;
use crate::services::sections::{element_text, find_heading, section_match, section_text};
use crate::services::selectors::CompiledSite;
use crate::utils::http::PageFetcher;
use crate::utils::normalize_whitespace;
use crate::utils::url::validate_url;

/// Extracts [`FacultyRecord`]s from profile pages of one site.
pub struct ProfileExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    site: &'a CompiledSite,
}

impl<'a> ProfileExtractor<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, site: &'a CompiledSite) -> Self {
        Self { fetcher, site }
    }

    /// Fetch a profile page and extract its record.
    ///
    /// The URL is validated before anything is fetched. Fetch errors propagate.
    pub async fn extract(&self, profile_url: &str, department: &str) -> Result<FacultyRecord> {
        let url = validate_url(profile_url)?;
        let body = self.fetcher.fetch(url.as_str()).await.inspect_err(|e| {
            log::error!("Failed to fetch profile {}: {}", url, e);
        })?;
        Ok(self.extract_from_html(url.as_str(), &body, department))
    }

    /// Extract a record from an already-fetched profile page.
    pub fn extract_from_html(&self, profile_url: &str, body: &str, department: &str) -> FacultyRecord {
        let document = Html::parse_document(body);

        FacultyRecord {
            name: self.name(&document, profile_url),
            emails: self.emails(&document, profile_url),
            biography: self.biography(&document, profile_url),
            research_interests: self.research_interests(&document, profile_url),
            profile_url: profile_url.to_string(),
            department: department.to_string(),
        }
    }

    /// Display name per the site's name format.
    ///
    /// Falls back to the URL slug when the name heading is missing.
    pub fn name(&self, document: &Html, profile_url: &str) -> String {
        let descriptor = &self.site.descriptor;
        let heading = document
            .select(&self.site.name_heading)
            .next()
            .map(element_text);

        if let Some(name) = format_name(descriptor.name_format, profile_url, heading.as_deref()) {
            return name;
        }

        log::warn!("No name found for profile: {}", profile_url);
        format_name(NameFormat::Slug, profile_url, None).unwrap_or_default()
    }

    /// Distinct email addresses from `mailto:` links.
    pub fn emails(&self, document: &Html, profile_url: &str) -> BTreeSet<String> {
        let emails: BTreeSet<String> = document
            .select(&self.site.email)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(strip_mailto)
            .filter(|email| self.site.email_pattern.is_match(email))
            .collect();

        if emails.is_empty() {
            log::warn!("No emails found for profile: {}", profile_url);
        }
        emails
    }

    /// Text of the About section, or an empty string when the page has none.
    pub fn biography(&self, document: &Html, profile_url: &str) -> String {
        let descriptor = &self.site.descriptor;
        match find_heading(document, &self.site.section_heading, &descriptor.about_heading) {
            Some(heading) => {
                log::debug!("Extract About section text for profile: {}", profile_url);
                section_text(heading, &descriptor.empty_section_placeholder)
            }
            None => {
                log::warn!("No About section found for profile: {}", profile_url);
                String::new()
            }
        }
    }

    /// Research-interest tags in page order.
    pub fn research_interests(&self, document: &Html, profile_url: &str) -> Vec<String> {
        let descriptor = &self.site.descriptor;
        let container = find_heading(document, &self.site.section_heading, &descriptor.research_heading)
            .and_then(|heading| section_match(heading, &self.site.research_container));

        let Some(container) = container else {
            log::warn!("No research interests found for profile: {}", profile_url);
            return Vec::new();
        };

        container
            .select(&self.site.research_item)
            .map(|item| normalize_whitespace(&element_text(item)))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// `mailto:` target without scheme, query or surrounding whitespace.
fn strip_mailto(href: &str) -> Option<String> {
    let href = href.trim();
    let scheme = href.get(..7)?;
    if !scheme.eq_ignore_ascii_case("mailto:") {
        return None;
    }
    let address = href[7..].split('?').next().unwrap_or_default().trim();
    (!address.is_empty()).then(|| address.to_string())
}
