//! Compiled selector sets for site descriptors.
//!
//! Descriptors carry selectors as strings so they can live in config files;
//! compiling them once up front surfaces bad selectors before any request.

use regex::Regex;
use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::SiteDescriptor;

/// Loose `local@domain.tld` shape used to drop junk `mailto:` targets.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// A site descriptor with every selector parsed.
#[derive(Debug)]
pub struct CompiledSite {
    pub descriptor: SiteDescriptor,
    pub profile_link: Selector,
    pub no_results: Option<Selector>,
    pub email: Selector,
    pub name_heading: Selector,
    pub section_heading: Selector,
    pub research_container: Selector,
    pub research_item: Selector,
    pub email_pattern: Regex,
}

impl CompiledSite {
    /// Parse all selectors of a descriptor.
    pub fn compile(descriptor: SiteDescriptor) -> Result<Self> {
        let selectors = &descriptor.selectors;

        let no_results = descriptor
            .pagination
            .as_ref()
            .map(|p| parse_selector(&p.no_results_selector))
            .transpose()?;

        let email_pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| AppError::config(format!("email pattern: {e}")))?;

        Ok(Self {
            profile_link: parse_selector(&selectors.profile_link)?,
            no_results,
            email: parse_selector(&selectors.email)?,
            name_heading: parse_selector(&selectors.name_heading)?,
            section_heading: parse_selector(&descriptor.section_tag)?,
            research_container: parse_selector(&selectors.research_container)?,
            research_item: parse_selector(&selectors.research_item)?,
            email_pattern,
            descriptor,
        })
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
