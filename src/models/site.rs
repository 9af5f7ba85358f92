// src/models/site.rs

//! Per-site descriptors: selector tables and name-formatting strategies.

use serde::{Deserialize, Serialize};

/// How a display name is derived from a profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// Capitalize the hyphen-joined last path segment of the profile URL.
    #[default]
    Slug,
    /// Reorder a `Last, First` heading into `First Last`.
    LastFirst,
    /// Use the heading text as-is.
    Heading,
}

/// Pagination settings for a multi-page listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Query parameter carrying the page index
    #[serde(default = "defaults::page_param")]
    pub param: String,

    /// First page index
    #[serde(default)]
    pub start_page: u32,

    /// Hard cap on the number of pages fetched
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,

    /// Selector for the "no results" element that ends pagination
    pub no_results_selector: String,

    /// Text the sentinel element must contain (any text if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_results_text: Option<String>,
}

/// CSS selectors used on listing and profile pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Links to individual profiles on a listing page
    pub profile_link: String,

    /// Attribute holding the profile link (usually "href")
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// `mailto:` anchors on a profile page
    pub email: String,

    /// Heading holding the display name
    pub name_heading: String,

    /// Container inside the research section
    pub research_container: String,

    /// Individual research-interest items inside the container
    pub research_item: String,
}

/// Everything the engine needs to know about one institution's site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDescriptor {
    /// Registry key (e.g., "seas")
    pub id: String,

    /// Human-readable institution name
    pub name: String,

    /// Listing pagination; `None` means the listing is a single page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,

    pub selectors: SiteSelectors,

    #[serde(default)]
    pub name_format: NameFormat,

    /// Tag of the section headings on profile pages
    #[serde(default = "defaults::section_tag")]
    pub section_tag: String,

    #[serde(default = "defaults::about_heading")]
    pub about_heading: String,

    #[serde(default = "defaults::research_heading")]
    pub research_heading: String,

    /// Text returned for a section heading with nothing under it
    #[serde(default = "defaults::empty_section_placeholder")]
    pub empty_section_placeholder: String,
}

impl SiteDescriptor {
    /// School of Engineering and Applied Science: paginated, names from URL slugs.
    pub fn seas() -> Self {
        Self {
            id: "seas".to_string(),
            name: "School of Engineering and Applied Science".to_string(),
            pagination: Some(Pagination {
                param: defaults::page_param(),
                start_page: 0,
                max_pages: defaults::max_pages(),
                no_results_selector: "div.results_message_inner.typography".to_string(),
                no_results_text: Some("There are no results matching these criteria.".to_string()),
            }),
            selectors: SiteSelectors {
                profile_link: "a.contact_block_name_link".to_string(),
                link_attr: defaults::link_attr(),
                email: "a.people_meta_detail_info_link[href^='mailto:']".to_string(),
                name_heading: "h1#page_title".to_string(),
                research_container: "div.directory_grid_items".to_string(),
                research_item: "div.directory_grid_item".to_string(),
            },
            name_format: NameFormat::Slug,
            section_tag: defaults::section_tag(),
            about_heading: defaults::about_heading(),
            research_heading: defaults::research_heading(),
            empty_section_placeholder: defaults::empty_section_placeholder(),
        }
    }

    /// School of Medicine: one listing page, names from `Last, First` headings.
    pub fn som() -> Self {
        Self {
            id: "som".to_string(),
            name: "School of Medicine".to_string(),
            pagination: None,
            selectors: SiteSelectors {
                profile_link: "a.faculty-name".to_string(),
                link_attr: defaults::link_attr(),
                email: "a[href^='mailto:']".to_string(),
                name_heading: "h1".to_string(),
                research_container: "ul".to_string(),
                research_item: "li".to_string(),
            },
            name_format: NameFormat::LastFirst,
            section_tag: defaults::section_tag(),
            about_heading: defaults::about_heading(),
            research_heading: defaults::research_heading(),
            empty_section_placeholder: defaults::empty_section_placeholder(),
        }
    }

    /// Page cap for this site's listings (1 when unpaginated).
    pub fn max_pages(&self) -> u32 {
        self.pagination.as_ref().map_or(1, |p| p.max_pages)
    }
}

mod defaults {
    pub fn page_param() -> String {
        "page".into()
    }
    pub fn max_pages() -> u32 {
        100
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn section_tag() -> String {
        "h2".into()
    }
    pub fn about_heading() -> String {
        "About".into()
    }
    pub fn research_heading() -> String {
        "Research Interests".into()
    }
    pub fn empty_section_placeholder() -> String {
        "No About Section Found".into()
    }
}
