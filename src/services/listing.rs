// src/services/listing.rs

//! Listing paginator.
//!
//! Walks `listing?…&page=0,1,2,…` until the site's "no results" sentinel shows
//! up or the page cap is reached, collecting profile-link fragments.

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::services::sections::element_text;
use crate::services::selectors::CompiledSite;
use crate::utils::http::PageFetcher;
use crate::utils::url::{validate_url, with_query_param};
use crate::utils::{normalize_whitespace, resolve_url};

/// Profile links collected from a listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Link fragments in page order, duplicates kept
    pub links: Vec<String>,

    /// Page URLs fetched, in order
    pub pages: Vec<String>,

    /// Whether the "no results" sentinel ended the walk
    pub reached_end: bool,
}

impl Listing {
    /// Resolve fragments against `base` into absolute URLs, dropping repeats.
    pub fn profile_urls(&self, base: &Url) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.links
            .iter()
            .map(|link| resolve_url(base, link))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }
}

enum PageScan {
    NoResults,
    Links(Vec<String>),
}

/// Sequential paginator over one site's listing pages.
pub struct ListingPaginator<'a> {
    fetcher: &'a dyn PageFetcher,
    site: &'a CompiledSite,
}

impl<'a> ListingPaginator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, site: &'a CompiledSite) -> Self {
        Self { fetcher, site }
    }

    /// Collect profile links from a listing, fetching at most `max_pages` pages.
    ///
    /// The URL is validated before anything is fetched. Fetch errors propagate.
    pub async fn collect(&self, listing_url: &str, max_pages: u32) -> Result<Listing> {
        let base = validate_url(listing_url)?;
        let mut listing = Listing::default();

        let Some(pagination) = &self.site.descriptor.pagination else {
            if max_pages == 0 {
                return Ok(listing);
            }
            log::info!("Processing single-page listing: {}", base);
            let body = self.fetch(base.as_str()).await?;
            listing.pages.push(base.to_string());
            if let PageScan::Links(links) = self.scan(&body) {
                listing.links = links;
            }
            return Ok(listing);
        };

        for offset in 0..max_pages {
            let Some(page_number) = pagination.start_page.checked_add(offset) else {
                log::warn!("Page index overflow after page {} of {}", u32::MAX, base);
                break;
            };
            let page_url = with_query_param(&base, &pagination.param, &page_number.to_string());
            log::info!("Processing page {}: {}", page_number, page_url);

            let body = self.fetch(page_url.as_str()).await?;
            listing.pages.push(page_url.to_string());

            match self.scan(&body) {
                PageScan::NoResults => {
                    log::info!("No results found for page {}: {}", page_number, page_url);
                    listing.reached_end = true;
                    break;
                }
                PageScan::Links(links) => {
                    log::debug!("Page {} yielded {} links", page_number, links.len());
                    listing.links.extend(links);
                }
            }
        }

        if !listing.reached_end {
            log::warn!(
                "Stopped at page cap ({}) before the end of {}",
                max_pages,
                base
            );
        }

        Ok(listing)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetcher.fetch(url).await.inspect_err(|e| {
            log::error!("Failed to fetch listing page {}: {}", url, e);
        })
    }

    fn scan(&self, body: &str) -> PageScan {
        let document = Html::parse_document(body);
        if self.has_sentinel(&document) {
            return PageScan::NoResults;
        }

        let attr = &self.site.descriptor.selectors.link_attr;
        let links = document
            .select(&self.site.profile_link)
            .filter_map(|a| a.value().attr(attr))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect();
        PageScan::Links(links)
    }

    fn has_sentinel(&self, document: &Html) -> bool {
        let Some(selector) = &self.site.no_results else {
            return false;
        };
        let wanted = self
            .site
            .descriptor
            .pagination
            .as_ref()
            .and_then(|p| p.no_results_text.as_deref())
            .map(normalize_whitespace);

        document.select(selector).any(|el| match &wanted {
            Some(text) => normalize_whitespace(&element_text(el)).contains(text.as_str()),
            None => true,
        })
    }
}
