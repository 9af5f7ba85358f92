//! Service layer for the faculty crawler.
//!
//! This module contains the business logic for:
//! - Listing pagination (`ListingPaginator`)
//! - Profile extraction (`ProfileExtractor`)
//! - Section-bounded text extraction (`sections`)
//! - Name formatting (`names`)
//! - Site descriptor lookup (`SiteRegistry`)

mod listing;
pub mod names;
mod profiles;
mod registry;
pub mod sections;
mod selectors;

pub use listing::{Listing, ListingPaginator};
pub use profiles::ProfileExtractor;
pub use registry::SiteRegistry;
pub use selectors::{CompiledSite, parse_selector};
