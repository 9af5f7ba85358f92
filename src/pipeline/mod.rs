//! Pipeline entry points for directory operations.
//!
//! - `run_directory`: Crawl a department map and merge rows by faculty name
//! - `run_crawler`: Same, then write the rows to storage

pub mod crawl;
pub mod fanout;
pub mod merge;

pub use crawl::{DirectoryReport, run_crawler, run_directory};
pub use fanout::{DepartmentOutcome, FanoutOutcome, crawl_department, crawl_departments};
pub use merge::merge_by_name;
