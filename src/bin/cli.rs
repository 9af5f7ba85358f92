//! Faculty Crawler CLI
//!
//! Local execution entry point over the `faculty_crawler` library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use faculty_crawler::{
    error::{AppError, Result},
    models::{Config, Department},
    pipeline,
    services::{ListingPaginator, ProfileExtractor, SiteRegistry},
    storage::LocalStorage,
    utils::{http::HttpFetcher, url::validate_url},
};

/// Faculty Directory Crawler
#[derive(Parser, Debug)]
#[command(
    name = "faculty-crawler",
    version,
    about = "Crawls university department directories for faculty profiles"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "faculty.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every department and write the merged table
    Crawl {
        /// Site used by departments that don't name one
        #[arg(long)]
        site: Option<String>,

        /// Department as NAME=URL; replaces the configured map when given
        #[arg(short, long = "department", value_name = "NAME=URL")]
        departments: Vec<String>,

        /// CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JSON snapshot to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the profile links of one listing
    Listing {
        #[arg(long, default_value = "seas")]
        site: String,

        /// Listing URL
        url: String,

        /// Override the site's page cap
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Extract one profile page and print it as JSON
    Profile {
        #[arg(long, default_value = "seas")]
        site: String,

        /// Profile URL
        url: String,

        /// Department label for the record
        #[arg(long, default_value = "")]
        department: String,
    },

    /// List registered sites
    Sites,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn parse_departments(pairs: &[String]) -> Result<Vec<Department>> {
    pairs
        .iter()
        .map(|pair| {
            Department::parse_pair(pair).ok_or_else(|| {
                AppError::validation(format!("Expected NAME=URL for --department, got '{pair}'"))
            })
        })
        .collect()
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Configuration source: {}", cli.config.display());

    match cli.command {
        Command::Crawl {
            site,
            departments,
            output,
            json,
        } => {
            if let Some(site) = site {
                config.default_site = site;
            }
            if !departments.is_empty() {
                config.departments = parse_departments(&departments)?;
            }
            if let Some(output) = output {
                config.output.csv_path = output;
            }
            if json.is_some() {
                config.output.json_path = json;
            }
            config.validate()?;

            let registry = SiteRegistry::from_config(&config)?;
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let storage = LocalStorage::from_config(&config.output);

            let (report, _) = pipeline::run_crawler(
                &config,
                &registry,
                &config.departments,
                &fetcher,
                &storage,
            )
            .await?;

            if !report.failed_departments.is_empty() {
                log::warn!(
                    "Departments without rows: {}",
                    report.failed_departments.join(", ")
                );
            }
            log::info!("Crawl complete!");
        }

        Command::Listing {
            site,
            url,
            max_pages,
        } => {
            let registry = SiteRegistry::from_config(&config)?;
            let site = registry.get(&site)?;
            let base = validate_url(&url)?;
            let fetcher = HttpFetcher::from_config(&config.crawler)?;

            let listing = ListingPaginator::new(&fetcher, site)
                .collect(base.as_str(), max_pages.unwrap_or(site.descriptor.max_pages()))
                .await?;

            for profile_url in listing.profile_urls(&base) {
                println!("{profile_url}");
            }
            log::info!(
                "{} link(s) over {} page(s)",
                listing.links.len(),
                listing.pages.len()
            );
        }

        Command::Profile {
            site,
            url,
            department,
        } => {
            let registry = SiteRegistry::from_config(&config)?;
            let site = registry.get(&site)?;
            let fetcher = HttpFetcher::from_config(&config.crawler)?;

            let record = ProfileExtractor::new(&fetcher, site)
                .extract(&url, &department)
                .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Sites => {
            let registry = SiteRegistry::from_config(&config)?;
            for site in registry.sites() {
                let paging = match &site.descriptor.pagination {
                    Some(p) => format!("paginated by '{}' (max {})", p.param, p.max_pages),
                    None => "single page".to_string(),
                };
                println!("{:<8} {} [{}]", site.id(), site.descriptor.name, paging);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} departments)", config.departments.len());

            let registry = SiteRegistry::from_config(&config)?;
            for dept in &config.departments {
                registry.get(dept.site_or(&config.default_site))?;
            }
            log::info!("✓ Sites OK ({})", registry.ids().collect::<Vec<_>>().join(", "));

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
