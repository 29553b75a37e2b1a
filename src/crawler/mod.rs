//! Crawler module for page fetching and field extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with a fixed retry budget
//! - HTML parsing for listing links and question fields
//! - The two-phase harvest loop

mod coordinator;
mod fetcher;
mod parser;
pub mod retry;

pub use coordinator::{listing_page_url, run_harvest, stats_from_file, Harvester};
pub use fetcher::{build_http_client, FetchError, ResilientFetcher};
pub use parser::{extract_question_urls, extract_record, ExtractedPage, PageSelectors, QaField};
pub use retry::{Backoff, RetryPolicy};

use crate::config::Config;
use crate::output::HarvestStats;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point for a harvest. It will:
/// 1. Build the HTTP client and compile the selectors
/// 2. Collect question URLs from the listing pages (unless skipped)
/// 3. Fetch and extract every question page
/// 4. Write the JSONL output
pub async fn harvest(config: Config) -> Result<HarvestStats, HarvestError> {
    run_harvest(config).await
}
