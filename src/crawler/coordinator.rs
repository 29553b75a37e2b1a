//! Harvest coordinator - the two-phase crawl loop
//!
//! Phase one walks the listing pages and saves the question URLs; phase two
//! fetches every question page and extracts a record. Both phases run
//! strictly in sequence, one request at a time, with a fixed cooldown after
//! every fetch.

use crate::config::Config;
use crate::crawler::fetcher::ResilientFetcher;
use crate::crawler::parser::{extract_question_urls, extract_record, PageSelectors};
use crate::output::{
    log_statistics, read_url_list, write_records, write_url_list, HarvestStats, QaRecord,
};
use crate::HarvestError;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Progress is logged every this many items
const PROGRESS_INTERVAL: usize = 10;

/// Main harvest coordinator
pub struct Harvester {
    config: Config,
    fetcher: ResilientFetcher,
    selectors: PageSelectors,
    cooldown: Duration,
    stats: HarvestStats,
}

impl Harvester {
    /// Creates a harvester for the given configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - HTTP client built and selectors compiled
    /// * `Err(HarvestError)` - The configuration is unusable
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = ResilientFetcher::new(&config.site, &config.fetch)?;
        let selectors = PageSelectors::from_config(&config.selectors)?;
        let cooldown = Duration::from_secs(config.fetch.cooldown_secs);

        Ok(Self {
            config,
            fetcher,
            selectors,
            cooldown,
            stats: HarvestStats::default(),
        })
    }

    pub fn stats(&self) -> &HarvestStats {
        &self.stats
    }

    /// Runs both phases and writes all artifacts
    ///
    /// 1. Create the output directory
    /// 2. Unless `skip_main_page` is set, collect and save the question URLs
    /// 3. Reload the saved URL list
    /// 4. Fetch every question page and extract a record
    /// 5. Write all records in one go
    pub async fn run(&mut self) -> Result<HarvestStats, HarvestError> {
        let output = self.config.output.clone();
        std::fs::create_dir_all(&output.dir)?;

        let url_list_path = output.url_list_path();

        if self.config.crawl.skip_main_page {
            tracing::info!(
                "Skipping listing pages, reusing {}",
                url_list_path.display()
            );
        } else {
            let urls = self.collect_question_urls().await;
            tracing::info!("Found {} questions", urls.len());
            write_url_list(&url_list_path, &urls)?;
        }

        let urls = read_url_list(&url_list_path)?;
        self.stats.unique_urls = urls.len() as u64;

        let records = self.scrape_questions(&urls).await;

        let records_path = output.records_path();
        write_records(&records_path, &records)?;
        self.stats.records_written = records.len() as u64;
        tracing::info!(
            "Wrote {} records to {}",
            records.len(),
            records_path.display()
        );

        log_statistics(&self.stats);

        Ok(self.stats.clone())
    }

    /// Walks listing pages `1..=max_page` and returns the distinct links
    ///
    /// A page that cannot be fetched is logged and skipped. Links keep the
    /// order in which they were first seen.
    pub async fn collect_question_urls(&mut self) -> Vec<String> {
        let max_page = self.config.crawl.max_page;
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        tracing::info!("Scraping {} listing pages", max_page);

        for page in 1..=max_page {
            let page_url = listing_page_url(
                self.fetcher.base_url(),
                &self.config.site.page_param,
                page,
            );

            match self.fetcher.fetch(page_url.as_str()).await {
                Ok(html) => {
                    self.stats.listing_pages_fetched += 1;
                    let links = extract_question_urls(&html, &self.selectors);
                    tracing::debug!("Listing page {}: {} links", page, links.len());

                    self.stats.links_found += links.len() as u64;
                    for link in links {
                        if seen.insert(link.clone()) {
                            urls.push(link);
                        }
                    }
                }
                Err(e) => {
                    self.stats.listing_pages_failed += 1;
                    tracing::error!("Skipping listing page {}: {}", page, e);
                }
            }

            self.cool_down().await;

            if page as usize % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {}/{} listing pages, {} questions so far",
                    page,
                    max_page,
                    urls.len()
                );
            }
        }

        urls
    }

    /// Fetches every question page and extracts its record
    ///
    /// Records come back in input order. A page that cannot be fetched
    /// contributes no record.
    pub async fn scrape_questions(&mut self, urls: &[String]) -> Vec<QaRecord> {
        let mut records = Vec::with_capacity(urls.len());

        tracing::info!("Scraping {} QA pages", urls.len());

        for (index, url) in urls.iter().enumerate() {
            match self.fetcher.fetch(url).await {
                Ok(html) => {
                    self.stats.detail_pages_fetched += 1;
                    let page = extract_record(&html, url, &self.selectors);

                    for field in &page.warnings {
                        tracing::warn!("Failed to extract {} from {}", field, url);
                    }

                    self.stats.record_missing_fields(&page.record);
                    records.push(page.record);
                }
                Err(e) => {
                    self.stats.detail_pages_failed += 1;
                    tracing::error!("Skipping {}: {}", url, e);
                }
            }

            self.cool_down().await;

            if (index + 1) % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {}/{} QA pages, {} records",
                    index + 1,
                    urls.len(),
                    records.len()
                );
            }
        }

        records
    }

    async fn cool_down(&self) {
        if !self.cooldown.is_zero() {
            tokio::time::sleep(self.cooldown).await;
        }
    }
}

/// Builds the URL of listing page `page` by setting the page query parameter
///
/// Any existing value of the parameter is replaced; other query parameters
/// are kept.
pub fn listing_page_url(base: &Url, page_param: &str, page: u32) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != page_param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(page_param, &page.to_string());
    url
}

/// Runs a complete harvest for `config`
pub async fn run_harvest(config: Config) -> Result<HarvestStats, HarvestError> {
    let mut harvester = Harvester::new(config)?;
    harvester.run().await
}

/// Statistics for a record file written by an earlier run
pub fn stats_from_file(path: &Path) -> Result<HarvestStats, HarvestError> {
    let records = crate::output::read_records(path)?;
    Ok(HarvestStats::from_records(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_page_url() {
        let base = Url::parse("https://www.legis-pedia.com/QA").unwrap();
        assert_eq!(
            listing_page_url(&base, "page", 1).as_str(),
            "https://www.legis-pedia.com/QA?page=1"
        );
        assert_eq!(
            listing_page_url(&base, "page", 226).as_str(),
            "https://www.legis-pedia.com/QA?page=226"
        );
    }

    #[test]
    fn test_listing_page_url_replaces_existing_page() {
        let base = Url::parse("https://example.com/QA?sort=new&page=9").unwrap();
        assert_eq!(
            listing_page_url(&base, "page", 2).as_str(),
            "https://example.com/QA?sort=new&page=2"
        );
    }

    #[test]
    fn test_new_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.answer = "div[".to_string();
        assert!(matches!(
            Harvester::new(config),
            Err(HarvestError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = Config::default();
        config.site.base_url = "::not a url::".to_string();
        assert!(Harvester::new(config).is_err());
    }
}
