use serde::{Deserialize, Serialize};

/// Main configuration structure for QA-Harvest
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults for the legis-pedia Q&A site.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetch: FetchConfig,
    pub crawl: CrawlConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listing page URL; detail links are resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Query parameter carrying the listing page number
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.legis-pedia.com/QA".to_string(),
            page_param: "page".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
        }
    }
}

/// Wait strategy between fetch attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Same wait before every retry
    #[default]
    Fixed,
    /// Wait doubles after each failure, capped at `max-wait-secs`
    Exponential,
}

/// Fetch and retry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total attempts per URL, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Wait before a retry (seconds)
    #[serde(rename = "retry-wait-secs")]
    pub retry_wait_secs: u64,

    /// Pause after every fetch, successful or abandoned (seconds)
    #[serde(rename = "cooldown-secs")]
    pub cooldown_secs: u64,

    pub backoff: BackoffKind,

    /// Upper bound on the exponential wait (seconds)
    #[serde(rename = "max-wait-secs")]
    pub max_wait_secs: u64,

    /// Per-request timeout; the client default applies when unset
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_wait_secs: 60,
            cooldown_secs: 1,
            backoff: BackoffKind::Fixed,
            max_wait_secs: 600,
            timeout_secs: None,
        }
    }
}

/// Listing crawl configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Last listing page to visit (inclusive)
    #[serde(rename = "max-page")]
    pub max_page: u32,

    /// Reuse the saved URL list instead of walking the listing pages
    #[serde(rename = "skip-main-page")]
    pub skip_main_page: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_page: 226,
            skip_main_page: false,
        }
    }
}

/// CSS selectors used to pull fields out of the site's markup
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One heading per question teaser on a listing page
    #[serde(rename = "listing-heading")]
    pub listing_heading: String,

    /// Link inside a teaser heading
    #[serde(rename = "listing-link")]
    pub listing_link: String,

    pub title: String,
    pub question: String,
    pub replier: String,
    pub answer: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_heading: "h3".to_string(),
            listing_link: "a[href]".to_string(),
            title: "h1".to_string(),
            question: "p.page-desc.page-question-desc".to_string(),
            replier: "div.inline-block".to_string(),
            answer: "div.QaAnswerOne-content-main".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding every artifact of a run
    pub dir: String,

    /// File name of the saved question URL list
    #[serde(rename = "url-list-file")]
    pub url_list_file: String,

    /// File name of the JSONL record output
    #[serde(rename = "records-file")]
    pub records_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "outputs".to_string(),
            url_list_file: "question_urls.txt".to_string(),
            records_file: "legal_qa.jsonl".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn url_list_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.dir).join(&self.url_list_file)
    }

    pub fn records_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.dir).join(&self.records_file)
    }
}
