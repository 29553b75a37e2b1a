use crate::config::types::{Config, CrawlConfig, FetchConfig, OutputConfig, SiteConfig};
use crate::crawler::PageSelectors;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_crawl_config(&config.crawl)?;
    PageSelectors::from_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.page_param.trim().is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetch and retry configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.max_wait_secs < config.retry_wait_secs {
        return Err(ConfigError::Validation(format!(
            "max-wait-secs ({}) must not be below retry-wait-secs ({})",
            config.max_wait_secs, config.retry_wait_secs
        )));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be > 0 when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_page < 1 {
        return Err(ConfigError::Validation(format!(
            "max-page must be >= 1, got {}",
            config.max_page
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dir.is_empty() {
        return Err(ConfigError::Validation(
            "output dir cannot be empty".to_string(),
        ));
    }

    validate_file_name("url-list-file", &config.url_list_file)?;
    validate_file_name("records-file", &config.records_file)?;

    if config.url_list_file == config.records_file {
        return Err(ConfigError::Validation(format!(
            "url-list-file and records-file must differ, both are '{}'",
            config.records_file
        )));
    }

    Ok(())
}

/// Output files live directly inside the output directory
fn validate_file_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain file name, got '{}'",
            key, name
        )));
    }

    Ok(())
}
