use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so an output directory can be tied back to the
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackoffKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[site]
base-url = "https://qa.example.com/QA"
page-param = "p"
user-agent = "TestAgent/1.0"

[fetch]
max-attempts = 5
retry-wait-secs = 2
cooldown-secs = 0
backoff = "exponential"
max-wait-secs = 30
timeout-secs = 10

[crawl]
max-page = 4
skip-main-page = true

[selectors]
title = "h2.title"

[output]
dir = "out"
records-file = "qa.jsonl"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://qa.example.com/QA");
        assert_eq!(config.site.page_param, "p");
        assert_eq!(config.fetch.max_attempts, 5);
        assert_eq!(config.fetch.backoff, BackoffKind::Exponential);
        assert_eq!(config.fetch.timeout_secs, Some(10));
        assert_eq!(config.crawl.max_page, 4);
        assert!(config.crawl.skip_main_page);
        assert_eq!(config.selectors.title, "h2.title");
        // Unset keys keep their defaults
        assert_eq!(config.selectors.answer, "div.QaAnswerOne-content-main");
        assert_eq!(config.output.url_list_file, "question_urls.txt");
        assert_eq!(config.output.records_file, "qa.jsonl");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://www.legis-pedia.com/QA");
        assert_eq!(config.fetch.max_attempts, 3);
        assert_eq!(config.fetch.retry_wait_secs, 60);
        assert_eq!(config.fetch.cooldown_secs, 1);
        assert_eq!(config.fetch.backoff, BackoffKind::Fixed);
        assert_eq!(config.fetch.timeout_secs, None);
        assert_eq!(config.crawl.max_page, 226);
        assert!(!config.crawl.skip_main_page);
        assert_eq!(config.output.dir, "outputs");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_unknown_backoff() {
        let file = create_temp_config("[fetch]\nbackoff = \"random\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[fetch]\nmax-attempts = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
