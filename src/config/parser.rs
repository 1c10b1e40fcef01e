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
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pravda_archive::config::load_config;
///
/// let config = load_config(Path::new("archive.toml")).unwrap();
/// println!("Base URL: {}", config.site.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be told apart by their settings.
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[site]
base-url = "https://www.pravda.com.ua"
end-url = "https://www.pravda.com.ua/archives/"

[selectors]
next-page = "div.archive-navigation > a.button.button_next"
articles = "div.news.news_all > div"
time = ".article__time"
subtitle = ".article__subtitle"

[crawler]
min-delay-ms = 500
max-delay-ms = 1500
max-pages = 30
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://www.pravda.com.ua");
        assert_eq!(config.crawler.min_delay_ms, 500);
        assert_eq!(config.crawler.max_delay_ms, 1500);
        assert_eq!(config.crawler.max_pages, Some(30));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config_content = r#"
[crawler]
max-pages = 5
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.end_url, "https://www.pravda.com.ua/archives/");
        assert_eq!(config.selectors.articles, "div.news.news_all > div");
        assert_eq!(config.crawler.min_delay_ms, 1000);
        assert_eq!(config.crawler.max_delay_ms, 3000);
        assert_eq!(config.crawler.max_pages, Some(5));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/archive.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
min-delay-ms = 5000
max-delay-ms = 1000
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
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
        let file1 = create_temp_config("[crawler]\nmax-pages = 1\n");
        let file2 = create_temp_config("[crawler]\nmax-pages = 2\n");

        let (_, hash1) = load_config_with_hash(file1.path()).unwrap();
        let (_, hash2) = load_config_with_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
