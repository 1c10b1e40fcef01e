use crate::config::types::{Config, CrawlerConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_selector_config(&config.selectors)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Compiles a CSS selector, mapping failures to a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: "selector cannot be empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("end-url", &config.end_url)?;
    Ok(())
}

/// Validates that every selector is non-empty and compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.next_page,
        &config.articles,
        &config.time,
        &config.subtitle,
    ] {
        compile_selector(selector)?;
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min-delay-ms ({}) must not exceed max-delay-ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            key, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.site.base_url = "www.pravda.com.ua".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_end_url() {
        let mut config = Config::default();
        config.site.end_url = "ftp://www.pravda.com.ua/archives/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_selector() {
        let mut config = Config::default();
        config.selectors.articles = "div.news >".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_empty_selector() {
        assert!(compile_selector("   ").is_err());
        assert!(compile_selector(".article__time").is_ok());
    }

    #[test]
    fn test_delay_bounds() {
        let mut config = Config::default();
        config.crawler.min_delay_ms = 0;
        config.crawler.max_delay_ms = 0;
        assert!(validate(&config).is_ok());

        config.crawler.min_delay_ms = 10;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_max_pages() {
        let mut config = Config::default();
        config.crawler.max_pages = Some(0);
        assert!(validate(&config).is_err());

        config.crawler.max_pages = Some(1);
        assert!(validate(&config).is_ok());
    }
}
