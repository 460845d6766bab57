use crate::config::types::{Config, OutputConfig, ScraperConfig, SelectorConfig};
use crate::{ConfigError, ConfigResult};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_scraper_config(&config.scraper)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> ConfigResult<()> {
    if config.sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one site must be configured".to_string(),
        ));
    }

    for site in &config.sites {
        validate_site_url(site)?;
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a single start URL
fn validate_site_url(site: &str) -> ConfigResult<()> {
    let url = Url::parse(site)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site URL '{}': {}", site, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Site URL '{}' must use http or https",
            site
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Site URL '{}' has no host",
            site
        )));
    }

    Ok(())
}

/// Validates that every selector is well-formed CSS
fn validate_selectors(config: &SelectorConfig) -> ConfigResult<()> {
    let named = [
        ("event", &config.event),
        ("name", &config.name),
        ("date", &config.date),
        ("venue", &config.venue),
        ("speakers", &config.speakers),
        ("price", &config.price),
        ("next-page", &config.next_page),
    ];

    for (name, selector) in named {
        if selector.trim().is_empty() || Selector::parse(selector).is_err() {
            return Err(ConfigError::InvalidSelector {
                name: name.to_string(),
                selector: selector.clone(),
            });
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
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
    fn test_validate_site_url() {
        assert!(validate_site_url("https://example.com").is_ok());
        assert!(validate_site_url("http://127.0.0.1:8080/events?page=1").is_ok());

        assert!(validate_site_url("").is_err());
        assert!(validate_site_url("example.com").is_err());
        assert!(validate_site_url("ftp://example.com/").is_err());
        assert!(validate_site_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.scraper.user_agent = "   ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let mut config = Config::default();
        config.selectors.venue = "div[[".to_string();

        match validate(&config) {
            Err(ConfigError::InvalidSelector { name, .. }) => assert_eq!(name, "venue"),
            other => panic!("expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_output_paths_rejected() {
        let mut config = Config::default();
        config.output.csv_path.clear();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.output.database_path.clear();
        assert!(validate(&config).is_err());
    }
}
