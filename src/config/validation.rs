use crate::config::types::{
    Config, CrawlerConfig, ListingConfig, OutputConfig, SelectorConfig, UserAgentConfig,
};
use crate::crawler::compile_selector;
use crate::ConfigError;
use url::Url;

/// Upper bound on in-flight fetches per stage
const MAX_CONCURRENT_FETCHES: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_listing_config(&config.listing)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates the listing origin and every listing URL
fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    if config.origin.is_empty() {
        return Err(ConfigError::Validation(
            "listing origin cannot be empty".to_string(),
        ));
    }

    validate_http_url(&config.origin, "listing origin")?;

    if config.urls.is_empty() {
        return Err(ConfigError::Validation(
            "at least one listing URL is required".to_string(),
        ));
    }

    for url in &config.urls {
        validate_http_url(url, "listing URL")?;
    }

    Ok(())
}

/// Checks that every selector is non-empty and compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (field, selector) in [
        ("detail-link", &config.detail_link),
        ("region", &config.region),
        ("name", &config.name),
        ("code", &config.code),
        ("website", &config.website),
    ] {
        if selector.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{}' cannot be empty",
                field
            )));
        }
        compile_selector(selector)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.all_results_path.is_empty() {
        return Err(ConfigError::Validation(
            "all-results-path cannot be empty".to_string(),
        ));
    }

    if config.directory_results_path.is_empty() {
        return Err(ConfigError::Validation(
            "directory-results-path cannot be empty".to_string(),
        ));
    }

    if config.all_results_path == config.directory_results_path {
        return Err(ConfigError::Validation(format!(
            "output paths must differ, both are '{}'",
            config.all_results_path
        )));
    }

    Ok(())
}

/// Parses `value` and requires an http(s) scheme
fn validate_http_url(value: &str, what: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            what, value
        )));
    }

    Ok(())
}
