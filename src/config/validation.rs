use crate::config::types::{
    Config, FetcherConfig, OutputConfig, PolitenessConfig, SelectorConfig, SiteConfig,
};
use crate::crawler::Selectors;
use crate::ConfigError;
use reqwest::header::HeaderValue;
use url::Url;

/// Characters a worksheet name may not contain
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_politeness_config(&config.politeness)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates the target site URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("listing-url", &config.listing_url)?;

    if let Some(base_url) = &config.base_url {
        validate_http_url("base-url", base_url)?;
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}

/// Validates the header template and transport timeouts
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user-agents must contain at least one entry".to_string(),
        ));
    }

    for user_agent in &config.user_agents {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agents cannot contain empty entries".to_string(),
            ));
        }
        validate_header_value("user-agents", user_agent)?;
    }

    validate_header_value("accept", &config.accept)?;
    validate_header_value("accept-encoding", &config.accept_encoding)?;
    validate_header_value("accept-language", &config.accept_language)?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_header_value(key: &str, value: &str) -> Result<(), ConfigError> {
    HeaderValue::from_str(value).map(|_| ()).map_err(|_| {
        ConfigError::Validation(format!("{} is not a valid header value: '{}'", key, value))
    })
}

/// Validates the politeness delay bounds
fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    if config.max_delay_ms == 0 {
        return Err(ConfigError::Validation(
            "max-delay-ms must be > 0".to_string(),
        ));
    }

    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min-delay-ms ({}) cannot exceed max-delay-ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation("path cannot be empty".to_string()));
    }

    let name_len = config.sheet_name.chars().count();
    if name_len == 0 || name_len > 31 {
        return Err(ConfigError::Validation(format!(
            "sheet-name must be 1 to 31 characters, got {}",
            name_len
        )));
    }

    if config.sheet_name.contains(INVALID_SHEET_CHARS) {
        return Err(ConfigError::Validation(format!(
            "sheet-name '{}' contains one of []:*?/\\",
            config.sheet_name
        )));
    }

    if config.sheet_name.starts_with('\'') || config.sheet_name.ends_with('\'') {
        return Err(ConfigError::Validation(format!(
            "sheet-name '{}' cannot start or end with an apostrophe",
            config.sheet_name
        )));
    }

    Ok(())
}

/// Checks that every selector parses
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    Selectors::compile(config).map(|_| ())
}
