use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Tables and keys missing from the file keep their defaults, so an
/// empty file yields [`Config::default()`].
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
/// use jobscrape::config::load_config;
///
/// let config = load_config(Path::new("jobscrape.toml")).unwrap();
/// println!("Listing page: {}", config.site.listing_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

impl Config {
    /// Re-validates the configuration, e.g. after CLI overrides
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}
