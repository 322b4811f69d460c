//! Jobscrape: a polite job listing scraper
//!
//! This crate fetches a job listing page, follows every job card to its
//! detail page, extracts the structured fields and exports the collected
//! records to a spreadsheet.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod state;

use thiserror::Error;

/// Main error type for Jobscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] crawler::FetchError),

    #[error("No data: {0}")]
    NoData(NoDataReason),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Why a run ended without any data to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoDataReason {
    #[error("no job cards found on the listing page, the HTML structure might have changed")]
    NoCards,

    #[error("every job card was missing a title or URL")]
    NoStubs,

    #[error("no job details could be scraped")]
    NoRecords,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Jobscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{assemble, DetailFields, JobRecord, JobStub};
pub use state::CrawlPhase;
