//! Configuration module for Jobscrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Running without a file is equivalent to loading an empty one.
//!
//! # Example
//!
//! ```no_run
//! use jobscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("jobscrape.toml")).unwrap();
//! println!("Exporting to: {}", config.output.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, OutputConfig, PolitenessConfig, SelectorConfig, SiteConfig,
    DEFAULT_LISTING_URL, DEFAULT_OUTPUT_PATH, DEFAULT_SHEET_NAME,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
