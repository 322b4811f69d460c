//! Crawler module for fetching and parsing job pages
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with per-request headers
//! - Politeness policy (request pacing, User-Agent rotation)
//! - Listing and detail page parsing
//! - Overall scrape coordination

mod coordinator;
mod detail;
mod dom;
mod fetcher;
mod listing;
mod politeness;

pub use coordinator::{run_scrape, Coordinator, CrawlOutcome, DetailFailure, RunReport};
pub use detail::{description_lines, parse_detail};
pub use dom::{element_text, DomQuery, Selectors};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use listing::{parse_listing, Listing};
pub use politeness::{FixedPolicy, PolitenessPolicy, RandomPolicy};
