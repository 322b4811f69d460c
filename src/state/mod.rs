//! State module for tracking scrape progress
//!
//! `CrawlPhase` tracks which step of the fetch → parse → export pipeline
//! a run is in and which moves between steps are legal.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
