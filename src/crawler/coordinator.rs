//! Scrape coordinator - main orchestration logic
//!
//! This module contains the sequential scrape loop:
//! - Fetching and parsing the listing page
//! - Fetching and parsing every detail page, pausing between requests
//! - Collecting records in discovery order
//! - Exporting the records and producing the run report
//!
//! Per-job failures are logged and skipped. Listing failures, empty
//! results and export failures abort the run.

use crate::config::Config;
use crate::crawler::detail::parse_detail;
use crate::crawler::dom::Selectors;
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::listing::parse_listing;
use crate::crawler::politeness::{PolitenessPolicy, RandomPolicy};
use crate::output::{export_records, ExportOutcome, ExportReport};
use crate::record::{assemble, JobRecord, JobStub};
use crate::state::CrawlPhase;
use crate::{NoDataReason, ScrapeError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use url::Url;

/// A detail page that could not be fetched
#[derive(Debug, Clone)]
pub struct DetailFailure {
    pub title: String,
    pub url: String,
    pub error: String,
}

/// Everything collected by the crawl phase
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Records in listing order
    pub records: Vec<JobRecord>,

    /// Cards matched on the listing page
    pub cards_found: usize,

    /// Cards skipped for lacking a title or URL
    pub skipped_cards: usize,

    /// Detail pages that failed to fetch
    pub failures: Vec<DetailFailure>,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: CrawlOutcome,
    pub export: ExportReport,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    policy: Arc<dyn PolitenessPolicy>,
    selectors: Selectors,
    base_url: Url,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator with the randomized politeness policy
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let policy = RandomPolicy::new(&config.fetcher, &config.politeness)?;
        Self::with_policy(config, Arc::new(policy))
    }

    /// Creates a coordinator with a caller-supplied politeness policy
    pub fn with_policy(
        config: Config,
        policy: Arc<dyn PolitenessPolicy>,
    ) -> Result<Self, ScrapeError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let base_url = resolve_base_url(&config)?;
        let fetcher = Fetcher::new(&config.fetcher, Arc::clone(&policy))?;

        Ok(Self {
            config,
            fetcher,
            policy,
            selectors,
            base_url,
            phase: CrawlPhase::Idle,
        })
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl and exports the results
    ///
    /// Ends in `Reported` on success and in `Aborted` on any error.
    pub async fn run(&mut self) -> Result<RunReport, ScrapeError> {
        let started_at = Utc::now();

        let outcome = self.crawl().await?;

        self.transition(CrawlPhase::Exporting)?;
        tracing::info!(
            "Saving {} jobs to '{}'",
            outcome.records.len(),
            self.config.output.path
        );

        let export = match export_records(&outcome.records, &self.config.output) {
            Ok(ExportOutcome::Written(report)) => report,
            Ok(ExportOutcome::Empty) => {
                return Err(self.abort(ScrapeError::NoData(NoDataReason::NoRecords)))
            }
            Err(e) => return Err(self.abort(e.into())),
        };

        self.transition(CrawlPhase::Reported)?;

        Ok(RunReport {
            outcome,
            export,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Fetches the listing page and every detail page
    ///
    /// Stops in `IteratingDetails` with at least one record, or in
    /// `Aborted` when the listing fails or nothing was collected.
    pub async fn crawl(&mut self) -> Result<CrawlOutcome, ScrapeError> {
        tracing::info!("Starting job scraper");

        self.transition(CrawlPhase::FetchingListing)?;
        tracing::info!("Fetching main job listing page...");

        let listing_url = self.config.site.listing_url.clone();
        let body = match self.fetcher.fetch(&listing_url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error fetching the main page: {}", e);
                return Err(self.abort(e.into()));
            }
        };

        self.transition(CrawlPhase::ExtractingStubs)?;
        let listing = match parse_listing(&body, &self.selectors, &self.base_url) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!("{}", e);
                return Err(self.abort(e));
            }
        };

        if listing.stubs.is_empty() {
            tracing::error!(
                "All {} job cards were missing a title or URL",
                listing.cards_found
            );
            return Err(self.abort(ScrapeError::NoData(NoDataReason::NoStubs)));
        }

        tracing::info!(
            "Found {} potential job listings. Beginning detailed scrape.",
            listing.cards_found
        );

        self.transition(CrawlPhase::IteratingDetails)?;

        let mut outcome = CrawlOutcome {
            cards_found: listing.cards_found,
            skipped_cards: listing.skipped,
            ..CrawlOutcome::default()
        };

        let total = listing.stubs.len();
        for (index, stub) in listing.stubs.into_iter().enumerate() {
            if index > 0 {
                self.pause().await?;
            }

            tracing::info!("Scraping job {}/{}: {}", index + 1, total, stub.title);

            match self.scrape_detail(stub).await? {
                Ok(record) => outcome.records.push(record),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        if outcome.records.is_empty() {
            tracing::error!("No job data was scraped");
            return Err(self.abort(ScrapeError::NoData(NoDataReason::NoRecords)));
        }

        tracing::info!(
            "Scraped {} of {} jobs ({} failed)",
            outcome.records.len(),
            total,
            outcome.failures.len()
        );

        Ok(outcome)
    }

    /// Fetches and parses one detail page
    ///
    /// The outer result carries phase errors only; a failed fetch is
    /// returned as `Ok(Err(DetailFailure))` so the loop can continue.
    async fn scrape_detail(
        &mut self,
        stub: JobStub,
    ) -> Result<Result<JobRecord, DetailFailure>, ScrapeError> {
        self.transition(CrawlPhase::FetchingDetail)?;

        let body = match self.fetcher.fetch(&stub.url).await {
            Ok(body) => body,
            Err(e) => {
                log_detail_failure(&e);
                self.transition(CrawlPhase::IteratingDetails)?;
                return Ok(Err(DetailFailure {
                    title: stub.title,
                    url: stub.url,
                    error: e.to_string(),
                }));
            }
        };

        self.transition(CrawlPhase::ParsingDetail)?;
        let fields = parse_detail(&body, &self.selectors);
        let record = assemble(stub, fields);
        tracing::debug!(
            "Parsed '{}': location='{}', skills='{}'",
            record.title(),
            record.location(),
            record.skills()
        );

        self.transition(CrawlPhase::IteratingDetails)?;
        Ok(Ok(record))
    }

    /// Waits out the politeness delay
    async fn pause(&mut self) -> Result<(), ScrapeError> {
        self.transition(CrawlPhase::Pausing)?;

        let delay = self.policy.next_delay();
        tracing::info!("Pausing for {:.2} seconds...", delay.as_secs_f64());
        tokio::time::sleep(delay).await;

        Ok(())
    }

    /// Moves to `next`, rejecting moves the phase machine does not allow
    fn transition(&mut self, next: CrawlPhase) -> Result<(), ScrapeError> {
        if !self.phase.can_transition_to(next) {
            return Err(ScrapeError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Marks the run as aborted and hands the error back
    fn abort(&mut self, error: ScrapeError) -> ScrapeError {
        if !self.phase.is_terminal() {
            self.phase = CrawlPhase::Aborted;
        }
        error
    }
}

fn log_detail_failure(error: &FetchError) {
    tracing::warn!(
        "Error fetching details from {} ({}): {}",
        error.url(),
        error.kind(),
        error
    );
}

/// Origin that relative job links resolve against
///
/// Uses `base-url` when configured, otherwise the listing URL's origin.
fn resolve_base_url(config: &Config) -> Result<Url, ScrapeError> {
    match &config.site.base_url {
        Some(base) => Ok(Url::parse(base)?),
        None => Ok(Url::parse(&config.site.listing_url)?.join("/")?),
    }
}

/// Runs a complete scrape with the randomized politeness policy
///
/// # Example
///
/// ```no_run
/// use jobscrape::config::Config;
/// use jobscrape::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_scrape(Config::default()).await?;
/// println!("Scraped {} jobs", report.outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<RunReport, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
