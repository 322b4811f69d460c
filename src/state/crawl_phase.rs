/// Crawl phase definitions for tracking run progress
///
/// A run moves through these phases in a fixed order. The detail phases
/// repeat once per job stub.
use std::fmt;

/// Represents the current phase of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// Run has been set up but nothing was requested yet
    Idle,

    /// Listing page is being fetched
    FetchingListing,

    /// Job stubs are being extracted from the listing page
    ExtractingStubs,

    /// Between two detail pages
    IteratingDetails,

    /// A detail page is being fetched
    FetchingDetail,

    /// A detail page is being parsed into a record
    ParsingDetail,

    /// Waiting out the politeness delay before the next detail page
    Pausing,

    /// Records are being written to the spreadsheet
    Exporting,

    // ===== Terminal Phases =====
    /// Run completed and the summary was produced
    Reported,

    /// Run stopped on an unrecoverable condition
    Aborted,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reported | Self::Aborted)
    }

    /// Returns true if moving from `self` to `next` is allowed
    ///
    /// Any active phase may abort. The first detail fetch happens straight
    /// from `IteratingDetails`; later ones go through `Pausing`.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        if next == Aborted {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Idle, FetchingListing)
                | (FetchingListing, ExtractingStubs)
                | (ExtractingStubs, IteratingDetails)
                | (IteratingDetails, FetchingDetail)
                | (IteratingDetails, Pausing)
                | (IteratingDetails, Exporting)
                | (Pausing, FetchingDetail)
                | (FetchingDetail, ParsingDetail)
                | (FetchingDetail, IteratingDetails)
                | (ParsingDetail, IteratingDetails)
                | (Exporting, Reported)
        )
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingListing => "fetching_listing",
            Self::ExtractingStubs => "extracting_stubs",
            Self::IteratingDetails => "iterating_details",
            Self::FetchingDetail => "fetching_detail",
            Self::ParsingDetail => "parsing_detail",
            Self::Pausing => "pausing",
            Self::Exporting => "exporting",
            Self::Reported => "reported",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
