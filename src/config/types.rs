use serde::Deserialize;

/// Listing page scraped when no other URL is configured
pub const DEFAULT_LISTING_URL: &str = "https://internshala.com/jobs/";

/// Default spreadsheet written at the end of a run
pub const DEFAULT_OUTPUT_PATH: &str = "Jobs.xlsx";

/// Default worksheet name
pub const DEFAULT_SHEET_NAME: &str = "Jobs";

const DEFAULT_USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/108.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
];

/// Main configuration structure for Jobscrape
///
/// Every table is optional; a missing table falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub politeness: PolitenessConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL of the single listing page to scrape
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Origin that relative job links are resolved against.
    /// Defaults to the origin of the listing URL.
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            base_url: None,
        }
    }
}

/// Request header template and transport settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Pool of User-Agent strings, one is picked at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,

    pub accept: String,

    #[serde(rename = "accept-encoding")]
    pub accept_encoding: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Total per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            accept: "application/x-clarity-gzip".to_string(),
            accept_encoding: "gzip, deflate, br".to_string(),
            accept_language: "en-US,en;q=0.9,ml;q=0.8,ja;q=0.7".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Delay between detail page requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolitenessConfig {
    /// Inclusive lower bound (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Exclusive upper bound (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the spreadsheet file
    pub path: String,

    /// Name of the single worksheet
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// CSS selectors used to locate job data in the site's markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// One job card on the listing page
    pub card: String,
    /// Title link inside a card
    pub title_link: String,
    pub location: String,
    pub location_link: String,
    pub experience: String,
    pub experience_body: String,
    pub skills_container: String,
    pub skill_tag: String,
    pub details: String,
    pub details_text: String,
    pub salary: String,
    pub salary_text: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "div.internship_meta.experience_meta".to_string(),
            title_link: "a.job-title-href".to_string(),
            location: "p#location_names".to_string(),
            location_link: "a".to_string(),
            experience: "div.job-experience-item".to_string(),
            experience_body: "div.item_body".to_string(),
            skills_container: "div.round_tabs_container".to_string(),
            skill_tag: "span.round_tabs".to_string(),
            details: "div.internship_details".to_string(),
            details_text: "div.text-container".to_string(),
            salary: "div.text-container.salary_container".to_string(),
            salary_text: "p".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Returns every selector paired with its config key
    pub fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("card", self.card.as_str()),
            ("title-link", self.title_link.as_str()),
            ("location", self.location.as_str()),
            ("location-link", self.location_link.as_str()),
            ("experience", self.experience.as_str()),
            ("experience-body", self.experience_body.as_str()),
            ("skills-container", self.skills_container.as_str()),
            ("skill-tag", self.skill_tag.as_str()),
            ("details", self.details.as_str()),
            ("details-text", self.details_text.as_str()),
            ("salary", self.salary.as_str()),
            ("salary-text", self.salary_text.as_str()),
        ]
    }
}
