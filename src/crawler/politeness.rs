//! Politeness policy
//!
//! Decides how long to wait between detail page requests and which
//! headers each request carries. The crawl loop and the fetcher only talk
//! to the [`PolitenessPolicy`] trait so tests can swap in fixed values.

use crate::config::{FetcherConfig, PolitenessConfig};
use crate::ConfigError;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;

/// Source of request pacing and request headers
pub trait PolitenessPolicy: Send + Sync {
    /// Delay to wait before the next detail page request
    fn next_delay(&self) -> Duration;

    /// Header set for the next request
    fn next_headers(&self) -> HeaderMap;
}

/// Fixed Accept* headers shared by every request
#[derive(Debug, Clone)]
struct HeaderTemplate {
    accept: HeaderValue,
    accept_encoding: HeaderValue,
    accept_language: HeaderValue,
}

impl HeaderTemplate {
    fn from_config(config: &FetcherConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            accept: header_value("accept", &config.accept)?,
            accept_encoding: header_value("accept-encoding", &config.accept_encoding)?,
            accept_language: header_value("accept-language", &config.accept_language)?,
        })
    }

    fn with_user_agent(&self, user_agent: HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(ACCEPT, self.accept.clone());
        headers.insert(ACCEPT_ENCODING, self.accept_encoding.clone());
        headers.insert(ACCEPT_LANGUAGE, self.accept_language.clone());
        headers.insert(USER_AGENT, user_agent);
        headers
    }
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("{} is not a valid header value: '{}'", key, value))
    })
}

/// Randomized policy used for real runs
///
/// Delays are drawn uniformly from `[min_delay_ms, max_delay_ms)` and the
/// User-Agent uniformly from the configured pool.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    template: HeaderTemplate,
    user_agents: Vec<HeaderValue>,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl RandomPolicy {
    /// Builds the policy from the fetcher and politeness configuration
    pub fn new(fetcher: &FetcherConfig, politeness: &PolitenessConfig) -> Result<Self, ConfigError> {
        let template = HeaderTemplate::from_config(fetcher)?;

        let user_agents = fetcher
            .user_agents
            .iter()
            .map(|ua| header_value("user-agents", ua))
            .collect::<Result<Vec<_>, _>>()?;

        if user_agents.is_empty() {
            return Err(ConfigError::Validation(
                "user-agents must contain at least one entry".to_string(),
            ));
        }

        Ok(Self {
            template,
            user_agents,
            min_delay_ms: politeness.min_delay_ms,
            max_delay_ms: politeness.max_delay_ms,
        })
    }
}

impl PolitenessPolicy for RandomPolicy {
    fn next_delay(&self) -> Duration {
        if self.min_delay_ms >= self.max_delay_ms {
            return Duration::from_millis(self.min_delay_ms);
        }
        let millis = rand::thread_rng().gen_range(self.min_delay_ms..self.max_delay_ms);
        Duration::from_millis(millis)
    }

    fn next_headers(&self) -> HeaderMap {
        let mut rng = rand::thread_rng();
        // Pool is non-empty, checked in new()
        let user_agent = self
            .user_agents
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("jobscrape"));
        self.template.with_user_agent(user_agent)
    }
}

/// Deterministic policy: constant delay, first User-Agent of the pool
#[derive(Debug, Clone)]
pub struct FixedPolicy {
    template: HeaderTemplate,
    user_agent: HeaderValue,
    delay: Duration,
}

impl FixedPolicy {
    pub fn new(fetcher: &FetcherConfig, delay: Duration) -> Result<Self, ConfigError> {
        let template = HeaderTemplate::from_config(fetcher)?;
        let user_agent = match fetcher.user_agents.first() {
            Some(ua) => header_value("user-agents", ua)?,
            None => {
                return Err(ConfigError::Validation(
                    "user-agents must contain at least one entry".to_string(),
                ))
            }
        };

        Ok(Self {
            template,
            user_agent,
            delay,
        })
    }
}

impl PolitenessPolicy for FixedPolicy {
    fn next_delay(&self) -> Duration {
        self.delay
    }

    fn next_headers(&self) -> HeaderMap {
        self.template.with_user_agent(self.user_agent.clone())
    }
}
