//! DOM query capability
//!
//! Parsers only need "first match" and "all matches" lookups, so that is
//! all [`DomQuery`] offers. Selectors are compiled once from configuration.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Minimal element lookup over a document or a subtree
pub trait DomQuery {
    /// First element matching `selector`, in document order
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>>;

    /// All elements matching `selector`, in document order
    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'_>>;
}

impl DomQuery for Html {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.select(selector).collect()
    }
}

/// Lookups on an element search its descendants only
impl DomQuery for ElementRef<'_> {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.select(selector).collect()
    }
}

/// Concatenated text of an element with surrounding whitespace removed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Compiled selectors for the listing and detail pages
#[derive(Debug, Clone)]
pub struct Selectors {
    pub card: Selector,
    pub title_link: Selector,
    pub location: Selector,
    pub location_link: Selector,
    pub experience: Selector,
    pub experience_body: Selector,
    pub skills_container: Selector,
    pub skill_tag: Selector,
    pub details: Selector,
    pub details_text: Selector,
    pub salary: Selector,
    pub salary_text: Selector,
}

impl Selectors {
    /// Compiles every configured selector
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: compile_one("card", &config.card)?,
            title_link: compile_one("title-link", &config.title_link)?,
            location: compile_one("location", &config.location)?,
            location_link: compile_one("location-link", &config.location_link)?,
            experience: compile_one("experience", &config.experience)?,
            experience_body: compile_one("experience-body", &config.experience_body)?,
            skills_container: compile_one("skills-container", &config.skills_container)?,
            skill_tag: compile_one("skill-tag", &config.skill_tag)?,
            details: compile_one("details", &config.details)?,
            details_text: compile_one("details-text", &config.details_text)?,
            salary: compile_one("salary", &config.salary)?,
            salary_text: compile_one("salary-text", &config.salary_text)?,
        })
    }
}

fn compile_one(key: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: format!("{} = {}", key, selector),
        message: format!("{:?}", e),
    })
}
