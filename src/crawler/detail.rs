//! Detail page parser
//!
//! Each field is looked up on its own. A node that is missing from the
//! page leaves its field empty; parsing a detail page never fails.

use crate::crawler::dom::{element_text, DomQuery, Selectors};
use crate::record::{DetailFields, MAX_DESCRIPTION_LINES};
use scraper::Html;

/// Extracts all detail fields from a detail page
pub fn parse_detail(body: &str, selectors: &Selectors) -> DetailFields {
    let document = Html::parse_document(body);

    DetailFields {
        location: extract_location(&document, selectors),
        experience: extract_experience(&document, selectors),
        skills: extract_skills(&document, selectors),
        salary: extract_salary(&document, selectors),
        description_lines: extract_description(&document, selectors),
    }
}

/// Location node text, preferring the text of a nested link
///
/// Pages list a single location as a link inside the node; the node text
/// is the fallback when there is no link.
fn extract_location(document: &Html, selectors: &Selectors) -> String {
    let Some(node) = document.find_first(&selectors.location) else {
        return String::new();
    };

    match node.find_first(&selectors.location_link) {
        Some(link) => element_text(&link),
        None => element_text(&node),
    }
}

fn extract_experience(document: &Html, selectors: &Selectors) -> String {
    document
        .find_first(&selectors.experience)
        .and_then(|block| {
            block
                .find_first(&selectors.experience_body)
                .map(|body| element_text(&body))
        })
        .unwrap_or_default()
}

/// Skill tag texts joined with ", "
fn extract_skills(document: &Html, selectors: &Selectors) -> String {
    let Some(container) = document.find_first(&selectors.skills_container) else {
        return String::new();
    };

    container
        .find_all(&selectors.skill_tag)
        .iter()
        .map(element_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn extract_salary(document: &Html, selectors: &Selectors) -> String {
    document
        .find_first(&selectors.salary)
        .and_then(|container| {
            container
                .find_first(&selectors.salary_text)
                .map(|p| element_text(&p))
        })
        .unwrap_or_default()
}

/// First non-blank lines of the job description, trimmed
fn extract_description(document: &Html, selectors: &Selectors) -> Vec<String> {
    let Some(text) = document
        .find_first(&selectors.details)
        .and_then(|details| {
            details
                .find_first(&selectors.details_text)
                .map(|container| container.text().collect::<String>())
        })
    else {
        return Vec::new();
    };

    description_lines(&text)
}

/// Splits text into trimmed, non-blank lines, keeping at most ten
pub fn description_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_DESCRIPTION_LINES)
        .map(str::to_string)
        .collect()
}
