//! Run summary printed after a successful scrape

use crate::crawler::RunReport;
use crate::record::JobRecord;

/// Number of records shown in the preview table
pub const PREVIEW_LEN: usize = 5;

/// Longest cell shown in the preview before truncation
const PREVIEW_CELL_MAX: usize = 32;

/// Formats the run summary and record preview
pub fn format_summary(report: &RunReport) -> String {
    let outcome = &report.outcome;
    let duration = report.finished_at - report.started_at;
    let mut out = String::new();

    out.push_str("=== Scraper Summary ===\n\n");
    out.push_str(&format!(
        "Started: {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Finished: {} ({} seconds)\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
        duration.num_seconds()
    ));
    out.push_str(&format!("Job cards found: {}\n", outcome.cards_found));
    out.push_str(&format!("Job cards skipped: {}\n", outcome.skipped_cards));
    out.push_str(&format!(
        "Detail pages failed: {}\n",
        outcome.failures.len()
    ));
    out.push_str(&format!("Total jobs scraped: {}\n", outcome.records.len()));
    out.push_str(&format!(
        "Total jobs saved to Excel: {}\n",
        report.export.rows_written.saturating_sub(1)
    ));
    out.push_str(&format!(
        "Output: {} (sheet '{}')\n",
        report.export.path.display(),
        report.export.sheet_name
    ));

    if !outcome.failures.is_empty() {
        out.push_str("\nFailed jobs:\n");
        for failure in &outcome.failures {
            out.push_str(&format!("  - {}: {}\n", failure.title, failure.error));
        }
    }

    let shown = outcome.records.len().min(PREVIEW_LEN);
    out.push_str(&format!("\nHere's a preview of the first {} jobs:\n", shown));
    out.push_str(&format_preview(&outcome.records[..shown]));

    out
}

/// Prints the run summary to stdout
pub fn print_summary(report: &RunReport) {
    println!("{}", format_summary(report));
}

/// Renders records as a fixed-width text table
pub fn format_preview(records: &[JobRecord]) -> String {
    let headers = ["#", "JobTitle", "Location", "Experience", "Salary"];

    let rows: Vec<[String; 5]> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            [
                i.to_string(),
                truncate(record.title()),
                truncate(record.location()),
                truncate(record.experience()),
                truncate(record.salary()),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(headers[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        push_row(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= PREVIEW_CELL_MAX {
        return value.to_string();
    }
    let cut: String = value.chars().take(PREVIEW_CELL_MAX - 3).collect();
    format!("{}...", cut)
}
