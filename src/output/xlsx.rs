//! Spreadsheet export
//!
//! Writes one header row plus one row per record to a single worksheet.
//! Column widths are computed up front so the file is written once.

use crate::config::OutputConfig;
use crate::record::JobRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::PathBuf;
use thiserror::Error;

/// Column headers, in output order
pub const COLUMNS: [&str; 7] = [
    "JobTitle",
    "Location",
    "Experience",
    "Skills",
    "Salary",
    "JobUrl",
    "JobDescriptionSummary",
];

/// Extra characters added to the widest cell of each column
pub const COLUMN_PADDING: usize = 2;

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    /// Cells could not be written or the file could not be saved
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The worksheet could not be named or its columns sized
    #[error("failed to format worksheet: {source}")]
    Format {
        #[source]
        source: XlsxError,
    },
}

/// Summary of a written spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub sheet_name: String,
    /// Rows written, header included
    pub rows_written: usize,
    /// Display width of each column, in `COLUMNS` order
    pub column_widths: Vec<usize>,
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Written(ExportReport),
    /// There were no records, nothing was written
    Empty,
}

/// Cell values for one record, in `COLUMNS` order
pub fn record_row(record: &JobRecord) -> [String; 7] {
    [
        record.title().to_string(),
        record.location().to_string(),
        record.experience().to_string(),
        record.skills().to_string(),
        record.salary().to_string(),
        record.url().to_string(),
        record.description_summary(),
    ]
}

/// Widest cell (header included) per column, plus padding
pub fn column_widths(rows: &[[String; 7]]) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = rows
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            widest + COLUMN_PADDING
        })
        .collect()
}

/// Writes the records to the configured spreadsheet
///
/// # Returns
///
/// * `Ok(ExportOutcome::Empty)` - No records; no file was touched
/// * `Ok(ExportOutcome::Written(report))` - File saved
/// * `Err(ExportError)` - Writing, formatting or saving failed
pub fn export_records(
    records: &[JobRecord],
    config: &OutputConfig,
) -> Result<ExportOutcome, ExportError> {
    if records.is_empty() {
        tracing::warn!("No data to export");
        return Ok(ExportOutcome::Empty);
    }

    let path = PathBuf::from(&config.path);
    let write_err = |source| ExportError::Write {
        path: path.clone(),
        source,
    };

    let rows: Vec<[String; 7]> = records.iter().map(record_row).collect();
    let widths = column_widths(&rows);

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(config.sheet_name.as_str())
        .map_err(|source| ExportError::Format { source })?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(write_err)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_num, col as u16, value.as_str())
                .map_err(write_err)?;
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width as f64)
            .map_err(|source| ExportError::Format { source })?;
    }

    workbook.save(&path).map_err(write_err)?;

    tracing::info!("Jobs data saved to '{}'", path.display());

    Ok(ExportOutcome::Written(ExportReport {
        path,
        sheet_name: config.sheet_name.clone(),
        rows_written: rows.len() + 1,
        column_widths: widths,
    }))
}
