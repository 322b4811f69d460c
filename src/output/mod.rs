//! Output module for exporting scraped jobs
//!
//! This module handles:
//! - Writing records to the spreadsheet
//! - Printing the run summary and record preview

pub mod summary;
mod xlsx;

pub use summary::{format_preview, format_summary, print_summary};
pub use xlsx::{
    column_widths, export_records, record_row, ExportError, ExportOutcome, ExportReport,
    COLUMNS, COLUMN_PADDING,
};
