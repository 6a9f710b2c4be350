//! timescribe-report: transcript presentation artifacts
//!
//! Turns a model output into the three artifacts a front end binds to: a
//! structured transcript record, an HTML table fragment with click-to-seek
//! row data, and a CSV file for download.

pub mod csv;
pub mod extract;
pub mod html;

pub use csv::{render_csv, write_csv, ReportError, CSV_HEADER};
pub use extract::{extract, TranscriptResult, DEFAULT_CSV_PATH};
pub use html::{escape_html, render_table, NO_SEGMENTS_HTML};
