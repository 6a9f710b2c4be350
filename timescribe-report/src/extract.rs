//! Segment extraction: model output to presentation artifacts

use crate::csv::{write_csv, ReportError};
use std::path::{Path, PathBuf};
use timescribe_core::{ModelOutput, Segment};
use tracing::{debug, warn};

/// Default relative path the transcript CSV is written to
pub const DEFAULT_CSV_PATH: &str = "transcript.csv";

/// Everything one transcription request produces for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptResult {
    /// Full transcript text
    pub full_text: String,
    /// Per-segment timestamps, in the model's reported order
    pub segments: Vec<Segment>,
    /// Freshly written CSV file
    pub csv_path: PathBuf,
}

impl TranscriptResult {
    /// Render the segments as the clickable HTML table fragment
    pub fn html_table(&self) -> String {
        crate::html::render_table(&self.segments)
    }
}

/// Turn a model output into a transcript result, writing its CSV to `csv_path`
///
/// Segments are taken in the model's reported order, unchanged: no merging,
/// filtering, or reordering. Output with no timing information degrades
/// gracefully to an empty segment list, surfaced as a warning rather than an
/// error. The CSV is always written, overwriting any existing file.
pub fn extract(output: &ModelOutput, csv_path: &Path) -> Result<TranscriptResult, ReportError> {
    let segments: Vec<Segment> = match output.segments() {
        Some(segments) => segments.to_vec(),
        None => {
            warn!("Model output carries no segment timestamps; transcript table will be empty");
            Vec::new()
        }
    };

    write_csv(&segments, csv_path)?;
    debug!("Extracted {} segments to {:?}", segments.len(), csv_path);

    Ok(TranscriptResult {
        full_text: output.text().to_string(),
        segments,
        csv_path: csv_path.to_path_buf(),
    })
}
