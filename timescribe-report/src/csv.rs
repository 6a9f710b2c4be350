//! CSV transcript export

use std::fs;
use std::path::Path;
use thiserror::Error;
use timescribe_core::Segment;
use tracing::debug;

/// CSV column header
pub const CSV_HEADER: &str = "Start (s),End (s),Segment";

/// Errors that can occur while writing presentation artifacts
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render segments as CSV text, one row per segment in input order
///
/// Times are formatted to two decimal places. Rows correspond 1:1 with the
/// input segments.
pub fn render_csv(segments: &[Segment]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for segment in segments {
        out.push_str(&format!(
            "{:.2},{:.2},{}\n",
            segment.start,
            segment.end,
            quote_field(&segment.text)
        ));
    }
    out
}

/// Write the transcript CSV, overwriting any existing file at `path`
pub fn write_csv(segments: &[Segment], path: &Path) -> Result<(), ReportError> {
    fs::write(path, render_csv(segments))?;
    debug!("Wrote {} segment rows to {:?}", segments.len(), path);
    Ok(())
}

/// Quote a field only when it contains CSV-significant characters
fn quote_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64, end: f64) -> Segment {
        Segment {
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_empty_transcript_is_header_only() {
        assert_eq!(render_csv(&[]), "Start (s),End (s),Segment\n");
    }

    #[test]
    fn test_three_segment_transcript() {
        let segments = vec![
            segment("hello", 0.0, 1.2),
            segment("world", 1.2, 2.5),
            segment("!", 2.5, 2.6),
        ];
        assert_eq!(
            render_csv(&segments),
            "Start (s),End (s),Segment\n\
             0.00,1.20,hello\n\
             1.20,2.50,world\n\
             2.50,2.60,!\n"
        );
    }

    #[test]
    fn test_line_count_is_rows_plus_header() {
        let segments: Vec<Segment> = (0..5)
            .map(|i| segment("text", i as f64, i as f64 + 1.0))
            .collect();
        assert_eq!(render_csv(&segments).lines().count(), 6);
    }

    #[test]
    fn test_times_always_have_two_decimals() {
        let csv = render_csv(&[segment("x", 1.5, 10.0)]);
        assert!(csv.contains("1.50,10.00,x"));
    }

    #[test]
    fn test_text_with_comma_is_quoted() {
        let csv = render_csv(&[segment("well, yes", 0.0, 1.0)]);
        assert!(csv.contains("0.00,1.00,\"well, yes\""));
    }

    #[test]
    fn test_text_with_quote_is_doubled() {
        let csv = render_csv(&[segment("say \"hi\"", 0.0, 1.0)]);
        assert!(csv.contains("0.00,1.00,\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.csv");

        write_csv(&[segment("first", 0.0, 1.0)], &path).unwrap();
        write_csv(&[segment("second", 0.0, 1.0)], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("second"));
        assert!(!contents.contains("first"));
    }
}
