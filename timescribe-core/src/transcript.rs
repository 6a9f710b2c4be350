//! Transcription output schema
//!
//! The model's output is decided into one of two shapes at the stt boundary:
//! a transcript with per-segment timing, or plain text when the model reports
//! no timing information. Downstream code matches on the shape once instead
//! of probing for optional fields.

use serde::{Deserialize, Serialize};

/// A contiguous time interval of audio with its transcribed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Transcribed text for this interval
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.2}s -> {:.2}s] {}", self.start, self.end, self.text)
    }
}

/// Transcription output as reported by the model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Transcript with per-segment timing
    Timestamped {
        text: String,
        segments: Vec<Segment>,
    },
    /// Transcript without timing information
    TextOnly { text: String },
}

impl ModelOutput {
    /// Full transcript text
    pub fn text(&self) -> &str {
        match self {
            ModelOutput::Timestamped { text, .. } => text,
            ModelOutput::TextOnly { text } => text,
        }
    }

    /// Per-segment timing, if the model reported any
    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            ModelOutput::Timestamped { segments, .. } => Some(segments),
            ModelOutput::TextOnly { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_display_two_decimals() {
        let segment = Segment {
            text: "hello".to_string(),
            start: 1.5,
            end: 2.0,
        };
        assert_eq!(segment.to_string(), "[1.50s -> 2.00s] hello");
    }

    #[test]
    fn test_segment_json_roundtrip() {
        let segment = Segment {
            text: "hello".to_string(),
            start: 0.0,
            end: 1.2,
        };
        let json = serde_json::to_string(&segment).unwrap();
        let parsed: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, parsed);
    }

    #[test]
    fn test_timestamped_accessors() {
        let output = ModelOutput::Timestamped {
            text: "hello world".to_string(),
            segments: vec![Segment {
                text: "hello world".to_string(),
                start: 0.0,
                end: 1.0,
            }],
        };
        assert_eq!(output.text(), "hello world");
        assert_eq!(output.segments().unwrap().len(), 1);
    }

    #[test]
    fn test_text_only_has_no_segments() {
        let output = ModelOutput::TextOnly {
            text: "hello".to_string(),
        };
        assert_eq!(output.text(), "hello");
        assert!(output.segments().is_none());
    }
}
