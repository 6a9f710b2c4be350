//! timescribe-pipeline: the audio-to-timestamped-transcript pipeline
//!
//! Coordinates the four stages of one transcription request: ingest, the
//! shared model session, timestamped inference, and presentation formatting.

pub mod pipeline;

pub use pipeline::{PipelineError, PipelineResult, TranscriptionPipeline};
