//! Whisper transcription

use std::path::Path;
use thiserror::Error;
use timescribe_audio::{load_wav_for_model, MODEL_SAMPLE_RATE};
use timescribe_core::{ModelOutput, Segment};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Transcription errors
#[derive(Error, Debug)]
pub enum SttError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Audio load failed: {0}")]
    AudioLoad(String),

    #[error("Transcription failed: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for transcription operations
pub type SttResult<T> = Result<T, SttError>;

/// Whisper transcriber
pub struct Transcriber {
    ctx: WhisperContext,
}

impl Transcriber {
    /// Create a new transcriber with the given model path
    pub fn new(model_path: &Path) -> SttResult<Self> {
        info!("Loading Whisper model from {:?}", model_path);

        let params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| SttError::ModelLoad("Invalid model path".to_string()))?,
            params,
        )
        .map_err(|e| SttError::ModelLoad(e.to_string()))?;

        info!("Whisper model loaded successfully");
        Ok(Self { ctx })
    }

    /// Transcribe audio samples (must be 16kHz mono f32), requesting
    /// per-segment timestamps
    pub fn transcribe(&self, samples: &[f32]) -> SttResult<ModelOutput> {
        debug!(
            "Transcribing {} samples ({:.2}s)",
            samples.len(),
            samples.len() as f32 / MODEL_SAMPLE_RATE as f32
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        // Configure parameters for better results
        params.set_language(Some("en"));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        // Create state for this transcription
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SttError::Inference(e.to_string()))?;

        // Run transcription
        state
            .full(params, samples)
            .map_err(|e| SttError::Inference(e.to_string()))?;

        // Extract segments
        let num_segments = state
            .full_n_segments()
            .map_err(|e| SttError::Inference(e.to_string()))?;

        debug!("Got {} segments", num_segments);

        let mut segments = Vec::new();
        for i in 0..num_segments {
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| SttError::Inference(e.to_string()))?;

            let start = state
                .full_get_segment_t0(i)
                .map_err(|e| SttError::Inference(e.to_string()))?;

            let end = state
                .full_get_segment_t1(i)
                .map_err(|e| SttError::Inference(e.to_string()))?;

            // Whisper reports centiseconds; segment times are seconds from
            // here on out
            segments.push(Segment {
                text,
                start: start as f64 / 100.0,
                end: end as f64 / 100.0,
            });
        }

        let text = full_text(&segments);
        Ok(ModelOutput::Timestamped { text, segments })
    }

    /// Transcribe a WAV file
    pub fn transcribe_file(&self, path: &Path) -> SttResult<ModelOutput> {
        info!("Transcribing file: {:?}", path);

        let samples = load_wav_for_model(path).map_err(|e| SttError::AudioLoad(e.to_string()))?;
        self.transcribe(&samples)
    }
}

/// Join segment texts into the full transcript
fn full_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
