//! WAV decoding to the model's input format

use crate::resample::{resample_to_model, MODEL_SAMPLE_RATE};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while decoding audio for the model
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Audio load failed: {0}")]
    AudioLoad(String),

    #[error("Resampling failed: {0}")]
    Resample(String),
}

/// Load a WAV file and convert to 16 kHz mono f32
///
/// Stereo input is folded to mono by averaging channels; input at other
/// sample rates is resampled to the model's rate.
pub fn load_wav_for_model(path: &Path) -> Result<Vec<f32>, DecodeError> {
    let reader = hound::WavReader::open(path).map_err(|e| DecodeError::AudioLoad(e.to_string()))?;

    let spec = reader.spec();
    debug!(
        "WAV: {} channels, {} Hz, {:?}",
        spec.channels, spec.sample_rate, spec.sample_format
    );

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .filter_map(|s| s.ok())
                .map(|s| s as f32 / max_val)
                .collect()
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .filter_map(|s| s.ok())
            .collect(),
    };

    // Convert to mono if stereo
    let mono_samples: Vec<f32> = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / spec.channels as f32)
            .collect()
    } else {
        samples
    };

    debug!("Loaded {} mono samples", mono_samples.len());

    if spec.sample_rate == MODEL_SAMPLE_RATE {
        return Ok(mono_samples);
    }

    resample_to_model(&mono_samples, spec.sample_rate).map_err(DecodeError::Resample)
}
