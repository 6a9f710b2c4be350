//! Audio resampling to the model's input format (16 kHz mono)

use rubato::{FftFixedIn, Resampler};
use tracing::debug;

/// Sample rate the transcription model consumes
pub const MODEL_SAMPLE_RATE: u32 = 16000;

/// Audio resampler for converting to the model's input format
pub struct AudioResampler {
    resampler: FftFixedIn<f64>,
    input_rate: u32,
    output_rate: u32,
}

impl AudioResampler {
    /// Create a new resampler from source to target sample rate
    pub fn new(
        input_rate: u32,
        output_rate: u32,
    ) -> Result<Self, rubato::ResamplerConstructionError> {
        let ratio = output_rate as f64 / input_rate as f64;
        // Use chunk size that works well with both common rates
        let chunk_size = 1024;

        debug!(
            "Creating resampler: {} Hz -> {} Hz (ratio: {:.4})",
            input_rate, output_rate, ratio
        );

        let resampler = FftFixedIn::<f64>::new(
            input_rate as usize,
            output_rate as usize,
            chunk_size,
            2, // sub_chunks for better latency
            1, // mono channel
        )?;

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
        })
    }

    /// Create a resampler configured for the model's 16 kHz input
    pub fn for_model(input_rate: u32) -> Result<Self, rubato::ResamplerConstructionError> {
        Self::new(input_rate, MODEL_SAMPLE_RATE)
    }

    /// Get the input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Resample audio samples
    /// Input: mono f32 samples at input_rate
    /// Output: mono f32 samples at output_rate
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>, rubato::ResampleError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        // Convert f32 to f64 for rubato
        let input_f64: Vec<f64> = input.iter().map(|&s| s as f64).collect();
        let input_frames = vec![input_f64];

        // Resample
        let output_frames = self.resampler.process(&input_frames, None)?;

        // Convert back to f32
        let output: Vec<f32> = output_frames[0].iter().map(|&s| s as f32).collect();

        Ok(output)
    }

    /// Convenience method to resample an entire buffer at once
    pub fn resample_buffer(&mut self, input: &[f32]) -> Result<Vec<f32>, rubato::ResampleError> {
        let mut output = Vec::new();
        let chunk_size = self.resampler.input_frames_next();

        // Process in chunks
        for chunk in input.chunks(chunk_size) {
            // Pad last chunk if needed
            let padded: Vec<f32> = if chunk.len() < chunk_size {
                let mut padded = chunk.to_vec();
                padded.resize(chunk_size, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let resampled = self.resample(&padded)?;
            output.extend(resampled);
        }

        Ok(output)
    }
}

/// Resample a complete buffer of audio to the model's 16 kHz format
/// Convenience function for simple use cases
pub fn resample_to_model(samples: &[f32], input_rate: u32) -> Result<Vec<f32>, String> {
    if input_rate == MODEL_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let mut resampler = AudioResampler::for_model(input_rate)
        .map_err(|e| format!("Failed to create resampler: {}", e))?;

    resampler
        .resample_buffer(samples)
        .map_err(|e| format!("Resampling failed: {}", e))
}
