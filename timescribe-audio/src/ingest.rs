//! Audio ingest: normalize an audio source into a canonical file on disk

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during audio ingest
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to encode audio: {0}")]
    Encode(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Audio input for one transcription request
///
/// Exactly one representation is active per request: either a path the user
/// already has on disk, or raw mono samples captured in memory.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Path to an existing audio file
    File(PathBuf),
    /// Raw mono amplitude samples with their sample rate
    Samples { sample_rate: u32, samples: Vec<f32> },
}

/// Canonical on-disk audio for one pipeline invocation
///
/// A user-supplied path is borrowed and never deleted. A file synthesized
/// from raw samples is owned by this handle and removed when it drops, which
/// covers every exit path of the invocation that created it, including
/// inference failure.
#[derive(Debug)]
pub enum CanonicalAudio {
    /// User-supplied file, not owned by the pipeline
    Supplied(PathBuf),
    /// Temp file synthesized from raw samples, deleted on drop
    Synthesized(TempPath),
}

impl CanonicalAudio {
    /// Path to the audio file the model should consume
    pub fn path(&self) -> &Path {
        match self {
            CanonicalAudio::Supplied(path) => path,
            CanonicalAudio::Synthesized(temp) => temp,
        }
    }

    /// Whether this invocation owns (and will delete) the file
    pub fn is_synthesized(&self) -> bool {
        matches!(self, CanonicalAudio::Synthesized(_))
    }
}

/// Normalize an audio source into a canonical audio file
///
/// A file source passes through unchanged with no copy and no side effect.
/// A sample source is written out as a fresh temporary WAV owned by the
/// returned handle.
pub fn ingest(source: AudioSource) -> IngestResult<CanonicalAudio> {
    match source {
        AudioSource::File(path) => {
            debug!("Using supplied audio file {:?}", path);
            Ok(CanonicalAudio::Supplied(path))
        }
        AudioSource::Samples {
            sample_rate,
            samples,
        } => {
            let temp = write_temp_wav(sample_rate, &samples)?;
            Ok(CanonicalAudio::Synthesized(temp))
        }
    }
}

/// Write mono f32 samples to a fresh temp file as 16-bit PCM WAV
fn write_temp_wav(sample_rate: u32, samples: &[f32]) -> IngestResult<TempPath> {
    let temp = Builder::new()
        .prefix("timescribe-")
        .suffix(".wav")
        .tempfile()?;
    let temp_path = temp.into_temp_path();

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(&temp_path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    info!(
        "Wrote {} samples at {} Hz to {:?}",
        samples.len(),
        sample_rate,
        temp_path
    );
    Ok(temp_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_passes_through_unchanged() {
        let path = PathBuf::from("/some/audio.wav");
        let canonical = ingest(AudioSource::File(path.clone())).unwrap();

        assert_eq!(canonical.path(), path.as_path());
        assert!(!canonical.is_synthesized());
    }

    #[test]
    fn test_samples_write_a_playable_wav() {
        let samples: Vec<f32> = (0..1600)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0).sin())
            .collect();

        let canonical = ingest(AudioSource::Samples {
            sample_rate: 16000,
            samples: samples.clone(),
        })
        .unwrap();

        assert!(canonical.is_synthesized());
        assert!(canonical.path().exists());

        // Round-trip: the decoded sample rate equals the input rate
        let reader = hound::WavReader::open(canonical.path()).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.channels, 1);
        assert_eq!(reader.len() as usize, samples.len());
    }

    #[test]
    fn test_each_ingest_gets_a_fresh_temp_file() {
        let source = AudioSource::Samples {
            sample_rate: 16000,
            samples: vec![0.0; 160],
        };
        let a = ingest(source.clone()).unwrap();
        let b = ingest(source).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_synthesized_file_deleted_on_drop() {
        let canonical = ingest(AudioSource::Samples {
            sample_rate: 16000,
            samples: vec![0.1; 160],
        })
        .unwrap();

        let path = canonical.path().to_path_buf();
        assert!(path.exists());

        drop(canonical);
        assert!(!path.exists());
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let canonical = ingest(AudioSource::Samples {
            sample_rate: 16000,
            samples: vec![2.0, -2.0],
        })
        .unwrap();

        let reader = hound::WavReader::open(canonical.path()).unwrap();
        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![i16::MAX, i16::MIN + 1]);
    }
}
