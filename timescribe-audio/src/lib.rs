//! timescribe-audio: audio ingest, decoding, and resampling
//!
//! This crate normalizes every audio source into the canonical on-disk form
//! the transcription model consumes:
//! - Ingest of user files and raw in-memory samples
//! - WAV decoding to mono f32
//! - Resampling to the model's 16 kHz input rate

pub mod decode;
pub mod ingest;
pub mod resample;

pub use decode::{load_wav_for_model, DecodeError};
pub use ingest::{ingest, AudioSource, CanonicalAudio, IngestError};
pub use resample::{resample_to_model, AudioResampler, MODEL_SAMPLE_RATE};
