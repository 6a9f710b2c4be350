//! timescribe-stt: speech-to-text via Whisper (whisper-rs)
//!
//! Wraps a GGML Whisper model behind a process-wide session that loads the
//! weights once and shares the handle across requests.

pub mod session;
pub mod transcriber;

pub use session::{InitOnce, ModelSession};
pub use transcriber::{SttError, SttResult, Transcriber};
