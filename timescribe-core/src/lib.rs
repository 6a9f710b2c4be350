//! timescribe-core: shared types, configuration, and model management
//!
//! This crate provides the foundational types and utilities used across
//! the timescribe workspace.

pub mod assets;
pub mod config;
pub mod download;
pub mod error;
pub mod model;
pub mod progress;
pub mod transcript;

pub use config::Config;
pub use download::{format_bytes, DownloadManager, ProgressCallback};
pub use error::{Error, Result};
pub use model::{default_model_id, find_model, get_model_registry, ModelInfo, ModelStatus};
pub use progress::ProgressStage;
pub use transcript::{ModelOutput, Segment};
