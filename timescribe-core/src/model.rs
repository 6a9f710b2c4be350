//! Model registry for the speech-recognition weights timescribe can use

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Information about an available model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Unique identifier for the model
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// URL to download from
    pub url: String,
    /// Expected file size in bytes
    pub size_bytes: u64,
    /// SHA256 hash for verification
    pub sha256: Option<String>,
    /// Filename to save as
    pub filename: String,
}

/// Status of a local model
#[derive(Debug, Clone)]
pub enum ModelStatus {
    /// Model is not downloaded
    NotDownloaded,
    /// Model is currently downloading
    Downloading { progress: f32 },
    /// Model is downloaded and ready
    Ready { path: PathBuf },
    /// Model download or verification failed
    Failed { error: String },
}

/// Built-in model registry with known models
///
/// Whisper models in GGML format, served from HuggingFace. Larger models
/// transcribe more accurately but load and run slower.
pub fn get_model_registry() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "whisper-tiny.en".to_string(),
            name: "Whisper Tiny (English)".to_string(),
            url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin"
                .to_string(),
            size_bytes: 77_704_715, // ~74MB
            sha256: None,           // Will log actual SHA256 on first download
            filename: "ggml-tiny.en.bin".to_string(),
        },
        ModelInfo {
            id: "whisper-base.en".to_string(),
            name: "Whisper Base (English)".to_string(),
            url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin"
                .to_string(),
            size_bytes: 147_951_465, // ~141MB
            sha256: None,            // Will log actual SHA256 on first download
            filename: "ggml-base.en.bin".to_string(),
        },
        ModelInfo {
            id: "whisper-small.en".to_string(),
            name: "Whisper Small (English)".to_string(),
            url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.en.bin"
                .to_string(),
            size_bytes: 487_601_929, // ~465MB
            sha256: None,
            filename: "ggml-small.en.bin".to_string(),
        },
    ]
}

/// Model id used when the configuration does not name one
pub fn default_model_id() -> &'static str {
    "whisper-base.en"
}

/// Look up a model in the registry by id
pub fn find_model(registry: &[ModelInfo], id: &str) -> Option<ModelInfo> {
    registry.iter().find(|m| m.id == id).cloned()
}
