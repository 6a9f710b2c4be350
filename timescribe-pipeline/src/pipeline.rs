//! Transcription pipeline - coordinates ingest, the model session,
//! inference, and presentation formatting

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use timescribe_audio::{ingest, AudioSource, IngestError};
use timescribe_core::ProgressStage;
use timescribe_report::{extract, ReportError, TranscriptResult, DEFAULT_CSV_PATH};
use timescribe_stt::{ModelSession, SttError};

/// Pipeline errors, one variant per stage
///
/// Every error is local to the request that raised it. A failed model load
/// leaves the shared session empty, so a later request may retry.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Ingest failed: {0}")]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Stt(#[from] SttError),

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The transcription pipeline
///
/// Stateless per invocation aside from the shared model session. One logical
/// request runs at a time; once a request has started there is no
/// cancellation.
pub struct TranscriptionPipeline {
    session: Arc<ModelSession>,
    csv_path: PathBuf,
    progress_tx: Option<mpsc::Sender<ProgressStage>>,
}

impl TranscriptionPipeline {
    /// Create a pipeline sharing `session` across requests
    pub fn new(session: Arc<ModelSession>) -> Self {
        Self {
            session,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            progress_tx: None,
        }
    }

    /// Write the transcript CSV to `path` instead of the default location
    pub fn with_csv_path(mut self, path: PathBuf) -> Self {
        self.csv_path = path;
        self
    }

    /// Report progress checkpoints on `tx`
    pub fn with_progress(mut self, tx: mpsc::Sender<ProgressStage>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    fn send_progress(&self, stage: ProgressStage) {
        debug!("Pipeline checkpoint: {:?}", stage);
        if let Some(ref tx) = self.progress_tx {
            // Advisory only; a full or closed channel never stalls the run
            let _ = tx.try_send(stage);
        }
    }

    /// Run one request to completion (blocking)
    ///
    /// This should be called from spawn_blocking when inside an async
    /// runtime.
    pub fn run_blocking(&self, source: AudioSource) -> PipelineResult<TranscriptResult> {
        // 1. Normalize input. A temp file synthesized from raw samples is
        //    owned by `canonical` and removed on every exit path of this
        //    call, including inference failure.
        let canonical = ingest(source)?;
        info!("Canonical audio at {:?}", canonical.path());

        // 2. Model session; only an actual first load reports a checkpoint
        if !self.session.is_loaded() {
            self.send_progress(ProgressStage::LoadingModel);
        }
        let transcriber = self.session.get()?;

        // 3. Timestamped inference
        self.send_progress(ProgressStage::Transcribing);
        let output = transcriber.transcribe_file(canonical.path())?;

        // 4. Presentation artifacts
        let result = extract(&output, &self.csv_path)?;

        self.send_progress(ProgressStage::Done);
        info!(
            "Transcribed {} segments to {:?}",
            result.segments.len(),
            result.csv_path
        );
        Ok(result)
    }
}
