//! Guarded initialize-once model session
//!
//! The transcriber is expensive to construct (weights load from disk), so a
//! process holds one session and shares the handle across requests. First
//! access is serialized behind a mutex: concurrent first calls wait for a
//! single load instead of racing to duplicate it. A failed load leaves the
//! slot empty so a later call can retry.

use crate::transcriber::{SttResult, Transcriber};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

/// A mutex-protected slot that initializes its value at most once
///
/// Unlike `OnceLock`, a failed initialization leaves the slot empty so the
/// next caller retries instead of caching the failure.
pub struct InitOnce<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> InitOnce<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// True if a value has been initialized
    pub fn is_initialized(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    /// Return the cached value, or initialize it with `init`
    ///
    /// The lock is held across `init`, so concurrent first calls serialize
    /// and exactly one initialization runs.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let mut slot = self.slot.lock().unwrap();
        if let Some(value) = slot.as_ref() {
            return Ok(value.clone());
        }
        let value = Arc::new(init()?);
        *slot = Some(value.clone());
        Ok(value)
    }
}

impl<T> Default for InitOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide session owning the lazily-loaded transcriber
///
/// An explicit object rather than a module-level global, so callers can
/// inject one per process (or per test) and share it behind an `Arc`.
pub struct ModelSession {
    model_path: PathBuf,
    transcriber: InitOnce<Transcriber>,
}

impl ModelSession {
    /// Create a session for the model at `model_path`. No load happens yet.
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path,
            transcriber: InitOnce::new(),
        }
    }

    /// Path of the model weights this session loads
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// True once the model has been loaded
    pub fn is_loaded(&self) -> bool {
        self.transcriber.is_initialized()
    }

    /// Get the shared transcriber, loading the model on first call
    ///
    /// Subsequent calls return the identical cached handle immediately.
    pub fn get(&self) -> SttResult<Arc<Transcriber>> {
        self.transcriber.get_or_try_init(|| {
            info!("Loading session model from {:?}", self.model_path);
            Transcriber::new(&self.model_path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_init_runs_exactly_once() {
        let slot: InitOnce<u32> = InitOnce::new();
        let calls = AtomicUsize::new(0);

        let first = slot
            .get_or_try_init(|| -> Result<u32, ()> {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .unwrap();
        let second = slot
            .get_or_try_init(|| -> Result<u32, ()> {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(99)
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*second, 42);
        // The identical handle comes back, not a fresh one
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_init_leaves_slot_empty() {
        let slot: InitOnce<u32> = InitOnce::new();

        let err = slot.get_or_try_init(|| Err::<u32, &str>("load failed"));
        assert_eq!(err.unwrap_err(), "load failed");
        assert!(!slot.is_initialized());

        // A later call retries and can succeed
        let value = slot.get_or_try_init(|| Ok::<u32, &str>(7)).unwrap();
        assert_eq!(*value, 7);
        assert!(slot.is_initialized());
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let slot: Arc<InitOnce<u32>> = Arc::new(InitOnce::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = slot.clone();
                let calls = calls.clone();
                std::thread::spawn(move || {
                    slot.get_or_try_init(|| -> Result<u32, ()> {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(1)
                    })
                    .unwrap()
                })
            })
            .collect();

        let values: Vec<Arc<u32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for value in &values {
            assert!(Arc::ptr_eq(value, &values[0]));
        }
    }

    #[test]
    fn test_session_failed_load_stays_empty_for_retry() {
        let session = ModelSession::new(PathBuf::from("/nonexistent/model.bin"));
        assert!(!session.is_loaded());

        assert!(session.get().is_err());
        assert!(!session.is_loaded());

        // Retry is possible (and fails again here, the weights still do not
        // exist)
        assert!(session.get().is_err());
    }
}
