//! Draft persistence for unsaved form input.
//!
//! The store is an injected capability rather than ambient global storage,
//! so controllers can be exercised without a real backing slot. One fixed
//! slot per store; concurrent writers are last-write-wins.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::models::RecipeDraft;

/// Quiet period before a scheduled draft write lands.
pub const DRAFT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Storage capability for the single unsaved-recipe draft slot.
pub trait DraftStore: Clone + Send + Sync + 'static {
    /// Load the stored draft, if any. Corrupt payloads read as absent.
    fn load(&self) -> Result<Option<RecipeDraft>>;
    fn save(&self, draft: &RecipeDraft) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Draft slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DraftStore for JsonFileDraftStore {
    fn load(&self) -> Result<Option<RecipeDraft>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|error| Error::Draft(format!("failed to read draft slot: {error}")))?;
        match serde_json::from_str::<RecipeDraft>(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(error) => {
                tracing::warn!("Discarding unreadable draft payload: {}", error);
                Ok(None)
            }
        }
    }

    fn save(&self, draft: &RecipeDraft) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| Error::Draft(format!("failed to create draft dir: {error}")))?;
        }

        let raw = serde_json::to_string(draft)?;
        std::fs::write(&self.path, raw)
            .map_err(|error| Error::Draft(format!("failed to write draft slot: {error}")))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Draft(format!("failed to clear draft slot: {error}"))),
        }
    }
}

/// In-memory draft slot for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    draft: Option<RecipeDraft>,
    save_count: usize,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes that have landed, for debounce assertions.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.lock().map_or(0, |slot| slot.save_count)
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<RecipeDraft>> {
        let slot = self
            .inner
            .lock()
            .map_err(|error| Error::Draft(error.to_string()))?;
        Ok(slot.draft.clone())
    }

    fn save(&self, draft: &RecipeDraft) -> Result<()> {
        let mut slot = self
            .inner
            .lock()
            .map_err(|error| Error::Draft(error.to_string()))?;
        slot.draft = Some(draft.clone());
        slot.save_count += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .inner
            .lock()
            .map_err(|error| Error::Draft(error.to_string()))?;
        slot.draft = None;
        Ok(())
    }
}

/// Debounced draft writer.
///
/// Each `schedule` call replaces any pending write, so a burst of field
/// edits lands as a single save once input goes quiet.
pub struct DraftAutosaver<S: DraftStore> {
    store: S,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<S: DraftStore> DraftAutosaver<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_delay(store, DRAFT_DEBOUNCE)
    }

    #[must_use]
    pub const fn with_delay(store: S, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a write of the full field set, replacing any pending one.
    pub fn schedule(&self, draft: RecipeDraft) {
        let store = self.store.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = store.save(&draft) {
                tracing::error!("Draft autosave failed: {}", error);
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Drop any pending write without saving.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
        }
    }
}

impl<S: DraftStore> Drop for DraftAutosaver<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
