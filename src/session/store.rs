use crate::error::SessionError;
use crate::protocol::ProtocolState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Persistence contract for a session's protocol state.
///
/// Only protocol state is stored; message history stays with the embedding
/// application.
pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<Option<ProtocolState>, SessionError>;

    fn save(&self, state: &ProtocolState) -> Result<(), SessionError>;

    /// Remove stored state. Returns whether anything was removed.
    fn clear(&self) -> Result<bool, SessionError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StateSnapshot {
    state: ProtocolState,
    updated_at: String,
}

/// JSON snapshot on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<ProtocolState>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot: StateSnapshot = serde_json::from_str(&raw)?;
        info!(
            path = %self.path.display(),
            updated_at = %snapshot.updated_at,
            "vpp.state.loaded"
        );
        Ok(Some(snapshot.state))
    }

    fn save(&self, state: &ProtocolState) -> Result<(), SessionError> {
        let snapshot = StateSnapshot {
            state: state.clone(),
            updated_at: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        write_atomic(&self.path, &json)?;
        info!(path = %self.path.display(), "vpp.state.saved");
        Ok(())
    }

    fn clear(&self) -> Result<bool, SessionError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

/// In-process store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    slot: Mutex<Option<ProtocolState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<ProtocolState>, SessionError> {
        let slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slot.clone())
    }

    fn save(&self, state: &ProtocolState) -> Result<(), SessionError> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<bool, SessionError> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slot.take().is_some())
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(SessionError::Store(format!(
            "failed replacing state file atomically: {}: {rename_error}",
            path.display()
        )));
    }

    Ok(())
}
