use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

/// Rejected configuration values. Load and parse failures travel as `anyhow`
/// context chains from the loader instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Session errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to decode session state: {0}")]
    Decode(String),

    #[error("store: {0}")]
    Store(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
