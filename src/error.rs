//! Domain error taxonomy for the symbol engine.
//!
//! Everything here is a per-request failure; nothing in this core is
//! process-fatal. CLI boundaries wrap these in `anyhow` with context.

use std::path::PathBuf;

use thiserror::Error;

/// Request-level failures surfaced by the engine and request adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The package loader or parser could not produce a usable
    /// representation for a workspace root or one of its units.
    #[error("failed to load workspace root {}: {message}", root.display())]
    LoadFailure { root: PathBuf, message: String },

    /// A location identifier that is not a `file://` URI.
    #[error("invalid location identifier: {0}")]
    InvalidLocation(String),

    /// A request named a file outside the workspace root it was issued
    /// against.
    #[error("{} is outside workspace root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

impl EngineError {
    pub fn load(root: &std::path::Path, message: impl Into<String>) -> Self {
        EngineError::LoadFailure {
            root: root.to_path_buf(),
            message: message.into(),
        }
    }
}
