//! Error types for Casement.

use std::path::PathBuf;

/// Result type alias for window operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a platform window service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The platform refused or failed to create the native window.
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// No platform window service is available in this context.
    #[error("no platform window service is available")]
    Unavailable,
}

/// Errors that can occur in the window layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform window could not be created; no window was produced.
    #[error("failed to create window: {0}")]
    WindowCreation(#[from] PlatformError),

    /// Reading or writing the frame store failed.
    #[error("frame store I/O error at '{path}': {source}")]
    FrameStoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frame store file is not valid TOML for the expected layout.
    #[error("invalid frame store '{path}': {source}")]
    FrameStoreParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Saved frames could not be serialized.
    #[error("failed to serialize saved frames: {0}")]
    FrameStoreSerialize(#[from] toml::ser::Error),

    /// The user configuration directory could not be determined.
    #[error("no configuration directory available for '{0}'")]
    NoConfigDirectory(String),
}

impl Error {
    /// Create a frame store I/O error.
    pub fn frame_store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FrameStoreIo {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means no window was created.
    pub fn is_creation_failure(&self) -> bool {
        matches!(self, Self::WindowCreation(_))
    }
}
