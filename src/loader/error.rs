use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or watching a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File content is neither valid UTF-8 nor valid GBK.
    #[error("Cannot decode {} as UTF-8 or GBK", path.display())]
    Decode { path: PathBuf },
    /// Atomic write operation failed.
    #[error("Atomic write to {} failed: {message}", path.display())]
    WriteFailed { path: PathBuf, message: String },
    /// File system watcher could not be set up.
    #[error("Failed to watch {}: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    /// Watcher stopped delivering events.
    #[error("File watcher disconnected")]
    WatcherDisconnected,
}
