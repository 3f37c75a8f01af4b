//! Error type shared by every router operation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering pages or building navigation
///
/// Unparseable page source is *not* an error: title extraction falls back to
/// the configured fallback title instead.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The pages root does not exist or is not a directory
    #[error("pages directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A page file could not be read
    #[error("failed to read page {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed below the root
    #[error("failed to walk pages directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A page path does not live under the pages root
    #[error("page {} is not inside {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// An exclude pattern is not a valid glob
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

pub type Result<T> = std::result::Result<T, RouterError>;
