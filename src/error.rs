use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Labeler errors
// ---------------------------------------------------------------------------

/// Every way a session operation can fail.
///
/// None of these are fatal: the UI logs them, shows them in the status bar
/// and stays on the last successfully rendered file.
#[derive(Debug, Error)]
pub enum LabelerError {
    #[error("no data files found in {}", .0.display())]
    EmptyCatalog(PathBuf),

    #[error("position {position} is outside the catalog (0..{len})")]
    OutOfRange { position: isize, len: usize },

    #[error("cannot parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{columns} columns cannot be split into {segments} equal segments")]
    ShapeMismatch { columns: usize, segments: usize },

    #[error("no file is loaded")]
    NoCurrentRecord,

    #[error("{labels} labels given for {segments} segments")]
    LabelCountMismatch { labels: usize, segments: usize },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot scan {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LabelerError>;
