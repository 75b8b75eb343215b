use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CinemaError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("No auditorium is available on {date} at {start}")]
    NoAvailability { date: String, start: String },

    #[error("I/O error on '{}': {source}", path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt row {row} in '{table}': {reason}")]
    Corrupt {
        table: &'static str,
        row: usize,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CinemaError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreIo {
            path: path.into(),
            source,
        }
    }

    /// True when the error came from a missing file rather than a failed read/write.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::StoreIo { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, CinemaError>;
