use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing to, flushing or opening the report destination failed. The
    /// document written so far is incomplete.
    #[error("Failed to write report: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to create report directory {path}: {source}")]
    ReportDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed result batch on line {line}: {source}")]
    Input {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read results: {0}")]
    Read(#[source] std::io::Error),
}

impl ReportError {
    pub fn is_write_failure(&self) -> bool {
        matches!(self, ReportError::Write(_) | ReportError::ReportDir { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
