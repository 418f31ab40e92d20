//! Error types surfaced by trace ingestion and statistics export.

use std::path::PathBuf;

/// Failures reading or parsing a trace file.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("failed to read trace file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A binary-mode trace's length is not a multiple of 8 bytes.
    #[error("binary trace {path} has length {len}, not a multiple of 8 bytes")]
    TruncatedRecord { path: PathBuf, len: u64 },

    /// A textual-mode line did not parse as a `u64` block id.
    #[error("line {line} in {path}: {text:?} is not a valid key")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

/// Failures writing the statistics CSV export.
#[derive(Debug, thiserror::Error)]
#[error("failed to write CSV output to {path}: {source}")]
pub struct CsvExportError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}
