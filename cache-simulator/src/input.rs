//! Trace ingestion for the cache simulator.
//!
//! A trace is a sequence of block reference IDs (`u64`), stored either as
//! fixed-width binary records or as one decimal integer per line. Both
//! formats are read through a streaming iterator over a buffered reader so
//! memory use stays proportional to the engine's cache size, not the trace
//! length.

use crate::error::TraceError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Streams block reference IDs from a trace file.
///
/// Construct with [`TraceReader::open`], picking the binary or textual
/// format up front, then drive it as a plain `Iterator`.
pub enum TraceReader {
    Binary(BinaryTraceIterator),
    Text(TextTraceIterator),
}

impl TraceReader {
    /// Open `path` for streaming. `ascii` selects the one-integer-per-line
    /// textual format; otherwise the file is read as 8-byte little-endian
    /// binary records.
    pub fn open<P: AsRef<Path>>(path: P, ascii: bool) -> Result<Self, TraceError> {
        let path = path.as_ref().to_path_buf();
        if ascii {
            Ok(Self::Text(TextTraceIterator::open(path)?))
        } else {
            Ok(Self::Binary(BinaryTraceIterator::open(path)?))
        }
    }
}

impl Iterator for TraceReader {
    type Item = Result<u64, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Binary(it) => it.next(),
            Self::Text(it) => it.next(),
        }
    }
}

/// Reads fixed-width 8-byte little-endian `u64` records until EOF.
pub struct BinaryTraceIterator {
    path: PathBuf,
    reader: BufReader<File>,
}

impl BinaryTraceIterator {
    fn open(path: PathBuf) -> Result<Self, TraceError> {
        let file = File::open(&path).map_err(|source| TraceError::Io {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| TraceError::Io {
                path: path.clone(),
                source,
            })?
            .len();
        if len % 8 != 0 {
            return Err(TraceError::TruncatedRecord { path, len });
        }
        Ok(Self {
            reader: BufReader::with_capacity(1024 * 1024, file),
            path,
        })
    }
}

impl Iterator for BinaryTraceIterator {
    type Item = Result<u64, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; 8];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => Some(Ok(u64::from_le_bytes(buf))),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => None,
            Err(source) => Some(Err(TraceError::Io {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

/// Reads one decimal `u64` per line. A line equal to `"*"` or blank is
/// skipped silently, matching the rest of this format's separator handling.
pub struct TextTraceIterator {
    path: PathBuf,
    reader: BufReader<File>,
    line_num: usize,
    line_buffer: String,
}

impl TextTraceIterator {
    fn open(path: PathBuf) -> Result<Self, TraceError> {
        let file = File::open(&path).map_err(|source| TraceError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            reader: BufReader::with_capacity(1024 * 1024, file),
            path,
            line_num: 0,
            line_buffer: String::with_capacity(32),
        })
    }
}

impl Iterator for TextTraceIterator {
    type Item = Result<u64, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_num += 1;
                    let text = self.line_buffer.trim();
                    if text.is_empty() || text == "*" {
                        continue;
                    }
                    return match text.parse::<u64>() {
                        Ok(key) => Some(Ok(key)),
                        Err(_) => Some(Err(TraceError::MalformedLine {
                            path: self.path.clone(),
                            line: self.line_num,
                            text: text.to_string(),
                        })),
                    };
                }
                Err(source) => {
                    return Some(Err(TraceError::Io {
                        path: self.path.clone(),
                        source,
                    }))
                }
            }
        }
    }
}
