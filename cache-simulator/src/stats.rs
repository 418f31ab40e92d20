//! Statistics reporting for a completed simulation run.

use crate::error::CsvExportError;
use lirs_rs::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A snapshot of the engine's counters at the end of a run, detached from
/// the engine so it can be printed and exported independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub cache_size: u64,
    pub max_s_length: u64,
    pub peak_s_len: u64,
    pub hirs: u64,
    pub refs: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub prune_count: u64,
}

impl RunStats {
    pub fn from_engine(engine: &Engine) -> Self {
        Self {
            cache_size: engine.cache_size(),
            max_s_length: engine.max_s_length(),
            peak_s_len: engine.peak_s_len(),
            hirs: engine.hirs(),
            refs: engine.refs(),
            misses: engine.misses(),
            hit_rate: engine.hit_rate(),
            prune_count: engine.prune_count(),
        }
    }

    /// Print the human-readable key/value report.
    pub fn print(&self) {
        println!("cache_size:    {}", self.cache_size);
        println!("max_s_length:  {}", self.max_s_length);
        println!("peak_s_len:    {}", self.peak_s_len);
        println!("hirs:          {}", self.hirs);
        println!("refs:          {}", self.refs);
        println!("misses:        {}", self.misses);
        println!("hit_rate:      {:.3}%", self.hit_rate);
        println!("prune_count:   {}", self.prune_count);
    }

    /// Write this row, with a header, to `path` as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<(), CsvExportError> {
        let mut writer = csv::Writer::from_path(path).map_err(|source| CsvExportError {
            path: path.to_path_buf(),
            source,
        })?;
        writer
            .serialize(self)
            .map_err(|source| CsvExportError {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(|e| CsvExportError {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        Ok(())
    }
}
