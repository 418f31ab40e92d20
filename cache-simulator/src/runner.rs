//! Drives a trace through the LIRS engine and reports progress.

use crate::error::TraceError;
use crate::input::TraceReader;
use lirs_rs::{ConfigError, Engine, EngineConfig};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// How often (in references processed) to emit a progress event.
const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Errors that can abort a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// The outcome of a completed run: the driven engine plus wall-clock time.
pub struct RunOutcome {
    pub engine: Engine,
    pub duration: Duration,
}

/// Stream `trace_path` through a freshly constructed engine built from
/// `config`, logging progress every [`PROGRESS_INTERVAL`] references.
pub fn run(
    trace_path: &Path,
    ascii: bool,
    config: EngineConfig,
) -> Result<RunOutcome, RunError> {
    let mut engine = Engine::new(config)?;
    info!(path = %trace_path.display(), ascii, "opening trace file");
    let reader = TraceReader::open(trace_path, ascii)?;

    let start = Instant::now();
    for key in reader {
        let key = key?;
        engine.process_reference(key);
        if engine.refs() % PROGRESS_INTERVAL == 0 {
            info!(
                refs = engine.refs(),
                misses = engine.misses(),
                hit_rate = engine.hit_rate(),
                "ingestion progress"
            );
        }
    }
    let duration = start.elapsed();
    info!(refs = engine.refs(), ?duration, "run complete");

    Ok(RunOutcome { engine, duration })
}
