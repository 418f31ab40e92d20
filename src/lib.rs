#![doc = include_str!("../README.md")]
#![no_std]

// Brought into the extern prelude whenever anything in the crate needs a
// real `std` path: the `std`-feature error impls, and the `HashMap`
// fallback used when the `hashbrown` feature is off.
#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// The unit of state the engine tracks per block: key, LIRS classification,
/// and residency.
pub mod entry;

/// Error types surfaced by engine construction.
pub mod error;

/// Engine configuration: construction parameters and their validation.
pub mod config;

/// Slab-indexed storage shared between the recency stack and the
/// resident-HIR queue.
///
/// **Note**: internal infrastructure, not part of the public API.
pub(crate) mod arena;

/// The LIRS reference handler: the recency stack, the resident-HIR queue,
/// and `process_reference`.
pub mod engine;

pub use config::EngineConfig;
pub use engine::Engine;
pub use entry::{Entry, Flag};
pub use error::ConfigError;
