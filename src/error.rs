//! Error types surfaced by engine construction.
//!
//! The engine crate is `no_std`, so these types implement `core::fmt::Display`
//! unconditionally and `std::error::Error` only under the `std` feature. The
//! crate root (`src/lib.rs`) declares `extern crate std;` under that same
//! feature so the `std::error::Error` path below actually resolves.

use core::fmt;

/// Invalid construction parameters, rejected before an [`crate::Engine`] is
/// built.
///
/// Reported to the caller with no engine state ever created. This is
/// distinct from an invariant-violation panic (an `assert!` failure inside
/// [`crate::Engine::process_reference`]), which indicates a bug in the
/// engine itself rather than bad input and is never part of this
/// recoverable-error surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `cache_size` was below the minimum accepted value.
    CacheSizeTooSmall {
        /// The value that was rejected.
        provided: u64,
        /// The minimum accepted value.
        minimum: u64,
    },
    /// `size_limit_factor` was below the minimum accepted value.
    SizeLimitFactorTooSmall {
        /// The value that was rejected.
        provided: f64,
        /// The minimum accepted value.
        minimum: f64,
    },
    /// `hir_percent` fell outside the accepted inclusive range.
    HirPercentOutOfRange {
        /// The value that was rejected.
        provided: u32,
        /// The smallest accepted value.
        min: u32,
        /// The largest accepted value.
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CacheSizeTooSmall { provided, minimum } => {
                write!(f, "cache size {provided} is below the minimum of {minimum}")
            }
            ConfigError::SizeLimitFactorTooSmall { provided, minimum } => write!(
                f,
                "size limit factor {provided} is below the minimum of {minimum}"
            ),
            ConfigError::HirPercentOutOfRange { provided, min, max } => write!(
                f,
                "HIR percent {provided} is outside the allowed range [{min}, {max}]"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
