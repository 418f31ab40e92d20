//! Engine configuration.
//!
//! A plain struct with public fields, validated once at construction
//! rather than through a builder, matching this crate's configuration
//! philosophy elsewhere.

use crate::error::ConfigError;

/// Minimum accepted `cache_size`, in blocks.
pub const MIN_CACHE_SIZE: u64 = 200;

/// Minimum accepted `size_limit_factor`.
pub const MIN_STACK_FACTOR: f64 = 1.0;

/// Default `size_limit_factor` used by the CLI when `-f` is omitted.
pub const DEFAULT_STACK_FACTOR: f64 = 2.0;

/// Minimum accepted `hir_percent`.
pub const MIN_HIR_PCT: u32 = 1;

/// Default `hir_percent` used by the CLI when `-r` is omitted.
pub const DEFAULT_HIR_PCT: u32 = 1;

/// Maximum accepted `hir_percent`.
pub const MAX_HIR_PCT: u32 = 100;

/// Floor on the number of resident HIR blocks, regardless of `hir_percent`.
pub const MIN_HIR_RESIDENT: u64 = 2;

/// Parameters for constructing a LIRS [`crate::Engine`].
///
/// All fields are public; there is no builder. [`EngineConfig::validate`]
/// checks the bounds independently of [`crate::Engine::new`], which also
/// validates and is the only place construction actually happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Total cache size in blocks (`C`). Must be `>= MIN_CACHE_SIZE`.
    pub cache_size: u64,
    /// Multiplier bounding `|S|` as `size_limit_factor * cache_size`. Must
    /// be `>= MIN_STACK_FACTOR`.
    pub size_limit_factor: f64,
    /// Percentage of `cache_size` reserved for resident HIR blocks, in
    /// `[MIN_HIR_PCT, MAX_HIR_PCT]`.
    pub hir_percent: u32,
}

impl EngineConfig {
    /// Builds a config using the documented CLI defaults for
    /// `size_limit_factor` and `hir_percent`.
    pub fn new(cache_size: u64) -> Self {
        Self {
            cache_size,
            size_limit_factor: DEFAULT_STACK_FACTOR,
            hir_percent: DEFAULT_HIR_PCT,
        }
    }

    /// Validates the three construction bounds, returning the first
    /// violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_size < MIN_CACHE_SIZE {
            return Err(ConfigError::CacheSizeTooSmall {
                provided: self.cache_size,
                minimum: MIN_CACHE_SIZE,
            });
        }
        if self.size_limit_factor < MIN_STACK_FACTOR {
            return Err(ConfigError::SizeLimitFactorTooSmall {
                provided: self.size_limit_factor,
                minimum: MIN_STACK_FACTOR,
            });
        }
        if self.hir_percent < MIN_HIR_PCT || self.hir_percent > MAX_HIR_PCT {
            return Err(ConfigError::HirPercentOutOfRange {
                provided: self.hir_percent,
                min: MIN_HIR_PCT,
                max: MAX_HIR_PCT,
            });
        }
        Ok(())
    }

    /// `maxhirs = max(MIN_HIR_RESIDENT, round(hir_percent / 100 * cache_size))`.
    pub(crate) fn max_hirs(&self) -> u64 {
        #[allow(clippy::cast_precision_loss)]
        let cache_size = self.cache_size as f64;
        let computed = (f64::from(self.hir_percent) * 0.01 * cache_size).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let computed = computed as u64;
        computed.max(MIN_HIR_RESIDENT)
    }

    /// `maxlirs = cache_size - maxhirs`.
    pub(crate) fn max_lirs(&self) -> u64 {
        self.cache_size - self.max_hirs()
    }

    /// `maxSlength = size_limit_factor * cache_size`.
    pub(crate) fn max_s_length(&self) -> u64 {
        #[allow(clippy::cast_precision_loss)]
        let cache_size = self.cache_size as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_s = (self.size_limit_factor * cache_size) as u64;
        max_s
    }
}
