//! The LIRS reference handler.
//!
//! ```text
//! ┌─────────────────────────── Engine ───────────────────────────┐
//! │                                                                │
//! │   key ──► index: HashMap<u64, usize> ──► arena slot            │
//! │                                                                │
//! │   S (recency stack, LRU ──────────────────────────► MRU)       │
//! │     [ LIR | LIR | HIR(resident) | HIR(non-resident) | LIR ]    │
//! │                                                                │
//! │   Q (resident-HIR queue, LRU ─────────────► MRU)                │
//! │     [ HIR(resident) | HIR(resident) ]                          │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `S` and `Q` are independent doubly linked lists (see [`crate::arena`])
//! threaded through the same slab of entries, so a slot can be linked into
//! both at once without duplicating its state.

use crate::arena::{Arena, List, Which};
use crate::config::EngineConfig;
use crate::entry::{Entry, Flag};
use crate::error::ConfigError;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// The LIRS cache replacement engine.
///
/// Owns the entry registry, the recency stack `S`, the resident-HIR queue
/// `Q`, and every counter. [`Engine::process_reference`] is the only
/// externally visible mutator; the invariants documented on this type hold
/// both before and after every call to it.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    arena: Arena,
    s: List,
    q: List,
    index: HashMap<u64, usize>,
    lirs: u64,
    hirs: u64,
    refs: u64,
    misses: u64,
    peak_s_len: u64,
    prune_count: u64,
    last_key: Option<u64>,
}

impl Engine {
    /// Validates `config` and builds an engine with empty `S`/`Q`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any of the three construction bounds are
    /// violated; see [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            arena: Arena::new(),
            s: List::new(Which::S),
            q: List::new(Which::Q),
            index: HashMap::new(),
            lirs: 0,
            hirs: 0,
            refs: 0,
            misses: 0,
            peak_s_len: 0,
            prune_count: 0,
            last_key: None,
        })
    }

    /// Processes one reference to `key`, returning `true` on a hit.
    ///
    /// Dispatches on where `key` is currently found: equal to the previous
    /// key (idempotent hit), in `S` (Case B), in `Q` only (Case C), or in
    /// neither (Case D, a miss that creates a new entry).
    pub fn process_reference(&mut self, key: u64) -> bool {
        self.refs += 1;

        if self.last_key == Some(key) {
            return true;
        }
        self.last_key = Some(key);

        let (hit, index) = match self.index.get(&key).copied() {
            Some(index) if self.arena.is_in_s(index) => (self.handle_case_b(index), index),
            Some(index) => {
                assert!(
                    self.arena.is_in_q(index),
                    "registry entry not found in S or Q"
                );
                self.handle_case_c(index);
                (true, index)
            }
            None => {
                let index = self.handle_case_d(key);
                (false, index)
            }
        };

        // Always add the entry to the MRU of S, regardless of which case ran.
        self.s_insert_mru(index);

        // Vacuous when there are no LIR entries at all (`hir_percent = 100`
        // configures `maxlirs = 0`, so S never holds a LIR to require).
        assert!(
            self.lirs == 0
                || self
                    .s
                    .peek_lru()
                    .map_or(true, |lru| self.arena.get(lru).flag == Flag::Lir),
            "invariant violated: LRU of S is not LIR after processing a reference"
        );

        self.shrink();

        #[allow(clippy::cast_possible_truncation)]
        let s_len = self.s.len() as u64;
        self.peak_s_len = self.peak_s_len.max(s_len);

        if !hit {
            self.misses += 1;
        }
        hit
    }

    /// Case B: `key` found in `S`. Returns the hit/miss verdict.
    fn handle_case_b(&mut self, index: usize) -> bool {
        self.s_remove(index);

        if self.arena.get(index).flag == Flag::Hir {
            let resident = self.arena.get(index).resident;
            let hit = resident;
            if resident {
                self.q_remove(index);
            }

            if self.config.max_lirs() == 0 {
                // `hir_percent = 100`: there is no LIR region to promote
                // into. The entry just stays HIR and (re-)becomes resident,
                // re-entering Q's MRU.
                if self.hirs >= self.config.max_hirs() {
                    self.evict_q_lru();
                }
                self.arena.get_mut(index).resident = true;
                self.q_insert_mru(index);
                self.prune();
                return hit;
            }

            // About to promote `index` to LIR: free an LIR slot for it by
            // migrating one to HIR, which needs room in Q first.
            if self.hirs >= self.config.max_hirs() {
                self.evict_q_lru();
            }

            {
                let e = self.arena.get_mut(index);
                e.flag = Flag::Lir;
                e.resident = true;
            }
            assert!(
                self.hirs <= self.config.max_hirs(),
                "invariant violated: hirs exceeds maxhirs after promotion"
            );
            self.migrate_lir_to_hir();
            self.prune();
            hit
        } else {
            // flag == LIR, necessarily resident.
            assert!(
                self.arena.get(index).resident,
                "invariant violated: LIR entry found non-resident"
            );
            self.prune();
            true
        }
    }

    /// Case C: `key` found in `Q` only. Touches it to `Q`'s MRU.
    fn handle_case_c(&mut self, index: usize) {
        assert_eq!(
            self.arena.get(index).flag,
            Flag::Hir,
            "invariant violated: entry in Q is not HIR"
        );
        assert!(
            self.arena.get(index).resident,
            "invariant violated: entry in Q is not resident"
        );
        // A touch reorders Q without changing membership, so `hirs` is
        // unaffected.
        self.q.touch_mru(&mut self.arena, index);
    }

    /// Case D: `key` in neither `S` nor `Q`. Creates and classifies a new
    /// entry, returning its arena index.
    fn handle_case_d(&mut self, key: u64) -> usize {
        let index = self.arena.insert(Entry::new(key, Flag::Hir, true));
        if self.lirs < self.config.max_lirs() {
            self.arena.get_mut(index).flag = Flag::Lir;
        } else {
            if self.hirs >= self.config.max_hirs() {
                self.evict_q_lru();
            }
            self.q_insert_mru(index);
        }
        self.index.insert(key, index);
        index
    }

    /// Pops the LRU of `S` (must be LIR by invariant 5), flips it to HIR,
    /// and pushes it to `Q`'s MRU. Never reinserted into `S`.
    ///
    /// Callers must only invoke this when `config.max_lirs() > 0`: under
    /// `hir_percent = 100` there is never a LIR entry to migrate, and
    /// `handle_case_b` skips this call entirely in that configuration.
    fn migrate_lir_to_hir(&mut self) {
        debug_assert!(
            self.config.max_lirs() > 0,
            "migrate_lir_to_hir called with no LIR region configured"
        );
        let index = self
            .s_pop_lru()
            .expect("S must hold a LIR entry to migrate when promoting a HIR to LIR");
        {
            let e = self.arena.get_mut(index);
            assert_eq!(e.flag, Flag::Lir, "invariant violated: migrating a non-LIR");
            assert!(e.resident, "invariant violated: migrating a non-resident LIR");
            e.flag = Flag::Hir;
        }
        self.q_insert_mru(index);
    }

    /// Repeatedly drops the LRU of `S` while it is HIR, restoring
    /// invariant 5. A dropped non-resident HIR entry is discarded entirely.
    fn prune(&mut self) {
        self.prune_count += 1;
        if self.lirs == 0 {
            // No LIR region configured (`hir_percent = 100`): invariant 5 is
            // vacuous, and the loop below would otherwise drain all of S,
            // since nothing ever satisfies flag == Lir to stop it.
            return;
        }
        loop {
            let Some(lru) = self.s.peek_lru() else {
                break;
            };
            if self.arena.get(lru).flag == Flag::Lir {
                break;
            }
            let index = self.s_pop_lru().expect("peeked LRU must be poppable");
            let (key, resident) = {
                let e = self.arena.get(index);
                (e.key, e.resident)
            };
            if resident {
                assert!(
                    self.arena.is_in_q(index),
                    "invariant violated: resident HIR dropped from S but absent from Q"
                );
            } else {
                assert!(
                    !self.arena.is_in_q(index),
                    "invariant violated: non-resident HIR found in Q"
                );
                self.index.remove(&key);
                self.arena.remove(index);
            }
        }
    }

    /// Pops the LRU of `Q`, asserts it is HIR+resident, and marks it
    /// non-resident. Left in place in `S` as a promotion hint.
    fn evict_q_lru(&mut self) {
        assert!(
            self.hirs >= self.config.max_hirs(),
            "evict_q_lru called without HIR budget pressure"
        );
        let index = self
            .q_pop_lru()
            .expect("Q must be non-empty when hirs >= maxhirs");
        {
            let e = self.arena.get_mut(index);
            assert_eq!(e.flag, Flag::Hir, "invariant violated: evicting a non-HIR from Q");
            assert!(e.resident, "invariant violated: evicting an already non-resident entry");
            e.resident = false;
        }
        assert!(
            self.hirs <= self.config.max_hirs(),
            "invariant violated: hirs exceeds maxhirs after eviction"
        );
    }

    /// Bounds `|S|` by `maxSlength`: if exceeded, drops the first HIR found
    /// scanning LRU→MRU. At most one removal per call.
    fn shrink(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        let s_len = self.s.len() as u64;
        if s_len > self.config.max_s_length() {
            let victim = self
                .s
                .iter_lru_to_mru(&self.arena)
                .find(|&index| self.arena.get(index).flag == Flag::Hir);
            if let Some(index) = victim {
                self.s_remove(index);
                let (key, resident) = {
                    let e = self.arena.get(index);
                    (e.key, e.resident)
                };
                if !resident {
                    self.index.remove(&key);
                    self.arena.remove(index);
                }
            }
        }
        assert!(
            self.s.len() as u64 <= self.config.max_s_length(),
            "invariant violated: |S| exceeds maxSlength after shrink"
        );
    }

    /// Inserts `index` at `S`'s MRU, adjusting `lirs` if it is LIR+resident.
    fn s_insert_mru(&mut self, index: usize) {
        self.s.push_mru(&mut self.arena, index);
        let e = self.arena.get(index);
        if e.flag == Flag::Lir && e.resident {
            self.lirs += 1;
        }
    }

    /// Removes `index` from `S`, adjusting `lirs` if it was LIR+resident.
    fn s_remove(&mut self, index: usize) {
        self.s.remove(&mut self.arena, index);
        let e = self.arena.get(index);
        if e.flag == Flag::Lir && e.resident {
            self.lirs -= 1;
        }
    }

    /// Pops `S`'s LRU, adjusting `lirs`.
    fn s_pop_lru(&mut self) -> Option<usize> {
        let index = self.s.pop_lru(&mut self.arena)?;
        let e = self.arena.get(index);
        if e.flag == Flag::Lir && e.resident {
            self.lirs -= 1;
        }
        Some(index)
    }

    /// Inserts `index` at `Q`'s MRU and increments `hirs`.
    fn q_insert_mru(&mut self, index: usize) {
        self.q.push_mru(&mut self.arena, index);
        self.hirs += 1;
    }

    /// Removes `index` from `Q` and decrements `hirs`.
    fn q_remove(&mut self, index: usize) {
        self.q.remove(&mut self.arena, index);
        self.hirs -= 1;
    }

    /// Pops `Q`'s LRU and decrements `hirs`.
    fn q_pop_lru(&mut self) -> Option<usize> {
        let index = self.q.pop_lru(&mut self.arena)?;
        self.hirs -= 1;
        Some(index)
    }

    /// Total references processed.
    pub fn refs(&self) -> u64 {
        self.refs
    }

    /// Total references that missed.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// High-water mark of `|S|` across the engine's lifetime.
    pub fn peak_s_len(&self) -> u64 {
        self.peak_s_len
    }

    /// Current number of entries in `Q` (resident HIR blocks).
    pub fn hirs(&self) -> u64 {
        self.hirs
    }

    /// `maxSlength` derived from the engine's configuration.
    pub fn max_s_length(&self) -> u64 {
        self.config.max_s_length()
    }

    /// `C`, the configured cache size.
    pub fn cache_size(&self) -> u64 {
        self.config.cache_size
    }

    /// Number of times prune has run.
    pub fn prune_count(&self) -> u64 {
        self.prune_count
    }

    /// `100 * (1 - misses / refs)`, or `0.0` before the first reference.
    pub fn hit_rate(&self) -> f64 {
        if self.refs == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.misses as f64 / self.refs as f64;
        100.0 * (1.0 - ratio)
    }
}
