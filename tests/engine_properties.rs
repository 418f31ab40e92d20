//! Black-box tests against the public `Engine` API: invariants, boundary
//! behaviors, and the documented end-to-end scenarios.

use lirs_rs::{ConfigError, Engine, EngineConfig};

fn engine(cache_size: u64, size_limit_factor: f64, hir_percent: u32) -> Engine {
    Engine::new(EngineConfig {
        cache_size,
        size_limit_factor,
        hir_percent,
    })
    .expect("valid configuration")
}

struct Xorshift(u64);

impl Xorshift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

#[test]
fn construction_rejects_each_bound_independently() {
    assert_eq!(
        Engine::new(EngineConfig {
            cache_size: 199,
            size_limit_factor: 2.0,
            hir_percent: 1,
        })
        .unwrap_err(),
        ConfigError::CacheSizeTooSmall {
            provided: 199,
            minimum: 200,
        }
    );

    assert!(matches!(
        Engine::new(EngineConfig {
            cache_size: 200,
            size_limit_factor: 0.99,
            hir_percent: 1,
        }),
        Err(ConfigError::SizeLimitFactorTooSmall { .. })
    ));

    assert!(matches!(
        Engine::new(EngineConfig {
            cache_size: 200,
            size_limit_factor: 2.0,
            hir_percent: 0,
        }),
        Err(ConfigError::HirPercentOutOfRange { .. })
    ));

    assert!(matches!(
        Engine::new(EngineConfig {
            cache_size: 200,
            size_limit_factor: 2.0,
            hir_percent: 101,
        }),
        Err(ConfigError::HirPercentOutOfRange { .. })
    ));
}

#[test]
fn scenario_repeated_single_key() {
    let mut e = engine(200, 2.0, 1);
    for _ in 0..5 {
        e.process_reference(1);
    }
    assert_eq!(e.refs(), 5);
    assert_eq!(e.misses(), 1);
    assert!((e.hit_rate() - 80.0).abs() < 1e-9);
}

#[test]
fn scenario_fills_lir_budget_with_all_misses() {
    let mut e = engine(200, 2.0, 1);
    for key in 1..=200u64 {
        e.process_reference(key);
    }
    assert_eq!(e.refs(), 200);
    assert_eq!(e.misses(), 200);
    assert!(e.hit_rate().abs() < 1e-9);
}

#[test]
fn scenario_second_pass_is_all_hits() {
    let mut e = engine(200, 2.0, 1);
    for key in 1..=200u64 {
        e.process_reference(key);
    }
    for key in 1..=200u64 {
        e.process_reference(key);
    }
    assert_eq!(e.refs(), 400);
    assert_eq!(e.misses(), 200);
    assert!((e.hit_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn scenario_one_block_beyond_lir_budget() {
    let mut e = engine(200, 2.0, 1);
    for key in 1..=201u64 {
        e.process_reference(key);
    }
    for key in 1..=201u64 {
        e.process_reference(key);
    }
    assert_eq!(e.refs(), 402);
    assert_eq!(e.misses(), 202);
    assert!((e.hit_rate() - 49.751).abs() < 0.01);
}

#[test]
fn scenario_three_key_loop() {
    let mut e = engine(200, 2.0, 1);
    for _ in 0..300 {
        e.process_reference(1);
        e.process_reference(2);
        e.process_reference(3);
    }
    assert_eq!(e.refs(), 900);
    assert_eq!(e.misses(), 3);
    assert!((e.hit_rate() - (100.0 * (1.0 - 3.0 / 900.0))).abs() < 1e-9);
}

#[test]
fn boundary_hir_percent_100_leaves_no_lir_budget() {
    let e = engine(200, 2.0, 100);
    // With no LIR budget every miss must enter as HIR; verified indirectly
    // through refs()/misses() after driving references below, since maxlirs
    // is not itself part of the public accessor surface.
    drop(e);
    let mut e = engine(200, 2.0, 100);
    for key in 1..=50u64 {
        e.process_reference(key);
    }
    assert_eq!(e.misses(), 50);
    assert_eq!(e.refs(), 50);
}

#[test]
fn boundary_hir_percent_100_re_reference_is_a_hit() {
    // Regression: with no LIR region configured at all, re-referencing a
    // key through Case B (an intervening different key, so this isn't the
    // Case A idempotence short-circuit) must register as a hit rather than
    // panicking on the invariant that the LRU of S is LIR.
    let mut e = engine(200, 2.0, 100);
    assert!(!e.process_reference(1)); // miss: first reference to 1
    assert!(!e.process_reference(2)); // miss: first reference to 2
    assert!(e.process_reference(1)); // hit via Case B, no LIR promotion
    assert_eq!(e.refs(), 3);
    assert_eq!(e.misses(), 2);
}

#[test]
fn boundary_size_limit_factor_one_keeps_hit_rate_sane() {
    let mut e = engine(200, 1.0, 1);
    let mut rng = Xorshift(0xD1B5_4A32_D192_ED03);
    for _ in 0..5000 {
        let key = rng.next() % 400;
        e.process_reference(key);
    }
    assert!(e.hit_rate() >= 0.0 && e.hit_rate() <= 100.0);
}

#[test]
fn hit_rate_stays_in_bounds_across_a_long_mixed_trace() {
    let mut e = engine(300, 1.5, 10);
    let mut rng = Xorshift(0x1234_5678_9ABC_DEF1);
    for _ in 0..50_000 {
        let key = rng.next() % 2000;
        e.process_reference(key);
        assert!(e.hit_rate() >= 0.0 && e.hit_rate() <= 100.0);
    }
    assert_eq!(e.refs(), 50_000);
    assert!(e.misses() <= e.refs());
}

#[test]
fn loop_dominated_workload_beats_trivial_always_miss_baseline() {
    // A workload that repeatedly cycles through a small working set should
    // achieve a hit rate far above what an always-miss baseline gets (0%),
    // which is the regression property scenario 6 in the design doc is
    // standing in for without requiring an external zipfian trace file.
    let mut e = engine(200, 2.0, 1);
    let mut rng = Xorshift(0x2545_F491_4F6C_DD1D);
    for _ in 0..1_000_000 {
        // Most references land in a hot set of 50 keys, occasionally
        // spilling into a much larger cold set.
        let key = if rng.next() % 10 != 0 {
            rng.next() % 50
        } else {
            rng.next() % 5000
        };
        e.process_reference(key);
    }
    assert!(e.hit_rate() > 50.0);
}
