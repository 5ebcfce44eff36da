//! Seedable randomness seam behind the deliberate flakiness.
//!
//! A bare coin flip at each flaky call site would be useless in tests, so the
//! coin lives behind [`FaultSource`]: production wires in a seeded RNG, tests
//! wire in a double that forces either branch.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Decides whether a flaky action takes effect.
pub trait FaultSource {
    /// Roll against `success_rate` in `[0, 1]`. `true` means the action goes
    /// through; `false` means it is silently dropped.
    fn attempt(&mut self, success_rate: f64) -> bool;
}

/// Production fault source: a seedable PRNG.
///
/// With a fixed seed the whole run is reproducible, which is exactly what an
/// automation suite chasing a flaky button wants.
#[derive(Debug)]
pub struct SeededFaults {
    rng: StdRng,
}

impl SeededFaults {
    /// Deterministic source from an explicit seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic source seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl FaultSource for SeededFaults {
    fn attempt(&mut self, success_rate: f64) -> bool {
        if success_rate >= 1.0 {
            return true;
        }
        self.rng.random::<f64>() < success_rate
    }
}

/// Test double that always lets actions through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl FaultSource for AlwaysSucceed {
    fn attempt(&mut self, _success_rate: f64) -> bool {
        true
    }
}

/// Test double that drops every flaky action.
///
/// Non-flaky call sites pass a success rate of 1.0 and are unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FaultSource for AlwaysFail {
    fn attempt(&mut self, success_rate: f64) -> bool {
        success_rate >= 1.0
    }
}
