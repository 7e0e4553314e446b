//! Deterministic per-family and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each family gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (family_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive family IDs uniformly across the seed space.
//! This means:
//!
//! - Families never share RNG state, so per-family generation tasks can run
//!   on any thread in any order and still produce identical schedules.
//! - Adding or removing families at the end of the population does not
//!   disturb the seeds of existing families.
//!
//! All members of one family draw from the same `FamilyRng`, in member order
//! — a family is generated by a single task, so this is race-free.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::FamilyId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── FamilyRng ─────────────────────────────────────────────────────────────────

/// Per-family deterministic RNG.
///
/// Create one per family at the start of that family's generation task.  The
/// type is `!Sync` to prevent accidental sharing across threads.
pub struct FamilyRng(SmallRng);

impl FamilyRng {
    /// Seed deterministically from the run's global seed and a family ID.
    pub fn new(global_seed: u64, family: FamilyId) -> Self {
        let seed = global_seed ^ (family.0 as u64).wrapping_mul(MIXING_CONSTANT);
        FamilyRng(SmallRng::seed_from_u64(seed))
    }

    /// Re-derive the RNG for a regeneration attempt.  Mixing the attempt
    /// index in means a retried family does not replay the identical draw
    /// sequence that produced the bad schedule.
    pub fn for_attempt(global_seed: u64, family: FamilyId, attempt: u32) -> Self {
        let seed = global_seed
            ^ (family.0 as u64).wrapping_mul(MIXING_CONSTANT)
            ^ (attempt as u64).rotate_left(17);
        FamilyRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── RunRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for whole-run draws (synthetic population construction,
/// demo town layout, etc.).
///
/// Used only in single-threaded contexts.  If parallel randomness is needed,
/// derive per-family `FamilyRng`s instead.
pub struct RunRng(SmallRng);

impl RunRng {
    pub fn new(seed: u64) -> Self {
        RunRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `RunRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> RunRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        RunRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
