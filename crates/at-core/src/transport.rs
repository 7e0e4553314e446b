//! Transportation modes, the immutable transport configuration tables, and
//! the probabilistic mode-choice policy.
//!
//! # Tables
//!
//! `TransportConfig` holds three fixed-size arrays — probability, operating
//! radius limit, and rate — each indexed by [`TransportMode::index`]
//! (0 = public, 1 = private, 2 = walking).  The tables are loaded once before
//! generation starts and never written again; they are threaded through every
//! call via the engine's generation context rather than living in a global.
//!
//! # Rates
//!
//! A rate is a speed in grid cells per tick.  All "too slow for the time
//! budget" checks go through [`ticks_at_rate`] so the policy and the travel
//! planner always agree on trip durations.

use crate::{CoreError, CoreResult, FamilyRng};

// ── TransportMode ─────────────────────────────────────────────────────────────

/// The means by which a person travels between grid cells.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportMode {
    /// Scheduled public transit.
    Public,
    /// Private vehicle.
    Private,
    /// On foot.
    Walk,
}

impl TransportMode {
    /// All modes, in table-index order.
    pub const ALL: [TransportMode; 3] =
        [TransportMode::Public, TransportMode::Private, TransportMode::Walk];

    /// Index into the `TransportConfig` tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TransportMode::Public => 0,
            TransportMode::Private => 1,
            TransportMode::Walk => 2,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Public => "public",
            TransportMode::Private => "private",
            TransportMode::Walk => "walk",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TransportConfig ───────────────────────────────────────────────────────────

/// Immutable, process-wide transport lookup tables.
///
/// `radius_limits[m] == None` means mode `m` has no operating radius.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportConfig {
    /// Relative probability of each mode before constraint adjustments.
    pub probabilities: [f64; 3],
    /// Maximum trip distance (Chebyshev cells) each mode can serve.
    pub radius_limits: [Option<u32>; 3],
    /// Speed of each mode in cells per tick.
    pub rates: [f64; 3],
}

impl TransportConfig {
    #[inline]
    pub fn probability(&self, mode: TransportMode) -> f64 {
        self.probabilities[mode.index()]
    }

    #[inline]
    pub fn radius_limit(&self, mode: TransportMode) -> Option<u32> {
        self.radius_limits[mode.index()]
    }

    #[inline]
    pub fn rate(&self, mode: TransportMode) -> f64 {
        self.rates[mode.index()]
    }

    /// Validate the tables before any generation task starts.
    ///
    /// A missing (zero or negative) rate, a negative probability, or an
    /// all-zero probability row is a configuration error: generation cannot
    /// silently default its way around it.
    pub fn validate(&self) -> CoreResult<()> {
        for mode in TransportMode::ALL {
            let rate = self.rate(mode);
            if !(rate > 0.0) {
                return Err(CoreError::Config(format!(
                    "transport rate for {mode} must be > 0, got {rate}"
                )));
            }
            let p = self.probability(mode);
            if !p.is_finite() || p < 0.0 {
                return Err(CoreError::Config(format!(
                    "transport probability for {mode} must be non-negative, got {p}"
                )));
            }
        }
        if self.probabilities.iter().sum::<f64>() <= 0.0 {
            return Err(CoreError::Config(
                "transport probabilities must not all be zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    /// Tables for a mid-sized town: transit covers most of the grid, walking
    /// only short hops, private cars always available.
    fn default() -> Self {
        Self {
            probabilities: [0.45, 0.35, 0.20],
            radius_limits: [Some(30), None, Some(4)],
            rates: [2.0, 3.0, 0.5],
        }
    }
}

// ── Trip-duration helper ──────────────────────────────────────────────────────

/// Ticks needed to cover `distance` cells at `rate` cells/tick, rounded up.
///
/// The travel planner's point-to-point time is this applied to the Chebyshev
/// distance between the endpoint cells.
#[inline]
pub fn ticks_at_rate(distance: u32, rate: f64) -> u32 {
    (distance as f64 / rate).ceil() as u32
}

// ── Mode choice ───────────────────────────────────────────────────────────────

/// Select a transport mode and its rate for a trip of `distance` cells under
/// an optional `time_limit` budget (in ticks).
///
/// Policy, in order:
///
/// 1. Distance beyond the public radius limit forces the private mode
///    outright (nothing else can serve the trip).
/// 2. Distance beyond the walking radius limit folds the walking probability
///    into public transit — walking is not offered for this trip.
/// 3. If public transit cannot cover the distance within `time_limit`, force
///    private; otherwise, if walking cannot, fold walking into public.
/// 4. Draw one mode from the adjusted discrete distribution.
///
/// `time_limit == None` means "no budget" and skips step 3 entirely.
pub fn choose_mode(
    distance: u32,
    time_limit: Option<u32>,
    config: &TransportConfig,
    rng: &mut FamilyRng,
) -> (TransportMode, f64) {
    let private = (TransportMode::Private, config.rate(TransportMode::Private));

    if let Some(limit) = config.radius_limit(TransportMode::Public) {
        if distance > limit {
            return private;
        }
    }

    let mut weights = config.probabilities;
    let fold_walk_into_public = |w: &mut [f64; 3]| {
        w[TransportMode::Public.index()] += w[TransportMode::Walk.index()];
        w[TransportMode::Walk.index()] = 0.0;
    };

    if let Some(limit) = config.radius_limit(TransportMode::Walk) {
        if distance > limit {
            fold_walk_into_public(&mut weights);
        }
    }

    if let Some(budget) = time_limit {
        if ticks_at_rate(distance, config.rate(TransportMode::Public)) > budget {
            return private;
        }
        if ticks_at_rate(distance, config.rate(TransportMode::Walk)) > budget {
            fold_walk_into_public(&mut weights);
        }
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        // Every probabilistic option was folded away or configured to zero.
        return private;
    }

    let mut draw = rng.gen_range(0.0..total);
    for mode in TransportMode::ALL {
        let w = weights[mode.index()];
        if draw < w {
            return (mode, config.rate(mode));
        }
        draw -= w;
    }
    // Floating-point edge: the draw landed exactly on `total`.
    private
}
