//! Simulation time model.
//!
//! # Design
//!
//! Time is a week-relative integer `Tick` counter.  One tick is 10 simulated
//! minutes, so a day is 144 ticks and a full week 1,008.  Using an integer
//! tick as the canonical time unit means all schedule arithmetic is exact
//! (no floating-point drift) and comparisons are O(1).
//!
//! Generated weeks may briefly overrun the final day before the terminator
//! slot is appended, so `Tick` is *not* clamped to 1,008; downstream
//! consumers treat the final slot's end as the week boundary.

use std::fmt;

/// Ticks per simulated day (10-minute resolution).
pub const TICKS_PER_DAY: u32 = 144;

/// Ticks per simulated week.
pub const TICKS_PER_WEEK: u32 = 7 * TICKS_PER_DAY;

/// Days per generated week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Days 0..SCHOOL_WEEKDAYS carry school/job obligations; the rest are free.
pub const SCHOOL_WEEKDAYS: u8 = 5;

/// Day-relative curfew for persons with child-custody duty that day (20:00).
pub const CUSTODY_CURFEW: u32 = 120;

/// Day-relative curfew when no custody duty applies (end of day).
pub const END_OF_DAY_CURFEW: u32 = TICKS_PER_DAY;

/// Minimum consecutive at-home time required after a forced return (8 hours).
pub const HOME_REST_TICKS: u32 = 48;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A week-relative simulation tick counter.
///
/// `u32` comfortably covers a week (1,008 ticks) plus any day-boundary
/// overrun the generator produces before clipping.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u32);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The first tick past the generated week (exclusive upper bound).
    pub const END_OF_WEEK: Tick = Tick(TICKS_PER_WEEK);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Tick {
        Tick(self.0 + n)
    }

    /// Day-of-week index (0 = first day) this tick falls in.
    #[inline]
    pub fn day(self) -> u8 {
        (self.0 / TICKS_PER_DAY) as u8
    }

    /// Tick offset within its day, in `[0, 144)`.
    #[inline]
    pub fn day_offset(self) -> u32 {
        self.0 % TICKS_PER_DAY
    }

    /// The first tick of day `day` (week-relative).
    #[inline]
    pub fn start_of_day(day: u8) -> Tick {
        Tick(day as u32 * TICKS_PER_DAY)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u32> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u32) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Tick) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.day_offset() * 10;
        write!(f, "T{} (day {} {:02}:{:02})", self.0, self.day(), minutes / 60, minutes % 60)
    }
}
