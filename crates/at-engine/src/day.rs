//! The per-day activity state machine.
//!
//! One `DayState` value carries the whole day's mutable state; every
//! transition is a method on [`DayRunner`] that advances the day clock and
//! appends slots.  Each loop iteration takes exactly one transition, and
//! every transition advances `day_time` by at least one tick, so the day
//! always terminates at its curfew.
//!
//! Transition priority per iteration:
//!
//! 1. **Fixed obligation due** — leaving any later (even at the fastest
//!    mode) would miss the stop's start: travel there now.
//! 2. **Out of budget** — the away-time allowance or the curfew leaves just
//!    enough room to get home: forced return, followed by a mandatory
//!    48-tick home rest before the next discretionary departure.
//! 3. **Weighted draw** over {stay home, leave early for a pending
//!    obligation, discretionary outing}.  An outing destination comes from
//!    the grid's ring search; when nothing claimable exists the person heads
//!    home instead.

use at_core::{
    BuildingId, Cell, FamilyRng, HOME_REST_TICKS, SCHOOL_WEEKDAYS, Tick, TICKS_PER_DAY,
    TransportMode, choose_mode, ticks_at_rate,
};
use at_grid::{LocationGrid, VisitorKind, find_and_claim};
use at_model::{Role, Schedule, TimeSlot};

use crate::context::GenerationContext;
use crate::travel::move_to;
use crate::week::{EscortEffect, ObligationStop};

// ── DayState ──────────────────────────────────────────────────────────────────

/// Mutable per-day state, reset by [`begin_day`](Self::begin_day) at each day
/// boundary while `time_spent_away` and `required_home_stay` carry across.
#[derive(Clone, Debug)]
pub struct DayState {
    /// Day of week, 0-based.
    pub day: u8,
    /// Day-relative clock; may pass `TICKS_PER_DAY` when the day overruns.
    pub day_time: u32,
    /// Day-relative tick after which this person must be home.
    pub curfew: u32,
    /// Next unvisited entry in the day's obligation list.
    pub obligation_idx: usize,
    /// Ticks away from home since the last return.
    pub time_spent_away: u32,
    /// Remaining mandatory home rest after a forced return.
    pub required_home_stay: u32,
    pub at_home: bool,
    pub kids_at_school: bool,
    pub kids_at_daycare: bool,
    /// Building the person is currently at.
    pub location: BuildingId,
}

impl DayState {
    /// Week start: at home, all clocks zero.
    pub fn start_of_week(home: BuildingId) -> Self {
        Self {
            day: 0,
            day_time: 0,
            curfew: TICKS_PER_DAY,
            obligation_idx: 0,
            time_spent_away: 0,
            required_home_stay: 0,
            at_home: true,
            kids_at_school: false,
            kids_at_daycare: false,
            location: home,
        }
    }

    /// Reset the per-day counters; `carry` is the clipped overrun of the
    /// previous day.
    pub fn begin_day(&mut self, day: u8, carry: u32, curfew: u32) {
        self.day = day;
        self.day_time = carry;
        self.curfew = curfew;
        self.obligation_idx = 0;
    }

    /// Week-relative tick of this day's midnight.
    #[inline]
    pub fn day_base(&self) -> u32 {
        self.day as u32 * TICKS_PER_DAY
    }
}

// ── DayRunner ─────────────────────────────────────────────────────────────────

/// Borrowed, read-only inputs for running one person's days.
pub(crate) struct DayRunner<'a> {
    pub grid: &'a LocationGrid,
    pub ctx: &'a GenerationContext,
    /// The person's home building.
    pub home: BuildingId,
    pub role: Role,
    /// Day-relative obligation stops, sorted by arrival tick.  Replayed on
    /// weekdays only.
    pub stops: &'a [ObligationStop],
}

impl DayRunner<'_> {
    /// Run one day: take transitions until the day clock reaches the curfew.
    pub fn run_day(&self, state: &mut DayState, schedule: &mut Schedule, rng: &mut FamilyRng) {
        while state.day_time < state.curfew {
            if let Some(stop) = self.pending_stop(state) {
                if self.must_leave_for(state, &stop) {
                    self.attend_obligation(state, schedule, rng);
                    continue;
                }
            }

            if !state.at_home && self.out_of_budget(state) {
                self.return_home(state, schedule, rng, true);
                continue;
            }

            self.discretionary_step(state, schedule, rng);
        }
    }

    // ── Transition 1: fixed obligations ───────────────────────────────────

    fn pending_stop(&self, state: &DayState) -> Option<ObligationStop> {
        if state.day >= SCHOOL_WEEKDAYS {
            return None;
        }
        self.stops.get(state.obligation_idx).copied()
    }

    /// `true` once delaying departure any further would miss the stop's
    /// start, even at the fastest mode.
    fn must_leave_for(&self, state: &DayState, stop: &ObligationStop) -> bool {
        let dist = self.cell_of(state.location).chebyshev(self.cell_of(stop.building));
        state.day_time + self.fastest_ticks(dist) + 1 >= stop.arrive
    }

    fn attend_obligation(&self, state: &mut DayState, schedule: &mut Schedule, rng: &mut FamilyRng) {
        let stop = self.stops[state.obligation_idx];
        state.obligation_idx += 1;

        let dest = self.cell_of(stop.building);
        let dist = self.cell_of(state.location).chebyshev(dest);
        let budget = stop.arrive.saturating_sub(state.day_time).max(1);
        let (mode, rate) = choose_mode(dist, Some(budget), &self.ctx.transport, rng);

        let start = self.emit_tick(state, schedule);
        let travel = move_to(
            schedule, self.grid, state.location, dest, self.presence_kind(state), start, mode, rate,
        );

        let was = state.day_time;
        // Early arrivals wait at the door until the stop opens.
        let arrival = (was + travel + 1).max(stop.arrive);
        self.push(schedule, state, stop.building, arrival, VisitorKind::Visitor);
        let leave = stop.depart.max(arrival);
        if leave > arrival {
            self.push(schedule, state, stop.building, leave, VisitorKind::Visitor);
        }

        state.day_time = leave;
        state.time_spent_away += leave - was;
        state.at_home = false;
        state.location = stop.building;
        match stop.effect {
            EscortEffect::None => {}
            EscortEffect::DropOffSchool => state.kids_at_school = true,
            EscortEffect::PickUpSchool => state.kids_at_school = false,
            EscortEffect::DropOffDaycare => state.kids_at_daycare = true,
            EscortEffect::PickUpDaycare => state.kids_at_daycare = false,
        }
    }

    // ── Transition 2: forced return ───────────────────────────────────────

    /// Been out too long, or the curfew is closing in: only the trip home
    /// still fits the budget.
    fn out_of_budget(&self, state: &DayState) -> bool {
        let dist = self.cell_of(state.location).chebyshev(self.cell_of(self.home));
        let home_trip = self.fastest_ticks(dist) + 1;
        state.time_spent_away + home_trip >= self.ctx.policy.max_time_away
            || state.day_time + home_trip >= state.curfew
    }

    fn return_home(
        &self,
        state: &mut DayState,
        schedule: &mut Schedule,
        rng: &mut FamilyRng,
        forced: bool,
    ) {
        if state.at_home {
            state.time_spent_away = 0;
            return;
        }
        let dest = self.cell_of(self.home);
        let dist = self.cell_of(state.location).chebyshev(dest);
        let budget = state.curfew.saturating_sub(state.day_time).max(1);
        let (mode, rate) = choose_mode(dist, Some(budget), &self.ctx.transport, rng);

        let start = self.emit_tick(state, schedule);
        let travel = move_to(
            schedule, self.grid, state.location, dest, VisitorKind::Visitor, start, mode, rate,
        );
        state.day_time += travel + 1;
        self.push(schedule, state, self.home, state.day_time, VisitorKind::Home);

        state.at_home = true;
        state.location = self.home;
        state.time_spent_away = 0;
        if forced {
            state.required_home_stay = HOME_REST_TICKS;
        }
    }

    // ── Transition 3: weighted draw ───────────────────────────────────────

    fn discretionary_step(&self, state: &mut DayState, schedule: &mut Schedule, rng: &mut FamilyRng) {
        if state.required_home_stay > 0 && state.at_home {
            self.stay_home(state, schedule, rng);
            return;
        }

        let weights = self.ctx.policy.weights(self.role);
        let obligation_w = if self.pending_stop(state).is_some() { weights.obligation } else { 0.0 };
        let total = weights.home + obligation_w + weights.outing;
        if total <= 0.0 {
            self.stay_home(state, schedule, rng);
            return;
        }

        let draw = rng.gen_range(0.0..total);
        if draw < weights.home {
            if state.at_home {
                self.stay_home(state, schedule, rng);
            } else {
                self.return_home(state, schedule, rng, false);
            }
        } else if draw < weights.home + obligation_w {
            // Leave early; attend_obligation waits out any gap at the door.
            self.attend_obligation(state, schedule, rng);
        } else {
            self.go_out(state, schedule, rng);
        }
    }

    fn stay_home(&self, state: &mut DayState, schedule: &mut Schedule, rng: &mut FamilyRng) {
        if !state.at_home {
            self.return_home(state, schedule, rng, false);
            return;
        }
        let until_curfew = state.curfew.saturating_sub(state.day_time);
        let bound = until_curfew.min(self.ticks_until_departure(state)).max(1);
        let duration = if bound == 1 { 1 } else { rng.gen_range(1..=bound) };

        self.push(schedule, state, self.home, state.day_time + duration, VisitorKind::Home);
        state.day_time += duration;
        state.required_home_stay = state.required_home_stay.saturating_sub(duration);
    }

    fn go_out(&self, state: &mut DayState, schedule: &mut Schedule, rng: &mut FamilyRng) {
        let policy = &self.ctx.policy;
        let bound = policy
            .max_time_away
            .saturating_sub(state.time_spent_away)
            .min(state.curfew.saturating_sub(state.day_time))
            .min(self.ticks_until_departure(state));
        if bound <= policy.min_outing_ticks {
            self.stay_home(state, schedule, rng);
            return;
        }
        let duration = rng.gen_range(policy.min_outing_ticks..=bound);

        let origin = self.cell_of(state.location);
        let start = self.emit_tick(state, schedule);
        let window_end = Tick(state.day_base() + state.day_time + duration);
        let Some(dest) = find_and_claim(
            self.grid,
            origin,
            VisitorKind::Visitor,
            policy.outing_radius,
            start,
            window_end,
            1,
        ) else {
            // Nothing reachable with room: head home early instead.
            if state.at_home {
                self.stay_home(state, schedule, rng);
            } else {
                self.return_home(state, schedule, rng, false);
            }
            return;
        };

        let dest_cell = self.cell_of(dest);
        let dist = origin.chebyshev(dest_cell);
        let (mode, rate) = choose_mode(dist, Some(duration), &self.ctx.transport, rng);
        let travel = move_to(
            schedule, self.grid, state.location, dest_cell, self.presence_kind(state), start, mode,
            rate,
        );

        let was = state.day_time;
        let end = (was + duration).max(was + travel + 1);
        self.push(schedule, state, dest, end, VisitorKind::Visitor);
        state.day_time = end;
        state.time_spent_away += end - was;
        state.at_home = false;
        state.location = dest;
    }

    // ── Shared helpers ────────────────────────────────────────────────────

    #[inline]
    fn cell_of(&self, building: BuildingId) -> Cell {
        self.grid.building(building).cell
    }

    /// Travel ticks at the fastest configured mode — the bound used by the
    /// "can I still make it?" checks.
    #[inline]
    fn fastest_ticks(&self, dist: u32) -> u32 {
        ticks_at_rate(dist, self.ctx.transport.rate(TransportMode::Private))
    }

    /// Ticks left before the person must depart for the next obligation.
    fn ticks_until_departure(&self, state: &DayState) -> u32 {
        match self.pending_stop(state) {
            None => u32::MAX,
            Some(stop) => {
                let dist = self.cell_of(state.location).chebyshev(self.cell_of(stop.building));
                stop.arrive
                    .saturating_sub(self.fastest_ticks(dist) + 1)
                    .saturating_sub(state.day_time)
            }
        }
    }

    /// Purpose tag closing the stay at the current location.
    #[inline]
    fn presence_kind(&self, state: &DayState) -> VisitorKind {
        if state.at_home { VisitorKind::Home } else { VisitorKind::Visitor }
    }

    /// Week-relative tick to emit the next slot at.  Clamped to the last
    /// emitted end so a clipped day carry-over can never push slot order
    /// backwards.
    fn emit_tick(&self, state: &DayState, schedule: &Schedule) -> Tick {
        Tick(state.day_base() + state.day_time).max(schedule.last_end().unwrap_or(Tick::ZERO))
    }

    /// Append a slot ending at day-relative `end`, clamped monotone.
    fn push(
        &self,
        schedule: &mut Schedule,
        state: &DayState,
        building: BuildingId,
        end: u32,
        kind: VisitorKind,
    ) {
        let end = Tick(state.day_base() + end).max(schedule.last_end().unwrap_or(Tick::ZERO));
        schedule.push(TimeSlot::new(building, end, kind));
    }
}
