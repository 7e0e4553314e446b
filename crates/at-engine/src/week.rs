//! The weekly driver: obligation collection, per-family generation tasks,
//! and the run-level report.
//!
//! A *family* is the unit of work.  All members of one family are generated
//! sequentially by a single task sharing one [`FamilyRng`], so members can
//! read each other's obligations (the custodian's escort stops come from the
//! children's school windows) without any locking.  Families are fully
//! independent and may be generated on any thread in any order.

use at_core::{
    BuildingId, CUSTODY_CURFEW, DAYS_PER_WEEK, END_OF_DAY_CURFEW, FamilyId, FamilyRng, PersonId,
    SCHOOL_WEEKDAYS, Tick, TICKS_PER_DAY,
};
use at_grid::{LocationGrid, VisitorKind};
use at_model::{Person, Population, Schedule, TimeSlot};
use rustc_hash::FxHashSet;

use crate::context::{ActivityPolicy, GenerationContext};
use crate::day::{DayRunner, DayState};
use crate::error::GenError;

// ── Obligation stops ──────────────────────────────────────────────────────────

/// A fixed weekday stop: be at `building` from `arrive` until `depart`
/// (day-relative ticks, `arrive == depart` for a momentary escort call).
#[derive(Copy, Clone, Debug)]
pub struct ObligationStop {
    pub building: BuildingId,
    pub arrive: u32,
    pub depart: u32,
    pub effect: EscortEffect,
}

/// Custody bookkeeping attached to an escort stop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EscortEffect {
    None,
    DropOffSchool,
    PickUpSchool,
    DropOffDaycare,
    PickUpDaycare,
}

fn escort(building: BuildingId, at: u32, effect: EscortEffect) -> ObligationStop {
    ObligationStop { building, arrive: at, depart: at, effect }
}

/// Collect one person's weekday stops: their own fixed obligation, daycare
/// attendance for young children, and — for the family custodian — escort
/// calls derived from every dependent's school or daycare window.
///
/// Sorted by arrival; the day engine replays the list each weekday.
pub(crate) fn weekly_stops(
    pop: &Population,
    policy: &ActivityPolicy,
    person: &Person,
) -> Vec<ObligationStop> {
    let fam = pop.family(person.family);
    let mut stops = Vec::new();

    if let (Some(building), Some(window)) = (person.fixed_building, person.obligation) {
        stops.push(ObligationStop {
            building,
            arrive: window.start,
            depart: window.end,
            effect: EscortEffect::None,
        });
    }

    if person.role.attends_daycare() {
        if let Some(daycare) = fam.daycare {
            let window = policy.daycare_window;
            stops.push(ObligationStop {
                building: daycare,
                arrive: window.start,
                depart: window.end,
                effect: EscortEffect::None,
            });
        }
    }

    if pop.custodian(person.family) == Some(person.id) {
        for &member in &fam.members {
            if member == person.id {
                continue;
            }
            let dependent = pop.person(member);
            if dependent.role.attends_school() {
                if let (Some(school), Some(window)) =
                    (dependent.fixed_building, dependent.obligation)
                {
                    stops.push(escort(school, window.start, EscortEffect::DropOffSchool));
                    stops.push(escort(school, window.end, EscortEffect::PickUpSchool));
                }
            } else if dependent.role.attends_daycare() {
                if let Some(daycare) = fam.daycare {
                    let window = policy.daycare_window;
                    stops.push(escort(daycare, window.start, EscortEffect::DropOffDaycare));
                    stops.push(escort(daycare, window.end, EscortEffect::PickUpDaycare));
                }
            }
        }
    }

    // Siblings sharing a school produce one escort call, not one per child.
    let mut seen: FxHashSet<(u32, BuildingId)> = FxHashSet::default();
    stops.retain(|s| seen.insert((s.arrive, s.building)));
    stops.sort_by_key(|s| (s.arrive, s.building.index()));
    stops
}

// ── Per-person generation ─────────────────────────────────────────────────────

fn curfew_for(custodian: bool, day: u8) -> u32 {
    if custodian && day < SCHOOL_WEEKDAYS { CUSTODY_CURFEW } else { END_OF_DAY_CURFEW }
}

/// Clip a day's overrun so the carried time can never swallow the next day's
/// first obligation or pass its curfew.
fn clipped_carry(day_time: u32, day: u8, custodian: bool, stops: &[ObligationStop]) -> u32 {
    let mut carry = day_time.saturating_sub(TICKS_PER_DAY);
    let next = day + 1;
    if next >= DAYS_PER_WEEK {
        return 0;
    }
    if next < SCHOOL_WEEKDAYS {
        if let Some(first) = stops.first() {
            carry = carry.min(first.arrive.saturating_sub(1));
        }
    }
    carry.min(curfew_for(custodian, next))
}

fn generate_person(
    grid: &LocationGrid,
    pop: &Population,
    ctx: &GenerationContext,
    person: &Person,
    stops: &[ObligationStop],
    rng: &mut FamilyRng,
) -> Schedule {
    let fam = pop.family(person.family);
    let custodian = pop.custodian(person.family) == Some(person.id);

    let mut schedule = Schedule::new(person.role);
    let mut state = DayState::start_of_week(fam.home);
    let runner = DayRunner { grid, ctx, home: fam.home, role: person.role, stops };

    let mut carry = 0;
    for day in 0..DAYS_PER_WEEK {
        state.begin_day(day, carry, curfew_for(custodian, day));
        runner.run_day(&mut state, &mut schedule, rng);
        carry = clipped_carry(state.day_time, day, custodian, stops);
    }

    // Even a week with no drawn activity covers the full span at home.
    if schedule.last_end().is_none_or(|end| end < Tick::END_OF_WEEK) {
        schedule.push(TimeSlot::new(fam.home, Tick::END_OF_WEEK, VisitorKind::Home));
    }
    schedule
}

// ── Family tasks ──────────────────────────────────────────────────────────────

/// Generate schedules for every member of one family, in member order.
///
/// Each finished schedule is checked against the output contract; a
/// violation triggers one regeneration with a re-derived RNG before the
/// failure is surfaced for that person.
pub fn generate_family(
    grid: &LocationGrid,
    pop: &Population,
    ctx: &GenerationContext,
    family: FamilyId,
) -> Vec<(PersonId, Result<Schedule, GenError>)> {
    let fam = pop.family(family);
    let mut rng = FamilyRng::new(ctx.seed, family);
    let mut out = Vec::with_capacity(fam.members.len());

    for &id in &fam.members {
        let person = pop.person(id);
        let stops = weekly_stops(pop, &ctx.policy, person);
        let schedule = generate_person(grid, pop, ctx, person, &stops, &mut rng);
        let result = match schedule.validate() {
            Ok(()) => Ok(schedule),
            Err(_) => {
                let mut retry_rng = FamilyRng::for_attempt(ctx.seed, family, 1);
                let retry = generate_person(grid, pop, ctx, person, &stops, &mut retry_rng);
                match retry.validate() {
                    Ok(()) => Ok(retry),
                    Err(violation) => Err(GenError::Invariant { person: id, violation }),
                }
            }
        };
        out.push((id, result));
    }
    out
}

// ── Whole-run generation ──────────────────────────────────────────────────────

/// Outcome of a whole-population generation run.
///
/// Schedules are indexed by person id; a person whose schedule failed even
/// the regeneration attempt appears in [`failures`](Self::failures) instead.
#[derive(Debug, Default)]
pub struct GenerationReport {
    schedules: Vec<Option<Schedule>>,
    failures: Vec<(PersonId, GenError)>,
}

impl GenerationReport {
    /// The generated schedule for `person`, if generation succeeded.
    pub fn schedule(&self, person: PersonId) -> Option<&Schedule> {
        self.schedules.get(person.index()).and_then(|s| s.as_ref())
    }

    /// Take ownership of `person`'s schedule, leaving `None` behind.
    pub fn take_schedule(&mut self, person: PersonId) -> Option<Schedule> {
        self.schedules.get_mut(person.index()).and_then(|s| s.take())
    }

    /// Persons whose generation failed, with the surfaced error.
    pub fn failures(&self) -> &[(PersonId, GenError)] {
        &self.failures
    }

    /// Number of successfully generated schedules.
    pub fn generated_count(&self) -> usize {
        self.schedules.iter().filter(|s| s.is_some()).count()
    }
}

/// Generate schedules for the whole population, one task per family.
///
/// With the `parallel` feature the family tasks run on the rayon pool;
/// per-family seeding makes the output identical either way.
pub fn generate_all(
    grid: &LocationGrid,
    pop: &Population,
    ctx: &GenerationContext,
) -> GenerationReport {
    let families: Vec<FamilyId> = pop.families().iter().map(|f| f.id).collect();

    #[cfg(feature = "parallel")]
    let per_family: Vec<_> = {
        use rayon::prelude::*;
        families.par_iter().map(|&f| generate_family(grid, pop, ctx, f)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let per_family: Vec<_> =
        families.iter().map(|&f| generate_family(grid, pop, ctx, f)).collect();

    let mut schedules = vec![None; pop.person_count()];
    let mut failures = Vec::new();
    for family_results in per_family {
        for (id, result) in family_results {
            match result {
                Ok(schedule) => schedules[id.index()] = Some(schedule),
                Err(err) => failures.push((id, err)),
            }
        }
    }
    GenerationReport { schedules, failures }
}
