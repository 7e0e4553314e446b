//! smalltown — end-to-end weekly itinerary generation for a synthetic town.
//!
//! Lays out a 40×40 grid town (homes, workplaces, schools, daycares, a
//! transport hub in every cell), assembles ~60 families, generates every
//! resident's weekly activity-travel schedule in parallel, and writes the
//! itineraries in both output formats.  Scale comment: bump the constants
//! and feed a real town layout to run at city scale.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use at_core::{BuildingId, Cell, RunRng, Tick, TransportConfig};
use at_engine::{ActivityPolicy, GenerationContext, generate_all};
use at_grid::{BuildingKind, LocationGrid};
use at_model::{ObligationWindow, Population, Role};
use at_output::{CsvScheduleWriter, ItineraryWriter, write_report};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const GRID_WIDTH: u32 = 40;
const GRID_HEIGHT: u32 = 40;
const HOME_COUNT: usize = 80;
const JOB_COUNT: usize = 24;
const SCHOOL_COUNT: usize = 3;
const DAYCARE_COUNT: usize = 4;
const FAMILY_COUNT: usize = 60;

const JOB_WINDOW: ObligationWindow = ObligationWindow { start: 36, end: 96 }; // 06:00–16:00
const SCHOOL_WINDOW: ObligationWindow = ObligationWindow { start: 36, end: 84 }; // 06:00–14:00

// ── Town layout ───────────────────────────────────────────────────────────────

struct Town {
    grid: LocationGrid,
    homes: Vec<BuildingId>,
    jobs: Vec<BuildingId>,
    schools: Vec<BuildingId>,
    daycares: Vec<BuildingId>,
}

fn random_cell(rng: &mut RunRng) -> Cell {
    Cell::new(
        rng.gen_range(0..GRID_WIDTH as i32),
        rng.gen_range(0..GRID_HEIGHT as i32),
    )
}

fn build_town(rng: &mut RunRng) -> Result<Town> {
    let mut grid = LocationGrid::new(GRID_WIDTH, GRID_HEIGHT);

    // A hub in every cell so multi-leg trips have intermediate stops.
    for y in 0..GRID_HEIGHT as i32 {
        for x in 0..GRID_WIDTH as i32 {
            grid.add_building(Cell::new(x, y), BuildingKind::TransportHub, None)?;
        }
    }

    let place = |grid: &mut LocationGrid, rng: &mut RunRng, kind, capacity, count| {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(grid.add_building(random_cell(rng), kind, capacity)?);
        }
        Ok::<_, anyhow::Error>(ids)
    };

    let homes = place(&mut grid, rng, BuildingKind::Home, Some(8), HOME_COUNT)?;
    let jobs = place(&mut grid, rng, BuildingKind::Job, Some(30), JOB_COUNT)?;
    let schools = place(&mut grid, rng, BuildingKind::School, Some(400), SCHOOL_COUNT)?;
    let daycares = place(&mut grid, rng, BuildingKind::Daycare, Some(60), DAYCARE_COUNT)?;

    Ok(Town { grid, homes, jobs, schools, daycares })
}

// ── Population assembly ───────────────────────────────────────────────────────

fn build_population(town: &Town, rng: &mut RunRng) -> Result<Population> {
    let mut pop = Population::new();

    for _ in 0..FAMILY_COUNT {
        let home = town.homes[rng.gen_range(0..town.homes.len())];
        let daycare = town.daycares[rng.gen_range(0..town.daycares.len())];
        let family = pop.add_family(home, Some(daycare));

        // One or two adults; the first is always employed.
        let job = town.jobs[rng.gen_range(0..town.jobs.len())];
        pop.add_person(family, rng.gen_range(25..60), Role::EmployedAdult, Some(job), Some(JOB_WINDOW))?;
        if rng.gen_bool(0.7) {
            let role = if rng.gen_bool(0.6) { Role::EmployedAdult } else { Role::UnemployedAdult };
            let job = (role == Role::EmployedAdult)
                .then(|| town.jobs[rng.gen_range(0..town.jobs.len())]);
            let window = job.map(|_| JOB_WINDOW);
            pop.add_person(family, rng.gen_range(25..60), role, job, window)?;
        }

        // Zero to three children.
        let school = town.schools[rng.gen_range(0..town.schools.len())];
        for _ in 0..rng.gen_range(0..=3u32) {
            let age = rng.gen_range(1..18u8);
            match age {
                0..6 => pop.add_person(family, age, Role::YoungChild, None, None)?,
                6..13 => {
                    pop.add_person(family, age, Role::SchoolChild, Some(school), Some(SCHOOL_WINDOW))?
                }
                _ => pop.add_person(
                    family,
                    age,
                    Role::OlderSchoolChild,
                    Some(school),
                    Some(SCHOOL_WINDOW),
                )?,
            };
        }
    }

    Ok(pop)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== smalltown — weekly itinerary synthesis ===");
    println!("Grid: {GRID_WIDTH}×{GRID_HEIGHT}  |  Families: {FAMILY_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Lay out the town.
    let mut rng = RunRng::new(SEED);
    let town = build_town(&mut rng)?;
    println!(
        "Town: {} buildings ({} homes, {} jobs, {} schools, {} daycares)",
        town.grid.buildings().len(),
        town.homes.len(),
        town.jobs.len(),
        town.schools.len(),
        town.daycares.len()
    );

    // 2. Assemble the population.
    let pop = build_population(&town, &mut rng)?;
    println!("Population: {} persons in {} families", pop.person_count(), pop.family_count());

    // 3. Generate every resident's week.
    let ctx = GenerationContext::new(TransportConfig::default(), ActivityPolicy::default(), SEED)?;
    let t0 = Instant::now();
    let report = generate_all(&town.grid, &pop, &ctx);
    let elapsed = t0.elapsed();
    println!(
        "Generated {} schedules in {:.3} s ({} failures)",
        report.generated_count(),
        elapsed.as_secs_f64(),
        report.failures().len()
    );
    for (person, err) in report.failures() {
        eprintln!("  {person}: {err}");
    }
    println!();

    // 4. Write both output formats.
    std::fs::create_dir_all("output/smalltown")?;
    let mut text = ItineraryWriter::create(Path::new("output/smalltown/itineraries.txt"))?;
    write_report(&mut text, &pop, &report)?;
    let mut csv = CsvScheduleWriter::create(Path::new("output/smalltown/schedules.csv"))?;
    write_report(&mut csv, &pop, &report)?;
    println!("Wrote output/smalltown/itineraries.txt and schedules.csv");
    println!();

    // 5. Show one commuter's Monday.
    if let Some(person) = pop.persons().iter().find(|p| p.role == Role::EmployedAdult) {
        if let Some(schedule) = report.schedule(person.id) {
            println!("Sample week start for {} (job {:?}):", person.id, person.fixed_building);
            let monday_end = Tick(at_core::TICKS_PER_DAY);
            for slot in schedule.slots().iter().take_while(|s| s.end <= monday_end).take(12) {
                println!("  until {:<22} {:<16} building {}", slot.end.to_string(), slot.kind.to_string(), slot.building);
            }
        }
    }

    Ok(())
}
