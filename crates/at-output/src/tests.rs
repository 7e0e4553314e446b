use at_core::{BuildingId, Cell, Tick, TransportConfig};
use at_grid::{BuildingKind, LocationGrid, VisitorKind};
use at_model::{ObligationWindow, Population, Role, Schedule, TimeSlot};

use crate::row::slot_rows;
use crate::text::ItineraryWriter;
use crate::writer::{ScheduleWriter, write_report};

fn sample_population() -> Population {
    let mut pop = Population::new();
    let fam = pop.add_family(BuildingId(0), None);
    pop.add_person(
        fam,
        38,
        Role::EmployedAdult,
        Some(BuildingId(7)),
        Some(ObligationWindow::new(36, 96)),
    )
    .expect("family exists");
    pop.add_person(fam, 33, Role::UnemployedAdult, None, None).expect("family exists");
    pop
}

fn sample_schedule(role: Role) -> Schedule {
    let mut schedule = Schedule::new(role);
    schedule.push(TimeSlot::new(BuildingId(0), Tick(30), VisitorKind::Home));
    schedule.push(TimeSlot::new(BuildingId(7), Tick(96), VisitorKind::Visitor));
    schedule.push(TimeSlot::new(BuildingId(0), Tick(1008), VisitorKind::Home));
    schedule
}

mod rows {
    use super::*;

    #[test]
    fn start_day_is_the_previous_end_day() {
        let pop = sample_population();
        let person = &pop.persons()[0];
        let mut schedule = Schedule::new(person.role);
        schedule.push(TimeSlot::new(BuildingId(0), Tick(100), VisitorKind::Home));
        schedule.push(TimeSlot::new(BuildingId(7), Tick(200), VisitorKind::Visitor));
        schedule.push(TimeSlot::new(BuildingId(0), Tick(1008), VisitorKind::Home));

        let rows = slot_rows(person, &schedule);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].day_start, rows[0].day_end), (0, 0));
        // 200 falls on day 1; the stay began on day 0.
        assert_eq!((rows[1].day_start, rows[1].day_end), (0, 1));
        assert_eq!((rows[2].day_start, rows[2].day_end), (1, 7));
        assert_eq!(rows[1].end_tick, 200);
        assert_eq!(rows[1].building, 7);
    }
}

mod text {
    use super::*;

    #[test]
    fn itinerary_sections_carry_the_job_header() {
        let pop = sample_population();
        let adult = &pop.persons()[0];

        let mut writer = ItineraryWriter::new(Vec::new());
        writer.write_schedule(adult, &sample_schedule(adult.role)).expect("write");
        writer.finish().expect("flush");

        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#7");
        assert_eq!(lines[1], "0 0 30 0");
        assert_eq!(lines[2], "0 0 96 7");
        assert_eq!(lines[3], "0 7 1008 0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn persons_without_a_job_get_a_sentinel_header() {
        let pop = sample_population();
        let adult = &pop.persons()[1];

        let mut writer = ItineraryWriter::new(Vec::new());
        writer.write_schedule(adult, &sample_schedule(adult.role)).expect("write");
        writer.finish().expect("flush");

        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        assert!(text.starts_with("#-1\n"));
    }
}

mod csv_out {
    use super::*;
    use crate::csv::CsvScheduleWriter;

    #[test]
    fn csv_file_has_header_and_one_row_per_slot() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("schedules.csv");

        let pop = sample_population();
        let adult = &pop.persons()[0];
        let mut writer = CsvScheduleWriter::create(&path).expect("create");
        writer.write_schedule(adult, &sample_schedule(adult.role)).expect("write");
        writer.finish().expect("flush");

        let text = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "person_id,role,day_start,day_end,end_tick,building_id,kind"
        );
        assert_eq!(lines.len(), 1 + 3);
        assert_eq!(lines[1], "0,employed_adult,0,0,30,0,home");
        assert_eq!(lines[2], "0,employed_adult,0,0,96,7,visitor");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("schedules.csv");
        let mut writer = CsvScheduleWriter::create(&path).expect("create");
        writer.finish().expect("first");
        writer.finish().expect("second");
    }
}

mod report {
    use super::*;
    use at_engine::{ActivityPolicy, GenerationContext, generate_all};

    #[test]
    fn write_report_emits_one_section_per_generated_person() {
        let mut grid = LocationGrid::new(6, 6);
        let home = grid
            .add_building(Cell::new(0, 0), BuildingKind::Home, None)
            .expect("in bounds");
        let job = grid
            .add_building(Cell::new(3, 0), BuildingKind::Job, Some(10))
            .expect("in bounds");

        let mut pop = Population::new();
        let fam = pop.add_family(home, None);
        pop.add_person(fam, 38, Role::EmployedAdult, Some(job), Some(ObligationWindow::new(36, 96)))
            .expect("family exists");
        pop.add_person(fam, 33, Role::UnemployedAdult, None, None).expect("family exists");

        let ctx = GenerationContext::new(TransportConfig::default(), ActivityPolicy::default(), 42)
            .expect("valid transport tables");
        let report = generate_all(&grid, &pop, &ctx);
        assert!(report.failures().is_empty());

        let mut writer = ItineraryWriter::new(Vec::new());
        write_report(&mut writer, &pop, &report).expect("write report");
        let text = String::from_utf8(writer.into_inner()).expect("utf8");

        let sections = text.lines().filter(|l| l.starts_with('#')).count();
        assert_eq!(sections, pop.person_count());
        // Sections appear in person-id order.
        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('#')).collect();
        assert_eq!(headers, vec![format!("#{}", job.0).as_str(), "#-1"]);
    }
}
