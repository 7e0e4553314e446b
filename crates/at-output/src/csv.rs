//! CSV schedule serializer.
//!
//! One table holding every person's slots:
//! `person_id,role,day_start,day_end,end_tick,building_id,kind`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use at_model::{Person, Schedule};

use crate::row::slot_rows;
use crate::writer::ScheduleWriter;
use crate::OutputResult;

/// Writes all schedules into a single CSV file.
pub struct CsvScheduleWriter {
    out: Writer<File>,
    finished: bool,
}

impl CsvScheduleWriter {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record([
            "person_id", "role", "day_start", "day_end", "end_tick", "building_id", "kind",
        ])?;
        Ok(Self { out, finished: false })
    }
}

impl ScheduleWriter for CsvScheduleWriter {
    fn write_schedule(&mut self, person: &Person, schedule: &Schedule) -> OutputResult<()> {
        for row in slot_rows(person, schedule) {
            self.out.write_record(&[
                row.person.0.to_string(),
                schedule.role.as_str().to_string(),
                row.day_start.to_string(),
                row.day_end.to_string(),
                row.end_tick.to_string(),
                row.building.to_string(),
                row.kind.as_str().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
