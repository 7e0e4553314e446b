//! Plain-text itinerary serializer.
//!
//! The format downstream tooling consumes, one section per person:
//!
//! ```text
//! #17
//! 0 0 36 4
//! 0 0 96 17
//! ...
//! ```
//!
//! The header line carries the person's fixed obligation building id (`-1`
//! when they have none); each following line is one time slot as
//! `dayOfWeekStart dayOfWeekEnd endTick destinationBuildingId`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use at_model::{Person, Schedule};

use crate::row::slot_rows;
use crate::writer::ScheduleWriter;
use crate::OutputResult;

/// Streams itinerary sections to any `Write` sink.
pub struct ItineraryWriter<W: Write> {
    out: W,
    finished: bool,
}

impl ItineraryWriter<BufWriter<File>> {
    /// Create (or truncate) the itinerary file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ItineraryWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Consume the writer and hand back the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScheduleWriter for ItineraryWriter<W> {
    fn write_schedule(&mut self, person: &Person, schedule: &Schedule) -> OutputResult<()> {
        match person.fixed_building {
            Some(job) => writeln!(self.out, "#{}", job.0)?,
            None => writeln!(self.out, "#-1")?,
        }
        for row in slot_rows(person, schedule) {
            writeln!(
                self.out,
                "{} {} {} {}",
                row.day_start, row.day_end, row.end_tick, row.building
            )?;
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
