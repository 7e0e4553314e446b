//! The `ScheduleWriter` trait implemented by all serializers.

use at_engine::GenerationReport;
use at_model::{Person, Population, Schedule};

use crate::OutputResult;

/// Trait implemented by the itinerary-text and CSV serializers.
pub trait ScheduleWriter {
    /// Serialize one person's generated week.
    fn write_schedule(&mut self, person: &Person, schedule: &Schedule) -> OutputResult<()>;

    /// Flush any buffered output.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every successfully generated schedule in a report, in person-id
/// order, then finish the writer.  Failed persons are simply absent from the
/// output; the caller reports them from [`GenerationReport::failures`].
pub fn write_report<W: ScheduleWriter>(
    writer: &mut W,
    pop: &Population,
    report: &GenerationReport,
) -> OutputResult<()> {
    for person in pop.persons() {
        if let Some(schedule) = report.schedule(person.id) {
            writer.write_schedule(person, schedule)?;
        }
    }
    writer.finish()
}
