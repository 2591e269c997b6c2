use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{BarId, BarInterval};
use crate::error::{GanttError, GanttResult};
use crate::extensions::GanttEvent;

use super::{GanttEngine, MoveOutcome, MovementEngine};

impl GanttEngine {
    /// Moves one bar and everything the configured push rules drag along.
    ///
    /// A rejected move leaves every bar untouched.
    pub fn move_bar(
        &mut self,
        bar_id: &BarId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> GanttResult<MoveOutcome> {
        let requested = BarInterval::new(start, end)?;
        self.move_bar_to(bar_id, requested)
    }

    pub fn move_bar_to(
        &mut self,
        bar_id: &BarId,
        requested: BarInterval,
    ) -> GanttResult<MoveOutcome> {
        let policy = self.config.movement_policy();
        MovementEngine::new(&mut self.rows, &self.config.milestones, policy)
            .move_bar_to(bar_id, requested)
    }

    /// Writes back previously captured intervals, e.g. a drag-end originals map.
    ///
    /// All ids are checked before anything is written.
    pub fn restore_intervals(
        &mut self,
        intervals: &IndexMap<BarId, BarInterval>,
    ) -> GanttResult<()> {
        if let Some(unknown) = intervals.keys().find(|id| !self.rows.contains(id)) {
            return Err(GanttError::UnknownBar(unknown.clone()));
        }
        self.write_intervals(intervals);
        self.emit_plugin_event(GanttEvent::IntervalsRestored {
            count: intervals.len(),
        });
        Ok(())
    }

    pub(super) fn write_intervals(&mut self, intervals: &IndexMap<BarId, BarInterval>) {
        for (id, interval) in intervals {
            if let Some(bar) = self.rows.bar_mut(id) {
                bar.interval = *interval;
            }
        }
        debug!(count = intervals.len(), "bar intervals restored");
    }
}
