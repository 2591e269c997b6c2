use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BarId, BarInterval};
use crate::error::{GanttError, GanttResult};
use crate::extensions::GanttEvent;
use crate::interaction::{DragMode, DragSession};

use super::validation::validate_pointer_x;
use super::{AppliedDelta, GanttEngine, MoveOutcome, MoveRejection};

/// Result of feeding one pointer position into an active drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragStep {
    /// No drag session is active.
    Inactive,
    /// A resize handle would cross the opposite edge; nothing changed.
    Ignored,
    /// The step was applied; `affected` lists the other bars that moved.
    Moved { affected: Vec<BarId> },
    /// The engine rejected the step and the session was ended.
    Cancelled {
        rejection: MoveRejection,
        summary: DragSummary,
    },
}

/// Final state of a gesture, also carried by `GanttEvent::DragEnded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSummary {
    pub bar_id: BarId,
    pub originals: IndexMap<BarId, BarInterval>,
    pub snapped_back: bool,
}

impl GanttEngine {
    /// Starts a gesture on `bar_id`.
    ///
    /// `target_class` is the class list of the element under the pointer and
    /// selects move vs. resize. Returns `Ok(false)` when the bar (or, for a
    /// move, any member of its bundle) is immobile.
    pub fn init_drag(
        &mut self,
        bar_id: &BarId,
        pointer_x: f64,
        target_class: &str,
    ) -> GanttResult<bool> {
        if let Some(active) = self.interaction.drag_session() {
            return Err(GanttError::DragInProgress(active.bar_id().clone()));
        }
        validate_pointer_x(pointer_x)?;

        let bar = self.rows.require(bar_id)?;
        if bar.immobile {
            debug!(bar = %bar_id, "immobile bar cannot be dragged");
            return Ok(false);
        }
        let mode = DragMode::from_target_class(target_class);
        let bundle = match mode {
            DragMode::Move => bar.bundle.clone(),
            DragMode::ResizeLeft | DragMode::ResizeRight => None,
        };
        let interval = bar.interval;
        if let Some(blocker) = bundle.as_deref().and_then(|b| self.bundle_blocker(b)) {
            debug!(bar = %bar_id, blocker = %blocker, "bundle holds an immobile bar");
            return Ok(false);
        }

        let left = self.mapper.time_to_pixel(interval.start());
        let right = self.mapper.time_to_pixel(interval.end());
        self.interaction.begin_drag(DragSession {
            bar_id: bar_id.clone(),
            mode,
            cursor_offset_px: pointer_x - left,
            bar_width_px: right - left,
            bundle,
            originals: IndexMap::new(),
        });
        debug!(bar = %bar_id, ?mode, "drag started");
        self.emit_plugin_event(GanttEvent::DragStarted {
            bar_id: bar_id.clone(),
            mode,
        });
        Ok(true)
    }

    /// Feeds a pointer position (chart-relative pixels) into the active drag.
    pub fn drag(&mut self, pointer_x: f64) -> GanttResult<DragStep> {
        validate_pointer_x(pointer_x)?;
        let Some(session) = self.interaction.drag_session() else {
            return Ok(DragStep::Inactive);
        };
        let bar_id = session.bar_id().clone();
        let mode = session.mode();
        let bundle = session.bundle.clone();
        let left_px = pointer_x - session.cursor_offset_px;
        let width_px = session.bar_width_px;

        let current = self.rows.require(&bar_id)?.interval;
        let requested = match mode {
            DragMode::Move => {
                let start = self.mapper.pixel_to_time(left_px);
                let end = self.mapper.pixel_to_time(left_px + width_px);
                BarInterval::new(start, end)?
            }
            DragMode::ResizeLeft => {
                let start = self.mapper.pixel_to_time(pointer_x);
                if start >= current.end() {
                    return Ok(DragStep::Ignored);
                }
                BarInterval::new(start, current.end())?
            }
            DragMode::ResizeRight => {
                let end = self.mapper.pixel_to_time(pointer_x);
                if end <= current.start() {
                    return Ok(DragStep::Ignored);
                }
                BarInterval::new(current.start(), end)?
            }
        };

        let resolved = match bundle {
            Some(bundle) => self.shift_bundle(&bundle, requested.start() - current.start()),
            None => match self.move_bar_to(&bar_id, requested)? {
                MoveOutcome::Applied(report) => Ok(report.deltas),
                MoveOutcome::Rejected(rejection) => Err(rejection),
            },
        };
        let applied = match resolved {
            Ok(applied) => applied,
            Err(rejection) => return self.cancel_drag(&bar_id, rejection),
        };

        let affected = self.record_drag_step(&bar_id, &applied);
        trace!(bar = %bar_id, pointer_x, affected = affected.len(), "drag step");
        self.emit_plugin_event(GanttEvent::Dragged {
            bar_id,
            pointer_x,
            affected: affected.clone(),
        });
        Ok(DragStep::Moved { affected })
    }

    /// Ends the active gesture, snapping back when `no_overlap` demands it.
    ///
    /// Returns `None` when no drag was active.
    pub fn end_drag(&mut self) -> Option<DragSummary> {
        self.finish_drag()
    }

    fn cancel_drag(&mut self, bar_id: &BarId, rejection: MoveRejection) -> GanttResult<DragStep> {
        debug!(bar = %bar_id, ?rejection, "drag step rejected, cancelling drag");
        self.emit_plugin_event(GanttEvent::DragCancelled {
            bar_id: bar_id.clone(),
            rejection: rejection.clone(),
        });
        let summary = self
            .finish_drag()
            .ok_or_else(|| GanttError::InvalidData("drag session vanished mid-step".to_owned()))?;
        Ok(DragStep::Cancelled { rejection, summary })
    }

    fn finish_drag(&mut self) -> Option<DragSummary> {
        let session = self.interaction.take_drag()?;
        let snapped_back = self.snap_back_if_needed(session.originals());
        let summary = DragSummary {
            bar_id: session.bar_id,
            originals: session.originals,
            snapped_back,
        };
        debug!(
            bar = %summary.bar_id,
            touched = summary.originals.len(),
            snapped_back,
            "drag ended"
        );
        self.emit_plugin_event(GanttEvent::DragEnded {
            bar_id: summary.bar_id.clone(),
            originals: summary.originals.clone(),
            snapped_back,
        });
        Some(summary)
    }

    fn record_drag_step(&mut self, bar_id: &BarId, applied: &[AppliedDelta]) -> Vec<BarId> {
        let Some(session) = self.interaction.drag_session_mut() else {
            return Vec::new();
        };
        for delta in applied {
            session.record_original(&delta.bar_id, delta.from);
        }
        applied
            .iter()
            .filter(|delta| &delta.bar_id != bar_id)
            .map(|delta| delta.bar_id.clone())
            .collect()
    }
}
