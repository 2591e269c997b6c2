use chrono::TimeDelta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BarId, BarInterval};
use crate::error::GanttResult;
use crate::extensions::GanttEvent;
use crate::interaction::{KeyboardAction, KeyboardCommand};

use super::{GanttEngine, MoveOutcome, MoveRejection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardOutcome {
    /// The step was applied; `affected` lists the other bars that moved.
    Moved { affected: Vec<BarId> },
    /// The step was applied, then reverted by the no-overlap policy.
    SnappedBack,
    /// The stepped interval would leave the chart span.
    OutOfChartBounds,
    /// Shrinking would leave less than one step of duration.
    BelowMinimumDuration,
    Rejected(MoveRejection),
}

impl GanttEngine {
    /// Moves or resizes the focused bar by one precision step.
    ///
    /// Moves shift the whole interval; resizes add or remove half a step on
    /// each side. Results outside the chart span are refused before the
    /// movement engine runs; for a bundle move that holds for every member.
    pub fn apply_keyboard_command(
        &mut self,
        bar_id: &BarId,
        command: KeyboardCommand,
    ) -> GanttResult<KeyboardOutcome> {
        let bar = self.rows.require(bar_id)?;
        let current = bar.interval;
        let bundle = bar.bundle.clone();
        if bar.immobile {
            return Ok(self.keyboard_rejected(
                bar_id,
                command,
                KeyboardOutcome::Rejected(MoveRejection::ImmobileSource {
                    bar_id: bar_id.clone(),
                }),
            ));
        }

        let step = self.config.precision.step(command.shift);
        let half = step / 2;
        let stepped = match command.action {
            KeyboardAction::MoveLeft => current.shifted(-step),
            KeyboardAction::MoveRight => current.shifted(step),
            KeyboardAction::Expand => widened(current, half),
            KeyboardAction::Shrink => {
                if current.duration() - step < step {
                    return Ok(self.keyboard_rejected(
                        bar_id,
                        command,
                        KeyboardOutcome::BelowMinimumDuration,
                    ));
                }
                widened(current, -half)
            }
        };

        let Some(requested) = stepped.filter(|interval| self.within_chart(*interval)) else {
            return Ok(self.keyboard_rejected(bar_id, command, KeyboardOutcome::OutOfChartBounds));
        };

        let is_move = matches!(
            command.action,
            KeyboardAction::MoveLeft | KeyboardAction::MoveRight
        );
        let applied = match bundle.filter(|_| is_move) {
            Some(bundle) => {
                if let Some(blocker) = self.bundle_blocker(&bundle) {
                    let rejection = MoveRejection::ImmobileBlocker {
                        source: bar_id.clone(),
                        blocker,
                    };
                    return Ok(self.keyboard_rejected(
                        bar_id,
                        command,
                        KeyboardOutcome::Rejected(rejection),
                    ));
                }
                let planned =
                    match self.plan_bundle_shift(&bundle, requested.start() - current.start()) {
                        Ok(planned) => planned,
                        Err(rejection) => {
                            return Ok(self.keyboard_rejected(
                                bar_id,
                                command,
                                KeyboardOutcome::Rejected(rejection),
                            ));
                        }
                    };
                if !planned.iter().all(|delta| self.within_chart(delta.to)) {
                    return Ok(self.keyboard_rejected(
                        bar_id,
                        command,
                        KeyboardOutcome::OutOfChartBounds,
                    ));
                }
                self.apply_bundle_shift(&planned);
                planned
            }
            None => match self.move_bar_to(bar_id, requested)? {
                MoveOutcome::Applied(report) => report.deltas,
                MoveOutcome::Rejected(rejection) => {
                    return Ok(self.keyboard_rejected(
                        bar_id,
                        command,
                        KeyboardOutcome::Rejected(rejection),
                    ));
                }
            },
        };

        let mut originals = IndexMap::new();
        for delta in &applied {
            originals.entry(delta.bar_id.clone()).or_insert(delta.from);
        }
        let snapped_back = self.snap_back_if_needed(&originals);
        let outcome = if snapped_back {
            KeyboardOutcome::SnappedBack
        } else {
            KeyboardOutcome::Moved {
                affected: originals.keys().filter(|id| *id != bar_id).cloned().collect(),
            }
        };
        debug!(bar = %bar_id, ?command, ?outcome, "keyboard step");
        self.emit_plugin_event(GanttEvent::KeyboardMoved {
            bar_id: bar_id.clone(),
            command,
            originals,
            snapped_back,
        });
        Ok(outcome)
    }

    fn within_chart(&self, interval: BarInterval) -> bool {
        interval.start() >= self.config.chart_start && interval.end() <= self.config.chart_end
    }

    fn keyboard_rejected(
        &mut self,
        bar_id: &BarId,
        command: KeyboardCommand,
        outcome: KeyboardOutcome,
    ) -> KeyboardOutcome {
        debug!(bar = %bar_id, ?command, ?outcome, "keyboard step refused");
        self.emit_plugin_event(GanttEvent::KeyboardRejected {
            bar_id: bar_id.clone(),
            command,
        });
        outcome
    }
}

/// Grows both sides by `half`, or shrinks them when `half` is negative.
fn widened(interval: BarInterval, half: TimeDelta) -> Option<BarInterval> {
    let start = interval.start().checked_sub_signed(half)?;
    let end = interval.end().checked_add_signed(half)?;
    BarInterval::new(start, end).ok()
}
