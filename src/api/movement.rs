//! Constraint-propagating bar movement.
//!
//! A top-level move tentatively applies the requested interval, then walks
//! every bar it impacts (same-row overlaps first, then dependency links)
//! depth-first. An immobile impacted bar fails the move outright; any other
//! is pushed by exactly the overlap it now has. The walk runs on an explicit
//! stack and records every applied change in a per-move transaction log; a
//! rejection anywhere replays that log in reverse so the row store ends up
//! exactly as it started.

use chrono::{NaiveDateTime, TimeDelta};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Bar, BarId, BarInterval, IntervalAccess, Milestone, PrimaryInterval, RowStore,
};
use crate::error::GanttResult;

/// Chart-level propagation switches.
///
/// Bars can additionally opt out individually through
/// `Bar::push_on_overlap` / `Bar::push_on_connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPolicy {
    pub push_on_overlap: bool,
    pub push_on_connect: bool,
}

impl Default for MovementPolicy {
    fn default() -> Self {
        Self {
            push_on_overlap: false,
            push_on_connect: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDirection {
    Left,
    Right,
}

/// Displacement needed to clear an overlap between two intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub direction: ShiftDirection,
    pub amount: TimeDelta,
}

impl Shift {
    #[must_use]
    pub fn delta(self) -> TimeDelta {
        match self.direction {
            ShiftDirection::Right => self.amount,
            ShiftDirection::Left => -self.amount,
        }
    }
}

/// Computes how far `target` must move so it no longer overlaps `source`.
///
/// Returns `None` when the intervals do not overlap (touching is fine).
/// The amount is exactly the overlap length, never more.
#[must_use]
pub fn calculate_movement(source: BarInterval, target: BarInterval) -> Option<Shift> {
    if !source.overlaps(target) {
        return None;
    }
    if source.start() < target.start() {
        Some(Shift {
            direction: ShiftDirection::Right,
            amount: source.end() - target.start(),
        })
    } else {
        Some(Shift {
            direction: ShiftDirection::Left,
            amount: target.end() - source.start(),
        })
    }
}

/// One interval change applied during a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDelta {
    pub bar_id: BarId,
    pub from: BarInterval,
    pub to: BarInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The directly requested bar is immobile.
    ImmobileSource { bar_id: BarId },
    /// Propagation would have to push an immobile bar.
    ImmobileBlocker { source: BarId, blocker: BarId },
    /// A bar's end would pass its milestone deadline.
    MilestoneExceeded {
        bar_id: BarId,
        milestone: String,
        deadline: NaiveDateTime,
    },
    /// Shifting the bar would leave the representable time range.
    OutOfRange { bar_id: BarId },
}

/// Rejects `end` when it passes the deadline of the milestone `bar` references.
///
/// Milestone ids missing from `milestones` impose no ceiling.
pub(super) fn check_milestone_ceiling(
    bar: &Bar,
    end: NaiveDateTime,
    milestones: &[Milestone],
) -> Result<(), MoveRejection> {
    let Some(milestone_id) = bar.milestone.as_deref() else {
        return Ok(());
    };
    let Some(milestone) = milestones.iter().find(|m| m.id == milestone_id) else {
        trace!(bar = %bar.id, milestone = milestone_id, "milestone not configured");
        return Ok(());
    };

    let deadline = milestone.deadline();
    if end > deadline {
        return Err(MoveRejection::MilestoneExceeded {
            bar_id: bar.id.clone(),
            milestone: milestone.id.clone(),
            deadline,
        });
    }
    Ok(())
}

/// Accepted move: the pushed bars and the full ordered change log.
///
/// `affected` excludes the directly moved bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub affected: Vec<BarId>,
    pub deltas: Vec<AppliedDelta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Applied(MoveReport),
    Rejected(MoveRejection),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Bars pushed by an accepted move; empty when rejected.
    #[must_use]
    pub fn affected_bars(&self) -> &[BarId] {
        match self {
            Self::Applied(report) => &report.affected,
            Self::Rejected(_) => &[],
        }
    }

    #[must_use]
    pub fn deltas(&self) -> &[AppliedDelta] {
        match self {
            Self::Applied(report) => &report.deltas,
            Self::Rejected(_) => &[],
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&MoveRejection> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// State owned by exactly one top-level move.
#[derive(Debug, Default)]
struct MoveTransaction {
    visited: IndexSet<BarId>,
    applied: Vec<AppliedDelta>,
}

impl MoveTransaction {
    fn into_report(self, root: &BarId) -> MoveReport {
        let affected = self
            .applied
            .iter()
            .filter(|delta| &delta.bar_id != root)
            .map(|delta| delta.bar_id.clone())
            .collect();
        MoveReport {
            affected,
            deltas: self.applied,
        }
    }
}

#[derive(Debug)]
struct Frame {
    source: BarId,
    impacted: Vec<BarId>,
    next: usize,
}

/// Resolves one requested move into a consistent set of interval changes.
pub struct MovementEngine<'a, A: IntervalAccess = PrimaryInterval> {
    rows: &'a mut RowStore,
    milestones: &'a [Milestone],
    policy: MovementPolicy,
    access: A,
}

impl<'a> MovementEngine<'a, PrimaryInterval> {
    #[must_use]
    pub fn new(rows: &'a mut RowStore, milestones: &'a [Milestone], policy: MovementPolicy) -> Self {
        Self::with_access(rows, milestones, policy, PrimaryInterval)
    }
}

impl<'a, A: IntervalAccess> MovementEngine<'a, A> {
    #[must_use]
    pub fn with_access(
        rows: &'a mut RowStore,
        milestones: &'a [Milestone],
        policy: MovementPolicy,
        access: A,
    ) -> Self {
        Self {
            rows,
            milestones,
            policy,
            access,
        }
    }

    /// Moves `bar_id` to `[start, end]` and everything it pushes, or nothing.
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
        let bar = self.rows.require(bar_id)?;
        if self.access.interval(bar) == requested {
            return Ok(MoveOutcome::Applied(MoveReport::default()));
        }
        if bar.immobile {
            debug!(bar = %bar_id, "rejecting direct move of immobile bar");
            return Ok(MoveOutcome::Rejected(MoveRejection::ImmobileSource {
                bar_id: bar_id.clone(),
            }));
        }

        let mut transaction = MoveTransaction::default();
        match self.propagate(&mut transaction, bar_id, requested) {
            Ok(()) => {
                let report = transaction.into_report(bar_id);
                debug!(
                    bar = %bar_id,
                    affected = report.affected.len(),
                    "bar move applied"
                );
                Ok(MoveOutcome::Applied(report))
            }
            Err(rejection) => {
                let reverted = transaction.applied.len();
                self.rollback(transaction);
                debug!(bar = %bar_id, reverted, ?rejection, "bar move rejected");
                Ok(MoveOutcome::Rejected(rejection))
            }
        }
    }

    fn propagate(
        &mut self,
        transaction: &mut MoveTransaction,
        root: &BarId,
        requested: BarInterval,
    ) -> Result<(), MoveRejection> {
        self.check_milestone(root, requested.end())?;

        let mut stack: Vec<Frame> = self.enter(transaction, root, requested).into_iter().collect();
        while let Some(frame) = stack.last_mut() {
            let Some(target) = frame.impacted.get(frame.next).cloned() else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let source = frame.source.clone();

            if self.rows.bar(&target).is_some_and(|bar| bar.immobile) {
                return Err(MoveRejection::ImmobileBlocker {
                    source,
                    blocker: target,
                });
            }
            let Some((current, delta)) = self.required_shift(&source, &target) else {
                continue;
            };
            let prospective = current
                .shifted(delta)
                .ok_or_else(|| MoveRejection::OutOfRange {
                    bar_id: target.clone(),
                })?;
            self.check_milestone(&target, prospective.end())?;
            trace!(
                source = %source,
                target = %target,
                delta_ms = delta.num_milliseconds(),
                "pushing impacted bar"
            );
            if let Some(next) = self.enter(transaction, &target, prospective) {
                stack.push(next);
            }
        }
        Ok(())
    }

    /// Applies `interval` to an unvisited bar and returns its frame.
    fn enter(
        &mut self,
        transaction: &mut MoveTransaction,
        bar_id: &BarId,
        interval: BarInterval,
    ) -> Option<Frame> {
        if !transaction.visited.insert(bar_id.clone()) {
            trace!(bar = %bar_id, "already processed in this move");
            return None;
        }
        let bar = self.rows.bar_mut(bar_id)?;
        let from = self.access.interval(bar);
        self.access.set_interval(bar, interval);
        transaction.applied.push(AppliedDelta {
            bar_id: bar_id.clone(),
            from,
            to: interval,
        });

        Some(Frame {
            source: bar_id.clone(),
            impacted: self.impacted_bars(bar_id),
            next: 0,
        })
    }

    /// Overlapping same-row bars first, then linked bars.
    fn impacted_bars(&self, bar_id: &BarId) -> Vec<BarId> {
        let Some(bar) = self.rows.bar(bar_id) else {
            return Vec::new();
        };

        let mut impacted = IndexSet::new();
        if self.policy.push_on_overlap && bar.push_on_overlap.unwrap_or(true) {
            impacted.extend(
                self.rows
                    .find_overlapping_bars(bar_id, &self.access)
                    .into_iter()
                    .filter(|id| self.accepts_push(id, |other| other.push_on_overlap)),
            );
        }
        if self.policy.push_on_connect && bar.push_on_connect.unwrap_or(true) {
            impacted.extend(
                self.rows
                    .connected_bars(bar_id)
                    .into_iter()
                    .filter(|id| self.accepts_push(id, |other| other.push_on_connect)),
            );
        }
        impacted.into_iter().collect()
    }

    fn accepts_push(&self, bar_id: &BarId, flag: impl Fn(&Bar) -> Option<bool>) -> bool {
        self.rows
            .bar(bar_id)
            .is_some_and(|bar| flag(bar).unwrap_or(true))
    }

    fn required_shift(&self, source: &BarId, target: &BarId) -> Option<(BarInterval, TimeDelta)> {
        let source_bar = self.rows.bar(source)?;
        let target_bar = self.rows.bar(target)?;
        let target_interval = self.access.interval(target_bar);
        let shift = calculate_movement(self.access.interval(source_bar), target_interval)?;
        Some((target_interval, shift.delta()))
    }

    fn check_milestone(&self, bar_id: &BarId, end: NaiveDateTime) -> Result<(), MoveRejection> {
        match self.rows.bar(bar_id) {
            Some(bar) => check_milestone_ceiling(bar, end, self.milestones),
            None => Ok(()),
        }
    }

    fn rollback(&mut self, transaction: MoveTransaction) {
        for delta in transaction.applied.into_iter().rev() {
            if let Some(bar) = self.rows.bar_mut(&delta.bar_id) {
                self.access.set_interval(bar, delta.from);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn interval(start_h: u32, end_h: u32) -> BarInterval {
        let at = |h: u32| {
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .and_then(|d| d.and_hms_opt(h, 0, 0))
                .expect("valid datetime")
        };
        BarInterval::new(at(start_h), at(end_h)).expect("interval")
    }

    #[test]
    fn shift_right_is_exact_overlap() {
        let shift = calculate_movement(interval(10, 12), interval(11, 13)).expect("overlap");
        assert_eq!(shift.direction, ShiftDirection::Right);
        assert_eq!(shift.amount, TimeDelta::hours(1));
    }

    #[test]
    fn shift_left_when_source_starts_later() {
        let shift = calculate_movement(interval(11, 14), interval(9, 12)).expect("overlap");
        assert_eq!(shift.direction, ShiftDirection::Left);
        assert_eq!(shift.delta(), TimeDelta::hours(-1));
    }

    #[test]
    fn touching_intervals_need_no_shift() {
        assert_eq!(calculate_movement(interval(9, 11), interval(11, 13)), None);
        assert_eq!(calculate_movement(interval(11, 13), interval(9, 11)), None);
    }
}
