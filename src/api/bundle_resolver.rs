use chrono::TimeDelta;
use tracing::trace;

use crate::core::BarId;

use super::movement::check_milestone_ceiling;
use super::{AppliedDelta, GanttEngine, MoveRejection};

impl GanttEngine {
    /// First immobile member of `bundle`, if any. Such a bundle cannot move.
    pub(super) fn bundle_blocker(&self, bundle: &str) -> Option<BarId> {
        self.rows
            .bundle_members(bundle)
            .into_iter()
            .find(|id| self.rows.bar(id).is_some_and(|bar| bar.immobile))
    }

    /// Shifts every member of `bundle` by the same `delta`.
    ///
    /// Members are not solved against each other or against third parties.
    /// Nothing is written unless every member passes its milestone.
    pub(super) fn shift_bundle(
        &mut self,
        bundle: &str,
        delta: TimeDelta,
    ) -> Result<Vec<AppliedDelta>, MoveRejection> {
        let planned = self.plan_bundle_shift(bundle, delta)?;
        self.apply_bundle_shift(&planned);
        trace!(
            bundle,
            members = planned.len(),
            delta_ms = delta.num_milliseconds(),
            "bundle shifted"
        );
        Ok(planned)
    }

    /// Computes every member's shifted interval without touching the rows.
    pub(super) fn plan_bundle_shift(
        &self,
        bundle: &str,
        delta: TimeDelta,
    ) -> Result<Vec<AppliedDelta>, MoveRejection> {
        if delta.is_zero() {
            return Ok(Vec::new());
        }
        let mut planned = Vec::new();
        for id in self.rows.bundle_members(bundle) {
            let Some(bar) = self.rows.bar(&id) else {
                continue;
            };
            let from = bar.interval;
            let to = from
                .shifted(delta)
                .ok_or_else(|| MoveRejection::OutOfRange { bar_id: id.clone() })?;
            check_milestone_ceiling(bar, to.end(), &self.config.milestones)?;
            planned.push(AppliedDelta {
                bar_id: id,
                from,
                to,
            });
        }
        Ok(planned)
    }

    pub(super) fn apply_bundle_shift(&mut self, planned: &[AppliedDelta]) {
        for delta in planned {
            if let Some(bar) = self.rows.bar_mut(&delta.bar_id) {
                bar.interval = delta.to;
            }
        }
    }
}
