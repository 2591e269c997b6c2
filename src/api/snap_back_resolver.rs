use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::core::{BarId, BarInterval, PrimaryInterval};

use super::GanttEngine;

impl GanttEngine {
    /// Breadth-first walk over dependency edges starting at `seeds`.
    pub(super) fn connected_closure<'a>(
        &self,
        seeds: impl IntoIterator<Item = &'a BarId>,
    ) -> IndexSet<BarId> {
        let mut processed = IndexSet::new();
        let mut queue: VecDeque<BarId> = seeds.into_iter().cloned().collect();
        while let Some(id) = queue.pop_front() {
            if !processed.insert(id.clone()) {
                continue;
            }
            queue.extend(
                self.rows
                    .connected_bars(&id)
                    .into_iter()
                    .filter(|next| !processed.contains(next)),
            );
        }
        processed
    }

    /// Whether a finished gesture must be reverted.
    ///
    /// Only applies with `no_overlap`. Every touched bar and every bar
    /// reachable from one over dependency edges is re-checked for same-row
    /// overlaps.
    #[must_use]
    pub fn should_snap_back(&self, touched: &IndexMap<BarId, BarInterval>) -> bool {
        if !self.config.no_overlap || touched.is_empty() {
            return false;
        }
        let conflict = self
            .connected_closure(touched.keys())
            .into_iter()
            .find(|id| {
                !self
                    .rows
                    .find_overlapping_bars(id, &PrimaryInterval)
                    .is_empty()
            });
        if let Some(id) = &conflict {
            debug!(bar = %id, "overlap remains after gesture, snapping back");
        }
        conflict.is_some()
    }

    /// Reverts `touched` when [`Self::should_snap_back`] says so.
    pub(super) fn snap_back_if_needed(&mut self, touched: &IndexMap<BarId, BarInterval>) -> bool {
        if !self.should_snap_back(touched) {
            return false;
        }
        self.write_intervals(touched);
        true
    }
}
