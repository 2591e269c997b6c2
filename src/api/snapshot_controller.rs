use indexmap::IndexMap;

use crate::core::BarInterval;
use crate::error::{GanttError, GanttResult};

use super::{BarSnapshot, EngineSnapshot, GanttEngine};

impl GanttEngine {
    /// Builds a deterministic snapshot of every bar position.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let scale = self.mapper.scale();
        let bars = self
            .rows
            .bars()
            .map(|bar| BarSnapshot {
                id: bar.id.clone(),
                lane: self.rows.lane_of(&bar.id).unwrap_or_default(),
                start: bar.interval.start(),
                end: bar.interval.end(),
                immobile: bar.immobile,
                bundle: bar.bundle.clone(),
            })
            .collect();

        EngineSnapshot {
            chart_start: scale.chart_start(),
            chart_end: scale.chart_end(),
            width_px: scale.width_px(),
            interaction_mode: self.interaction.mode(),
            bars,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Restores bar intervals recorded in `snapshot`.
    ///
    /// Bars missing from the snapshot keep their current interval.
    pub fn restore_snapshot(&mut self, snapshot: &EngineSnapshot) -> GanttResult<()> {
        let mut intervals = IndexMap::with_capacity(snapshot.bars.len());
        for bar in &snapshot.bars {
            intervals.insert(bar.id.clone(), BarInterval::new(bar.start, bar.end)?);
        }
        self.restore_intervals(&intervals)
    }
}
