use chrono::NaiveDateTime;
use indexmap::IndexSet;

use crate::core::{Bar, BarId, BarInterval, PrimaryInterval, Row, RowStore, TimeScale};
use crate::error::GanttResult;
use crate::extensions::GanttEvent;
use crate::interaction::{DragSession, InteractionMode};

use super::validation::validate_width;
use super::{GanttEngine, GanttEngineConfig, PositionCacheStats};

impl GanttEngine {
    #[must_use]
    pub fn config(&self) -> &GanttEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn row_store(&self) -> &RowStore {
        &self.rows
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.rows.rows()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows.into_rows()
    }

    #[must_use]
    pub fn bar(&self, id: &BarId) -> Option<&Bar> {
        self.rows.bar(id)
    }

    #[must_use]
    pub fn interval(&self, id: &BarId) -> Option<BarInterval> {
        self.rows.bar(id).map(|bar| bar.interval)
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.mapper.scale()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.interaction.drag_session()
    }

    /// Updates the visible chart span and width; position caches reset.
    pub fn set_chart_span(
        &mut self,
        chart_start: NaiveDateTime,
        chart_end: NaiveDateTime,
        width_px: f64,
    ) -> GanttResult<()> {
        validate_width(width_px)?;
        let scale = TimeScale::new(chart_start, chart_end, width_px)?;
        self.mapper.set_scale(scale);
        self.config.chart_start = chart_start;
        self.config.chart_end = chart_end;
        self.config.width_px = width_px;
        self.emit_plugin_event(GanttEvent::ChartSpanChanged {
            chart_start,
            chart_end,
            width_px,
        });
        Ok(())
    }

    /// Updates only the rendered width (for example after a container resize).
    pub fn set_width_px(&mut self, width_px: f64) -> GanttResult<()> {
        self.set_chart_span(self.config.chart_start, self.config.chart_end, width_px)
    }

    pub fn map_time_to_pixel(&mut self, time: NaiveDateTime) -> f64 {
        self.mapper.time_to_pixel(time)
    }

    pub fn map_pixel_to_time(&mut self, pixel: f64) -> NaiveDateTime {
        self.mapper.pixel_to_time(pixel)
    }

    pub fn map_pixel_to_time_label(&mut self, pixel: f64) -> String {
        self.mapper.pixel_to_time_label(pixel)
    }

    #[must_use]
    pub fn position_cache_stats(&self) -> PositionCacheStats {
        self.mapper.stats()
    }

    /// Same-row bars currently overlapping `id`.
    pub fn find_overlapping_bars(&self, id: &BarId) -> GanttResult<Vec<BarId>> {
        self.rows.require(id)?;
        Ok(self.rows.find_overlapping_bars(id, &PrimaryInterval))
    }

    /// Bars linked to `id` by a dependency edge in either direction.
    pub fn find_connected_bars(&self, id: &BarId) -> GanttResult<Vec<BarId>> {
        self.rows.require(id)?;
        Ok(self.rows.connected_bars(id))
    }

    /// Every bar reachable from `id` over dependency edges, `id` included.
    pub fn find_connected_closure(&self, id: &BarId) -> GanttResult<IndexSet<BarId>> {
        self.rows.require(id)?;
        Ok(self.connected_closure([id]))
    }

    #[must_use]
    pub fn bundle_members(&self, bundle: &str) -> Vec<BarId> {
        self.rows.bundle_members(bundle)
    }
}
