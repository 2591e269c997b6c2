use tracing::trace;

use crate::extensions::{GanttEvent, PluginContext};

use super::GanttEngine;

impl GanttEngine {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let scale = self.mapper.scale();
        PluginContext {
            chart_start: scale.chart_start(),
            chart_end: scale.chart_end(),
            width_px: scale.width_px(),
            bar_count: self.rows.bar_count(),
            lane_count: self.rows.lane_count(),
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: GanttEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(plugins = self.plugins.len(), ?event, "dispatching plugin event");
        for plugin in &mut self.plugins {
            plugin.on_event(&event, context);
        }
    }
}
