use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::api::MoveRejection;
use crate::core::{BarId, BarInterval};
use crate::interaction::{DragMode, InteractionMode, KeyboardCommand};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub chart_start: NaiveDateTime,
    pub chart_end: NaiveDateTime,
    pub width_px: f64,
    pub bar_count: usize,
    pub lane_count: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GanttEvent {
    DragStarted {
        bar_id: BarId,
        mode: DragMode,
    },
    Dragged {
        bar_id: BarId,
        pointer_x: f64,
        affected: Vec<BarId>,
    },
    /// The engine rejected a drag step; the session ends right after.
    DragCancelled {
        bar_id: BarId,
        rejection: MoveRejection,
    },
    /// `originals` holds the pre-gesture interval of every bar the gesture
    /// touched, whether or not it was snapped back.
    DragEnded {
        bar_id: BarId,
        originals: IndexMap<BarId, BarInterval>,
        snapped_back: bool,
    },
    KeyboardMoved {
        bar_id: BarId,
        command: KeyboardCommand,
        originals: IndexMap<BarId, BarInterval>,
        snapped_back: bool,
    },
    KeyboardRejected {
        bar_id: BarId,
        command: KeyboardCommand,
    },
    IntervalsRestored {
        count: usize,
    },
    ChartSpanChanged {
        chart_start: NaiveDateTime,
        chart_end: NaiveDateTime,
        width_px: f64,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &GanttEvent, context: PluginContext);
}
