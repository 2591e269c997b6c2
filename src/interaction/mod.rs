use chrono::TimeDelta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{BarId, BarInterval};

pub const LEFT_HANDLE_CLASS: &str = "gantt-bar-handle-left";
pub const RIGHT_HANDLE_CLASS: &str = "gantt-bar-handle-right";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Move,
    ResizeLeft,
    ResizeRight,
}

impl DragMode {
    /// Picks the mode from the class list of the element under the pointer.
    ///
    /// Anything that is not a resize handle drags the whole bar.
    #[must_use]
    pub fn from_target_class(class_list: &str) -> Self {
        let mut classes = class_list.split_whitespace();
        if classes.clone().any(|class| class == LEFT_HANDLE_CLASS) {
            Self::ResizeLeft
        } else if classes.any(|class| class == RIGHT_HANDLE_CLASS) {
            Self::ResizeRight
        } else {
            Self::Move
        }
    }
}

/// Per-gesture drag state.
///
/// `originals` keeps the pre-gesture interval of every bar the gesture has
/// mutated so far, in first-touch order.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub(crate) bar_id: BarId,
    pub(crate) mode: DragMode,
    pub(crate) cursor_offset_px: f64,
    pub(crate) bar_width_px: f64,
    pub(crate) bundle: Option<String>,
    pub(crate) originals: IndexMap<BarId, BarInterval>,
}

impl DragSession {
    #[must_use]
    pub fn bar_id(&self) -> &BarId {
        &self.bar_id
    }

    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    #[must_use]
    pub fn cursor_offset_px(&self) -> f64 {
        self.cursor_offset_px
    }

    #[must_use]
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    #[must_use]
    pub fn originals(&self) -> &IndexMap<BarId, BarInterval> {
        &self.originals
    }

    pub(crate) fn record_original(&mut self, id: &BarId, interval: BarInterval) {
        if !self.originals.contains_key(id) {
            self.originals.insert(id.clone(), interval);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    drag: Option<DragSession>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub(crate) fn drag_session_mut(&mut self) -> Option<&mut DragSession> {
        self.drag.as_mut()
    }

    pub(crate) fn begin_drag(&mut self, session: DragSession) {
        self.drag = Some(session);
    }

    pub(crate) fn take_drag(&mut self) -> Option<DragSession> {
        self.drag.take()
    }
}

/// Keyboard step granularity of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePrecision {
    Hour,
    Day,
    Week,
    Month,
}

impl Default for TimePrecision {
    fn default() -> Self {
        Self::Hour
    }
}

impl TimePrecision {
    #[must_use]
    pub fn step_minutes(self) -> i64 {
        match self {
            Self::Hour => 5,
            Self::Day => 120,
            Self::Week => 840,
            Self::Month => 3600,
        }
    }

    /// Step for one key press; shift multiplies it by twelve.
    #[must_use]
    pub fn step(self, shift: bool) -> TimeDelta {
        let multiplier = if shift { 12 } else { 1 };
        TimeDelta::minutes(self.step_minutes() * multiplier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardAction {
    MoveLeft,
    MoveRight,
    Expand,
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardCommand {
    pub action: KeyboardAction,
    pub shift: bool,
}

impl KeyboardCommand {
    #[must_use]
    pub fn new(action: KeyboardAction, shift: bool) -> Self {
        Self { action, shift }
    }

    /// Maps DOM-style arrow key names; other keys are not bar commands.
    #[must_use]
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        let action = match key {
            "ArrowLeft" => KeyboardAction::MoveLeft,
            "ArrowRight" => KeyboardAction::MoveRight,
            "ArrowUp" => KeyboardAction::Expand,
            "ArrowDown" => KeyboardAction::Shrink,
            _ => return None,
        };
        Some(Self::new(action, shift))
    }
}
