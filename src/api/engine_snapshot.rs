use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::BarId;
use crate::interaction::InteractionMode;

/// Serializable bar position record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSnapshot {
    pub id: BarId,
    pub lane: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub immobile: bool,
    pub bundle: Option<String>,
}

/// Serializable deterministic state snapshot used by regression tests,
/// debugging tooling and host-side undo stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub chart_start: NaiveDateTime,
    pub chart_end: NaiveDateTime,
    pub width_px: f64,
    pub interaction_mode: InteractionMode,
    pub bars: Vec<BarSnapshot>,
}
