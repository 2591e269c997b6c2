use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{DateFormat, Milestone};
use crate::error::{GanttError, GanttResult};
use crate::interaction::TimePrecision;

use super::MovementPolicy;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub chart_start: NaiveDateTime,
    pub chart_end: NaiveDateTime,
    pub width_px: f64,
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default)]
    pub precision: TimePrecision,
    #[serde(default = "default_push_on_overlap")]
    pub push_on_overlap: bool,
    #[serde(default = "default_push_on_connect")]
    pub push_on_connect: bool,
    /// Snap a finished gesture back when it leaves bars overlapping.
    #[serde(default)]
    pub no_overlap: bool,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl GanttEngineConfig {
    #[must_use]
    pub fn new(chart_start: NaiveDateTime, chart_end: NaiveDateTime, width_px: f64) -> Self {
        Self {
            chart_start,
            chart_end,
            width_px,
            date_format: DateFormat::default(),
            precision: TimePrecision::default(),
            push_on_overlap: default_push_on_overlap(),
            push_on_connect: default_push_on_connect(),
            no_overlap: false,
            milestones: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: TimePrecision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_push_on_overlap(mut self, enabled: bool) -> Self {
        self.push_on_overlap = enabled;
        self
    }

    #[must_use]
    pub fn with_push_on_connect(mut self, enabled: bool) -> Self {
        self.push_on_connect = enabled;
        self
    }

    #[must_use]
    pub fn with_no_overlap(mut self, enabled: bool) -> Self {
        self.no_overlap = enabled;
        self
    }

    #[must_use]
    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }

    #[must_use]
    pub fn movement_policy(&self) -> MovementPolicy {
        MovementPolicy {
            push_on_overlap: self.push_on_overlap,
            push_on_connect: self.push_on_connect,
        }
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_push_on_overlap() -> bool {
    MovementPolicy::default().push_on_overlap
}

fn default_push_on_connect() -> bool {
    MovementPolicy::default().push_on_connect
}
