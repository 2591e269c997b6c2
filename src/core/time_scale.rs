use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Visible chart span mapped onto a horizontal pixel width.
///
/// Pure math only; memoization lives in the engine's position cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    chart_start: NaiveDateTime,
    chart_end: NaiveDateTime,
    width_px: f64,
}

impl TimeScale {
    pub fn new(
        chart_start: NaiveDateTime,
        chart_end: NaiveDateTime,
        width_px: f64,
    ) -> GanttResult<Self> {
        if chart_start >= chart_end {
            return Err(GanttError::InvalidTimeRange {
                start: chart_start.to_string(),
                end: chart_end.to_string(),
            });
        }
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(GanttError::InvalidChartWidth { width: width_px });
        }

        Ok(Self {
            chart_start,
            chart_end,
            width_px,
        })
    }

    #[must_use]
    pub fn chart_start(self) -> NaiveDateTime {
        self.chart_start
    }

    #[must_use]
    pub fn chart_end(self) -> NaiveDateTime {
        self.chart_end
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.width_px
    }

    #[must_use]
    pub fn contains(self, time: NaiveDateTime) -> bool {
        time >= self.chart_start && time <= self.chart_end
    }

    /// `ceil((time - start) / (end - start) * width)`.
    ///
    /// Times outside the chart span map to negative or beyond-width offsets.
    #[must_use]
    pub fn time_to_pixel(self, time: NaiveDateTime) -> f64 {
        let elapsed_ms = (time - self.chart_start).num_milliseconds() as f64;
        let span_ms = self.span_millis() as f64;
        // Multiply before dividing so whole-pixel positions stay exact.
        (elapsed_ms * self.width_px / span_ms).ceil()
    }

    /// Inverse mapping, rounded to the nearest millisecond.
    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> NaiveDateTime {
        let span_ms = self.span_millis() as f64;
        let offset_ms = (pixel * span_ms / self.width_px).round();
        if !offset_ms.is_finite() {
            return self.chart_start;
        }
        let saturated = if offset_ms > 0.0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        };
        TimeDelta::try_milliseconds(offset_ms as i64)
            .and_then(|delta| self.chart_start.checked_add_signed(delta))
            .unwrap_or(saturated)
    }

    fn span_millis(self) -> i64 {
        (self.chart_end - self.chart_start).num_milliseconds()
    }
}
