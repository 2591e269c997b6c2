use crate::error::{GanttError, GanttResult};

use super::GanttEngineConfig;

pub(super) fn validate_engine_config(config: &GanttEngineConfig) -> GanttResult<()> {
    if config.chart_start >= config.chart_end {
        return Err(GanttError::InvalidTimeRange {
            start: config.chart_start.to_string(),
            end: config.chart_end.to_string(),
        });
    }
    validate_width(config.width_px)?;
    if !config.date_format.is_usable() {
        return Err(GanttError::InvalidData(format!(
            "date format `{}` cannot round-trip a timestamp",
            config.date_format.pattern()
        )));
    }
    if let Some(duplicate) = config
        .milestones
        .iter()
        .enumerate()
        .find(|(i, m)| config.milestones[..*i].iter().any(|other| other.id == m.id))
        .map(|(_, m)| m.id.as_str())
    {
        return Err(GanttError::InvalidData(format!(
            "milestone id `{duplicate}` is configured twice"
        )));
    }
    Ok(())
}

pub(super) fn validate_width(width_px: f64) -> GanttResult<()> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(GanttError::InvalidChartWidth { width: width_px });
    }
    Ok(())
}

pub(super) fn validate_pointer_x(pointer_x: f64) -> GanttResult<()> {
    if !pointer_x.is_finite() {
        return Err(GanttError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
