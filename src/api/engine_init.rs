use tracing::debug;

use crate::core::{Row, RowStore, TimeScale};
use crate::error::GanttResult;
use crate::interaction::InteractionState;

use super::validation::validate_engine_config;
use super::{GanttEngine, GanttEngineConfig, TimePositionMapper};

impl GanttEngine {
    /// Creates a fully initialized engine over `rows`.
    pub fn new(rows: Vec<Row>, config: GanttEngineConfig) -> GanttResult<Self> {
        validate_engine_config(&config)?;
        let scale = TimeScale::new(config.chart_start, config.chart_end, config.width_px)?;
        let rows = RowStore::new(rows)?;
        debug!(
            bars = rows.bar_count(),
            lanes = rows.lane_count(),
            "gantt engine initialized"
        );

        Ok(Self {
            rows,
            mapper: TimePositionMapper::new(scale, config.date_format.clone()),
            config,
            interaction: InteractionState::default(),
            plugins: Vec::new(),
        })
    }
}
