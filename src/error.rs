use thiserror::Error;

use crate::core::BarId;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid chart width: {width}")]
    InvalidChartWidth { width: f64 },

    #[error("invalid time range: start={start}, end={end}")]
    InvalidTimeRange { start: String, end: String },

    #[error("unknown bar id `{0}`")]
    UnknownBar(BarId),

    #[error("duplicate bar id `{0}`")]
    DuplicateBarId(BarId),

    #[error("bar `{from}` connects to unknown bar `{to}`")]
    DanglingConnection { from: BarId, to: BarId },

    #[error("cannot parse `{input}` with date format `{format}`")]
    DateParse { input: String, format: String },

    #[error("a drag session for bar `{0}` is already in progress")]
    DragInProgress(BarId),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
