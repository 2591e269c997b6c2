pub mod accessor;
pub mod date_format;
pub mod graph;
pub mod rows;
pub mod time_scale;
pub mod types;

pub use accessor::{IntervalAccess, PrimaryInterval};
pub use date_format::{DEFAULT_DATE_FORMAT, DateFormat};
pub use rows::{LanePath, RowStore};
pub use time_scale::TimeScale;
pub use types::{Bar, BarId, BarInterval, Connection, ConnectionKind, Milestone, Row};
