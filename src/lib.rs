//! gantt-rs: scheduling core for interactive Gantt charts.
//!
//! The crate maps chart time to pixels, turns pointer and keyboard gestures
//! into bar moves, and resolves each move against overlap, dependency,
//! immobility and milestone constraints atomically. Rendering stays with the
//! host application.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig};
pub use error::{GanttError, GanttResult};
