pub mod plugins;

pub use plugins::{GanttEvent, GanttPlugin, PluginContext};
