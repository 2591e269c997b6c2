use crate::core::RowStore;
use crate::extensions::GanttPlugin;
use crate::interaction::InteractionState;

use super::{GanttEngineConfig, TimePositionMapper};

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` owns the row store and routes pointer and keyboard input
/// through the time/position mapper into the movement engine. It is the
/// only writer of bar intervals; hosts read rows back after each call.
pub struct GanttEngine {
    pub(super) rows: RowStore,
    pub(super) config: GanttEngineConfig,
    pub(super) mapper: TimePositionMapper,
    pub(super) interaction: InteractionState,
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
}

impl std::fmt::Debug for GanttEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plugin_ids: Vec<&str> = self.plugins.iter().map(|p| p.id()).collect();
        f.debug_struct("GanttEngine")
            .field("rows", &self.rows)
            .field("config", &self.config)
            .field("mapper", &self.mapper)
            .field("interaction", &self.interaction)
            .field("plugins", &plugin_ids)
            .finish()
    }
}
