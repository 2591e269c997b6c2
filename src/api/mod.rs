mod bundle_resolver;
mod drag_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod keyboard_controller;
mod movement;
mod movement_controller;
mod plugin_dispatch;
mod plugin_registry;
mod position_cache;
mod snap_back_resolver;
mod snapshot_controller;
mod validation;

pub use drag_controller::{DragStep, DragSummary};
pub use engine::GanttEngine;
pub use engine_config::GanttEngineConfig;
pub use engine_snapshot::{BarSnapshot, EngineSnapshot};
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
pub use keyboard_controller::KeyboardOutcome;
pub use movement::{
    AppliedDelta, MoveOutcome, MoveRejection, MoveReport, MovementEngine, MovementPolicy, Shift,
    ShiftDirection, calculate_movement,
};
pub use position_cache::{PositionCacheStats, TimePositionMapper};
