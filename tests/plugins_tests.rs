use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{Bar, BarId, Row};
use gantt_rs::extensions::{GanttEvent, GanttPlugin, PluginContext};
use gantt_rs::interaction::{InteractionMode, KeyboardAction, KeyboardCommand};
use indexmap::IndexMap;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(GanttEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(GanttEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl GanttPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &GanttEvent, context: PluginContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &GanttEvent) -> &'static str {
    match event {
        GanttEvent::DragStarted { .. } => "drag_start",
        GanttEvent::Dragged { .. } => "drag",
        GanttEvent::DragCancelled { .. } => "drag_cancel",
        GanttEvent::DragEnded { .. } => "drag_end",
        GanttEvent::KeyboardMoved { .. } => "key",
        GanttEvent::KeyboardRejected { .. } => "key_rejected",
        GanttEvent::IntervalsRestored { .. } => "restored",
        GanttEvent::ChartSpanChanged { .. } => "span",
    }
}

fn at(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(h, 0, 0))
        .expect("valid time")
}

fn engine() -> GanttEngine {
    let end = NaiveDate::from_ymd_opt(2024, 6, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid time");
    let rows = vec![Row::new(
        "r1",
        vec![
            Bar::new("a", at(9), at(11)).expect("a"),
            Bar::new("b", at(11), at(13)).expect("b").with_immobile(true),
        ],
    )];
    let config = GanttEngineConfig::new(at(0), end, 1440.0).with_push_on_overlap(true);
    GanttEngine::new(rows, config).expect("engine init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.init_drag(&BarId::from("a"), 560.0, "").expect("init");
    engine.drag(500.0).expect("drag");
    engine.end_drag().expect("summary");
    engine
        .apply_keyboard_command(
            &BarId::from("a"),
            KeyboardCommand::new(KeyboardAction::MoveRight, true),
        )
        .expect("keyboard");
    engine.init_drag(&BarId::from("a"), 500.0, "").expect("init");
    engine.drag(600.0).expect("drag");
    engine.set_width_px(720.0).expect("resize");
    engine
        .apply_keyboard_command(
            &BarId::from("b"),
            KeyboardCommand::new(KeyboardAction::MoveLeft, false),
        )
        .expect("keyboard");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "drag_start",
            "drag",
            "drag_end",
            "key",
            "drag_start",
            "drag_cancel",
            "drag_end",
            "span",
            "key_rejected",
        ]
    );
}

#[test]
fn plugin_context_reflects_interaction_state() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.init_drag(&BarId::from("a"), 560.0, "").expect("init");
    engine.end_drag().expect("summary");

    let events = events.borrow();
    let (_, started) = &events[0];
    let (_, ended) = &events[1];
    assert_eq!(started.interaction_mode, InteractionMode::Dragging);
    assert_eq!(ended.interaction_mode, InteractionMode::Idle);
    assert_eq!(started.bar_count, 2);
    assert_eq!(started.lane_count, 1);
}

#[test]
fn drag_end_event_carries_originals_for_host_revert() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.init_drag(&BarId::from("a"), 560.0, "").expect("init");
    engine.drag(500.0).expect("drag");
    engine.end_drag().expect("summary");

    let originals: IndexMap<_, _> = match &events.borrow().last() {
        Some((GanttEvent::DragEnded { originals, .. }, _)) => originals.clone(),
        other => panic!("unexpected last event: {other:?}"),
    };
    engine.restore_intervals(&originals).expect("restore");
    assert_eq!(
        engine.interval(&BarId::from("a")).map(|i| (i.start(), i.end())),
        Some((at(9), at(11)))
    );
    assert!(matches!(
        events.borrow().last(),
        Some((GanttEvent::IntervalsRestored { count: 1 }, _))
    ));
}

#[test]
fn plugin_registry_rejects_duplicate_ids() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("p1", events.clone())))
        .expect("register first");

    let duplicate = engine.register_plugin(Box::new(RecordingPlugin::new("p1", events.clone())));
    assert!(duplicate.is_err());
    let empty = engine.register_plugin(Box::new(RecordingPlugin::new("", events)));
    assert!(empty.is_err());
    assert_eq!(engine.plugin_count(), 1);
}

#[test]
fn unregistered_plugin_stops_receiving_events() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    assert!(engine.has_plugin("recorder"));
    assert!(engine.unregister_plugin("recorder"));
    assert!(!engine.unregister_plugin("recorder"));

    engine.init_drag(&BarId::from("a"), 560.0, "").expect("init");
    engine.end_drag().expect("summary");
    assert!(events.borrow().is_empty());
}
