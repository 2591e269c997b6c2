use chrono::{NaiveDate, NaiveDateTime};
use gantt_rs::api::{GanttEngine, GanttEngineConfig, KeyboardOutcome, MoveRejection};
use gantt_rs::core::{Bar, BarId, BarInterval, Milestone, Row};
use gantt_rs::interaction::{KeyboardAction, KeyboardCommand, TimePrecision};

fn at(h: u32, m: u32) -> NaiveDateTime {
    at_s(h, m, 0)
}

fn at_s(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid time")
}

fn config() -> GanttEngineConfig {
    let end = NaiveDate::from_ymd_opt(2024, 6, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid time");
    GanttEngineConfig::new(at(0, 0), end, 1440.0)
}

fn bar(id: &str, start: (u32, u32), end: (u32, u32)) -> Bar {
    Bar::new(id, at(start.0, start.1), at(end.0, end.1)).expect("valid bar")
}

fn span(start: NaiveDateTime, end: NaiveDateTime) -> BarInterval {
    BarInterval::new(start, end).expect("valid interval")
}

fn id(value: &str) -> BarId {
    BarId::from(value)
}

fn press(engine: &mut GanttEngine, bar: &str, key: &str, shift: bool) -> KeyboardOutcome {
    let command = KeyboardCommand::from_key(key, shift).expect("arrow key");
    engine
        .apply_keyboard_command(&id(bar), command)
        .expect("known bar")
}

fn single_bar_engine(config: GanttEngineConfig) -> GanttEngine {
    GanttEngine::new(
        vec![Row::new("r1", vec![bar("a", (9, 0), (11, 0))])],
        config,
    )
    .expect("engine init")
}

#[test]
fn arrow_keys_move_by_one_precision_step() {
    let mut engine = single_bar_engine(config());

    assert_eq!(
        press(&mut engine, "a", "ArrowRight", false),
        KeyboardOutcome::Moved { affected: vec![] }
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(9, 5), at(11, 5))));

    press(&mut engine, "a", "ArrowLeft", true);
    assert_eq!(engine.interval(&id("a")), Some(span(at(8, 5), at(10, 5))));
}

#[test]
fn expand_and_shrink_change_each_side_by_half_a_step() {
    let mut engine = single_bar_engine(config());

    press(&mut engine, "a", "ArrowUp", false);
    assert_eq!(
        engine.interval(&id("a")),
        Some(span(at_s(8, 57, 30), at_s(11, 2, 30)))
    );

    press(&mut engine, "a", "ArrowDown", false);
    press(&mut engine, "a", "ArrowDown", false);
    assert_eq!(
        engine.interval(&id("a")),
        Some(span(at_s(9, 2, 30), at_s(10, 57, 30)))
    );
}

#[test]
fn shrink_keeps_at_least_one_step_of_duration() {
    let rows = vec![Row::new("r1", vec![bar("a", (9, 0), (9, 8))])];
    let mut engine = GanttEngine::new(rows, config()).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowDown", false),
        KeyboardOutcome::BelowMinimumDuration
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(9, 0), at(9, 8))));
}

#[test]
fn steps_leaving_the_chart_are_refused() {
    let rows = vec![Row::new("r1", vec![bar("a", (0, 0), (1, 0))])];
    let mut engine = GanttEngine::new(rows, config()).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowLeft", false),
        KeyboardOutcome::OutOfChartBounds
    );
    assert_eq!(
        press(&mut engine, "a", "ArrowUp", false),
        KeyboardOutcome::OutOfChartBounds
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(0, 0), at(1, 0))));
}

#[test]
fn coarser_precision_pushes_neighbours() {
    let rows = vec![Row::new(
        "r1",
        vec![bar("a", (9, 0), (11, 0)), bar("b", (11, 0), (13, 0))],
    )];
    let config = config()
        .with_precision(TimePrecision::Day)
        .with_push_on_overlap(true);
    let mut engine = GanttEngine::new(rows, config).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowRight", false),
        KeyboardOutcome::Moved { affected: vec![id("b")] }
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(11, 0), at(13, 0))));
    assert_eq!(engine.interval(&id("b")), Some(span(at(13, 0), at(15, 0))));
}

#[test]
fn no_overlap_snaps_a_keyboard_step_back() {
    let rows = vec![Row::new(
        "r1",
        vec![bar("a", (9, 0), (11, 0)), bar("b", (11, 2), (13, 0))],
    )];
    let mut engine = GanttEngine::new(rows, config().with_no_overlap(true)).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowRight", false),
        KeyboardOutcome::SnappedBack
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(9, 0), at(11, 0))));
}

#[test]
fn immobile_bar_ignores_keys() {
    let rows = vec![Row::new(
        "r1",
        vec![bar("a", (9, 0), (11, 0)).with_immobile(true)],
    )];
    let mut engine = GanttEngine::new(rows, config()).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowRight", false),
        KeyboardOutcome::Rejected(MoveRejection::ImmobileSource { bar_id: id("a") })
    );
}

#[test]
fn bundled_bars_step_together() {
    let rows = vec![
        Row::new("r1", vec![bar("a", (9, 0), (11, 0)).with_bundle("g")]),
        Row::new("r2", vec![bar("b", (12, 0), (13, 0)).with_bundle("g")]),
    ];
    let mut engine = GanttEngine::new(rows, config()).expect("engine init");

    let outcome = engine
        .apply_keyboard_command(&id("a"), KeyboardCommand::new(KeyboardAction::MoveRight, true))
        .expect("known bar");

    assert_eq!(outcome, KeyboardOutcome::Moved { affected: vec![id("b")] });
    assert_eq!(engine.interval(&id("a")), Some(span(at(10, 0), at(12, 0))));
    assert_eq!(engine.interval(&id("b")), Some(span(at(13, 0), at(14, 0))));
}

#[test]
fn non_arrow_keys_are_not_commands() {
    assert!(KeyboardCommand::from_key("Enter", false).is_none());
    assert_eq!(
        KeyboardCommand::from_key("ArrowUp", true),
        Some(KeyboardCommand::new(KeyboardAction::Expand, true))
    );
}

#[test]
fn bundle_step_that_pushes_a_member_off_the_chart_is_refused() {
    let rows = vec![
        Row::new("r1", vec![bar("a", (9, 0), (11, 0)).with_bundle("g")]),
        Row::new("r2", vec![bar("b", (23, 0), (23, 58)).with_bundle("g")]),
    ];
    let mut engine = GanttEngine::new(rows, config()).expect("engine init");

    assert_eq!(
        press(&mut engine, "a", "ArrowRight", true),
        KeyboardOutcome::OutOfChartBounds
    );
    assert_eq!(engine.interval(&id("a")), Some(span(at(9, 0), at(11, 0))));
    assert_eq!(engine.interval(&id("b")), Some(span(at(23, 0), at(23, 58))));
}

#[test]
fn bundle_step_past_a_member_milestone_is_rejected() {
    let rows = vec![
        Row::new("r1", vec![bar("a", (9, 0), (11, 0)).with_bundle("g")]),
        Row::new(
            "r2",
            vec![bar("b", (13, 0), (15, 0)).with_bundle("g").with_milestone("m")],
        ),
    ];
    let config = config().with_milestone(Milestone::new("m", at(15, 2)));
    let mut engine = GanttEngine::new(rows, config).expect("engine init");

    let outcome = press(&mut engine, "a", "ArrowRight", false);

    assert!(matches!(
        outcome,
        KeyboardOutcome::Rejected(MoveRejection::MilestoneExceeded { ref bar_id, .. })
            if *bar_id == id("b")
    ));
    assert_eq!(engine.interval(&id("a")), Some(span(at(9, 0), at(11, 0))));
    assert_eq!(engine.interval(&id("b")), Some(span(at(13, 0), at(15, 0))));
}
