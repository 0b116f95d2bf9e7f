use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use history_chart::ChartError;
use history_chart::api::{ChartCore, ChartCoreConfig};
use history_chart::core::{
    CategoryFilter, CycleKind, Event, EventCategory, LocalizedText, MarketCycle, PriceScaleMode,
    Viewport,
};
use history_chart::extensions::{ChartCommand, ChartObserver, CommandContext};
use history_chart::interaction::BrushState;
use history_chart::render::{FrameTransition, NullRenderer};

type CommandLog = Rc<RefCell<Vec<(ChartCommand, CommandContext)>>>;

struct RecordingObserver {
    id: String,
    log: CommandLog,
}

impl ChartObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_command(&mut self, command: &ChartCommand, context: &CommandContext) {
        self.log.borrow_mut().push((command.clone(), *context));
    }
}

fn recording(core: &mut ChartCore<NullRenderer>) -> CommandLog {
    let log = CommandLog::default();
    core.add_observer(Box::new(RecordingObserver {
        id: "recorder".to_owned(),
        log: Rc::clone(&log),
    }))
    .expect("register observer");
    log
}

fn raw_prices() -> Vec<(f64, f64)> {
    vec![
        (1_000.0, 10.0),
        (2_000.0, 20.0),
        (3_000.0, 40.0),
        (4_000.0, 80.0),
        (5_000.0, 160.0),
    ]
}

fn events() -> Vec<Event> {
    vec![
        Event::new(
            2_000.0,
            EventCategory::Technology,
            LocalizedText::new().with("en", "Upgrade").with("es", "Mejora"),
        ),
        Event::new(
            4_000.0,
            EventCategory::Halving,
            LocalizedText::new().with("en", "Halving"),
        ),
    ]
}

fn cycles() -> Vec<MarketCycle> {
    vec![
        MarketCycle::new(1_000.0, 3_000.0, CycleKind::Bull).expect("bull"),
        MarketCycle::new(4_500.0, 4_000.0, CycleKind::Bear).expect("bear"),
    ]
}

fn core() -> ChartCore<NullRenderer> {
    let mut core = ChartCore::initialize(
        NullRenderer::default(),
        ChartCoreConfig::default(),
        raw_prices(),
        events(),
        cycles(),
    )
    .expect("valid core");
    core.render().expect("first render");
    core
}

#[test]
fn initialize_derives_domains_and_state() {
    let core = core();
    assert_eq!(core.full_domain(), (920.0, 5_080.0));
    assert_eq!(core.focus_domain(), core.full_domain());
    assert_eq!(core.value_domain(), (0.008, 160.0));
    assert_eq!(core.scale_mode(), PriceScaleMode::Log);
    assert_eq!(core.active_filter(), CategoryFilter::All);
    assert_eq!(core.language(), "en");
    assert!(!core.is_padded());
    assert_eq!(core.renderer().frames_rendered, 1);
}

#[test]
fn initialize_rejects_empty_series_and_bad_viewports() {
    let err = ChartCore::initialize(
        NullRenderer::default(),
        ChartCoreConfig::default(),
        Vec::new(),
        events(),
        Vec::new(),
    )
    .err()
    .expect("empty series must fail");
    assert!(matches!(err, ChartError::EmptySeries));

    let config = ChartCoreConfig::default()
        .with_viewports(Viewport::new(0, 360), Viewport::new(840, 20));
    let err = ChartCore::initialize(NullRenderer::default(), config, raw_prices(), Vec::new(), Vec::new())
        .err()
        .expect("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 360 }));
}

#[test]
fn early_events_add_lead_in_and_legend() {
    let mut early = events();
    early.push(Event::new(0.0, EventCategory::Market, LocalizedText::new()));
    let mut core = ChartCore::initialize(
        NullRenderer::default(),
        ChartCoreConfig::default(),
        raw_prices(),
        early,
        Vec::new(),
    )
    .expect("valid core");
    core.render().expect("render");

    assert!(core.is_padded());
    let frame = core.last_frame().expect("frame");
    assert!(frame.show_fictitious_legend);
    assert_eq!(frame.fictitious_path.len(), 3);
    assert_eq!(frame.real_path.len(), 5);
    assert_eq!(frame.context_path.len(), 8);
}

#[test]
fn frame_contains_markers_cycles_and_paths() {
    let core = core();
    let frame = core.last_frame().expect("frame");

    assert_eq!(frame.transition, FrameTransition::Immediate);
    assert_eq!(frame.markers.len(), 2);
    assert_eq!(frame.markers[0].title, "Upgrade");
    assert_eq!(frame.markers[1].anchor.price(), Some(80.0));
    assert_eq!(frame.emphasized_marker_count(), 2);

    assert_eq!(frame.cycle_bands.len(), 2);
    assert_eq!(frame.cycle_bands[0].kind, CycleKind::Bull);
    assert_relative_eq!(frame.cycle_bands[0].x, 80.0 / 4_160.0 * 840.0);
    assert_relative_eq!(frame.cycle_bands[0].width, 2_000.0 / 4_160.0 * 840.0);
    assert_eq!(frame.cycle_bands[1].width, 0.0);

    assert_eq!(frame.real_path.len(), 5);
    assert!(frame.fictitious_path.is_empty());
    assert_eq!(frame.context_path.len(), 5);
    assert!(frame.value_ticks.contains(&1.0));
    assert_eq!(frame.brush_state, BrushState::Unselected);
}

#[test]
fn mode_toggle_animates_and_restores_domain() {
    let mut core = core();
    let log_domain = core.value_domain();
    let log_context = core.last_frame().expect("frame").context_path.clone();

    core.toggle_scale_mode().expect("to linear");
    assert_eq!(core.scale_mode(), PriceScaleMode::Linear);
    assert_eq!(core.value_domain(), (-20.0, 160.0));
    assert_eq!(
        core.renderer().last_transition,
        Some(FrameTransition::Animated { duration_ms: 750 })
    );
    assert_ne!(core.last_frame().expect("frame").context_path, log_context);

    core.set_scale_mode(PriceScaleMode::Log).expect("to log");
    assert_eq!(core.value_domain().0.to_bits(), log_domain.0.to_bits());
    assert_eq!(core.value_domain().1.to_bits(), log_domain.1.to_bits());
    assert_eq!(core.last_frame().expect("frame").context_path, log_context);
}

#[test]
fn setting_current_mode_is_a_no_op() {
    let mut core = core();
    core.set_scale_mode(PriceScaleMode::Log).expect("same mode");
    assert_eq!(core.renderer().frames_rendered, 1);
}

#[test]
fn mode_change_keeps_brush_window() {
    let mut core = core();
    core.on_brush(Some((210.0, 630.0))).expect("brush");
    let focus = core.focus_domain();
    core.toggle_scale_mode().expect("toggle");
    assert_eq!(core.focus_domain(), focus);
    assert_eq!(core.brush_state(), BrushState::Selected);
}

#[test]
fn filter_changes_emphasis_without_touching_zoom() {
    let mut core = core();
    core.on_brush(Some((210.0, 630.0))).expect("brush");
    let focus = core.focus_domain();

    core.set_filter(CategoryFilter::Only(EventCategory::Halving))
        .expect("filter");
    assert_eq!(core.emphasis(), vec![false, true]);
    assert_eq!(core.focus_domain(), focus);

    let frame = core.last_frame().expect("frame");
    assert_eq!(frame.transition, FrameTransition::Animated { duration_ms: 400 });
    assert_eq!(frame.markers[0].radius_px, 0.0);
    assert_eq!(frame.emphasized_marker_count(), 1);
}

#[test]
fn language_switch_re_resolves_titles_with_fallback() {
    let mut core = core();
    core.set_language("es").expect("language");
    let frame = core.last_frame().expect("frame");
    assert_eq!(frame.markers[0].title, "Mejora");
    assert_eq!(frame.markers[1].title, "Halving");
    assert_eq!(frame.transition, FrameTransition::Animated { duration_ms: 750 });
    assert!(core.set_language(" ").is_err());
}

#[test]
fn event_languages_follow_title_order() {
    let mut core = core();
    let languages: Vec<&str> = core.event_languages().into_iter().collect();
    assert_eq!(languages, vec!["en", "es"]);

    core.set_language("fr").expect("unknown language still switches");
    assert_eq!(core.language(), "fr");
    let frame = core.last_frame().expect("frame");
    assert_eq!(frame.markers[0].title, "Upgrade");
}

#[test]
fn observers_receive_commands_with_context() {
    let mut core = core();
    let log = recording(&mut core);

    core.on_brush(Some((210.0, 630.0))).expect("brush");
    core.set_filter(CategoryFilter::Only(EventCategory::Technology))
        .expect("filter");
    core.activate_event(1).expect("activate");
    core.reset_zoom().expect("reset");

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    match &log[0] {
        (
            ChartCommand::BrushChanged {
                state,
                focus_start,
                focus_end,
            },
            context,
        ) => {
            assert_eq!(*state, BrushState::Selected);
            assert_relative_eq!(*focus_start, 1_960.0);
            assert_relative_eq!(*focus_end, 4_040.0);
            assert_eq!(context.brush_state, BrushState::Selected);
            assert_eq!(context.visible_len, 5);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(
        log[1].0,
        ChartCommand::FilterChanged {
            filter: CategoryFilter::Only(EventCategory::Technology)
        }
    );
    assert_eq!(
        log[2].0,
        ChartCommand::EventActivated {
            index: 1,
            time: 4_000.0,
            category: EventCategory::Halving,
            title: "Halving".to_owned(),
        }
    );
    match &log[3].0 {
        ChartCommand::BrushChanged { state, .. } => assert_eq!(*state, BrushState::Unselected),
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(log[3].1.focus_domain, log[3].1.full_domain);
}

#[test]
fn observer_registry_rejects_duplicates() {
    let mut core = core();
    let _log = recording(&mut core);
    let duplicate = core.add_observer(Box::new(RecordingObserver {
        id: "recorder".to_owned(),
        log: CommandLog::default(),
    }));
    assert!(duplicate.is_err());
    assert_eq!(core.observer_count(), 1);
    assert!(core.remove_observer("recorder"));
    assert!(!core.remove_observer("recorder"));
}

#[test]
fn activating_unknown_event_fails() {
    let mut core = core();
    assert!(core.activate_event(7).is_err());
}

#[test]
fn highlight_marks_markers_on_that_date() {
    let mut core = core();
    core.highlight_event(4_000.0, true).expect("highlight");
    let frame = core.last_frame().expect("frame");
    assert!(!frame.markers[0].highlighted);
    assert!(frame.markers[1].highlighted);

    let rendered = core.renderer().frames_rendered;
    core.highlight_event(2_000.0, false).expect("stale unhighlight");
    assert_eq!(core.renderer().frames_rendered, rendered);
    assert_eq!(core.highlighted_time(), Some(4_000.0));

    core.highlight_event(4_000.0, false).expect("unhighlight");
    assert_eq!(core.highlighted_time(), None);
    assert!(
        core.last_frame()
            .expect("frame")
            .markers
            .iter()
            .all(|marker| !marker.highlighted)
    );
}

#[test]
fn pointer_snaps_to_nearest_visible_sample() {
    let mut core = core();
    let snap = core
        .pointer_move(218.0)
        .expect("pointer")
        .expect("snap over data");
    assert_eq!(snap.time, 2_000.0);
    assert_eq!(snap.price, 20.0);
    assert!(!snap.is_fictitious);
    assert_relative_eq!(snap.x, 1_080.0 / 4_160.0 * 840.0);
    assert_eq!(core.last_frame().expect("frame").hover, Some(snap));

    core.pointer_leave().expect("leave");
    assert_eq!(core.hover().snap(), None);
    assert_eq!(core.last_frame().expect("frame").hover, None);
}

#[test]
fn hover_snap_follows_brush_changes() {
    let mut core = core();
    core.pointer_move(0.0).expect("pointer");
    assert_eq!(core.hover().snap().map(|s| s.time), Some(1_000.0));

    let px = |t: f64| (t - 920.0) / 4_160.0 * 840.0;
    core.on_brush(Some((px(3_900.0), px(5_000.0)))).expect("brush");
    assert_eq!(core.hover().snap().map(|s| s.time), Some(4_000.0));
}

#[test]
fn config_round_trips_through_json() {
    let config = ChartCoreConfig::default()
        .with_initial_scale_mode(PriceScaleMode::Linear)
        .with_default_language("es");
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartCoreConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);

    let sparse = ChartCoreConfig::from_json_str(r#"{"default_language": "es"}"#).expect("sparse");
    assert_eq!(sparse.focus_viewport, Viewport::new(840, 360));
    assert_eq!(sparse.context_viewport, Viewport::new(840, 20));
    assert_eq!(sparse.transitions.mode_change_ms, 750);
    assert_eq!(sparse.brush_min_selection_px, 1.0);
}

#[test]
fn config_rejects_synthetic_floor_below_log_floor() {
    let result = ChartCoreConfig::from_json_str(r#"{"series": {"synthetic_floor": 0.001}}"#);
    assert!(result.is_err());
}
