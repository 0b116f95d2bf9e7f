use approx::assert_relative_eq;
use history_chart::core::{
    Event, EventCategory, LocalizedText, PricePoint, PriceScale, PriceScaleMode, TimeScale,
    Viewport,
};
use history_chart::extensions::{
    MarkerAnchor, MarkerPlacementConfig, MarkerPlacementContext, bisection_neighbors,
    nearest_sample_index, place_event_markers, project_event_anchor,
};

fn three_point_series() -> Vec<PricePoint> {
    vec![
        PricePoint::new(0.0, 100.0),
        PricePoint::new(10.0, 200.0),
        PricePoint::new(20.0, 150.0),
    ]
}

#[test]
fn event_closer_to_later_sample_takes_its_value() {
    let anchor = project_event_anchor(&three_point_series(), 16.0);
    assert_eq!(anchor.price(), Some(150.0));
    assert_eq!(
        anchor,
        MarkerAnchor::Sample {
            index: 2,
            time: 20.0,
            price: 150.0
        }
    );
}

#[test]
fn event_closer_to_earlier_sample_takes_its_value() {
    assert_eq!(project_event_anchor(&three_point_series(), 13.0).price(), Some(200.0));
}

#[test]
fn exact_midpoint_resolves_to_earlier_sample() {
    assert_eq!(project_event_anchor(&three_point_series(), 15.0).price(), Some(200.0));
    assert_eq!(nearest_sample_index(&three_point_series(), 5.0), Some(0));
}

#[test]
fn exact_sample_date_returns_exact_value() {
    let points = three_point_series();
    for (index, point) in points.iter().enumerate() {
        assert_eq!(nearest_sample_index(&points, point.time), Some(index));
        assert_eq!(project_event_anchor(&points, point.time).price(), Some(point.price));
    }
}

#[test]
fn events_outside_series_snap_to_ends() {
    let points = three_point_series();
    assert_eq!(project_event_anchor(&points, -50.0).price(), Some(100.0));
    assert_eq!(project_event_anchor(&points, 500.0).price(), Some(150.0));
    assert_eq!(bisection_neighbors(&points, 500.0).as_slice(), &[2]);
}

#[test]
fn empty_series_yields_boundary_anchor() {
    assert_eq!(project_event_anchor(&[], 10.0), MarkerAnchor::Boundary);
    assert_eq!(MarkerAnchor::Boundary.price(), None);
}

#[test]
fn placed_markers_carry_emphasis_highlight_and_title() {
    let points = three_point_series();
    let events = vec![
        Event::new(
            10.0,
            EventCategory::Halving,
            LocalizedText::new().with("en", "Halving").with("es", "Halving ES"),
        ),
        Event::new(
            30.0,
            EventCategory::Market,
            LocalizedText::new().with("en", "Crash"),
        ),
    ];
    let mut time_scale = TimeScale::new(0.0, 40.0).expect("time scale");
    time_scale.set_focus_range(0.0, 20.0).expect("focus");
    let price_scale = PriceScale::new(0.0, 200.0, PriceScaleMode::Linear).expect("price scale");
    let viewport = Viewport::new(200, 100);

    let placed = place_event_markers(
        &events,
        &points,
        time_scale,
        price_scale,
        viewport,
        MarkerPlacementContext {
            language: "es",
            fallback_language: "en",
            emphasis: &[true, false],
            highlighted_time: Some(10.0),
        },
        MarkerPlacementConfig::default(),
    )
    .expect("placement");

    assert_eq!(placed.len(), 2);
    let first = &placed[0];
    assert_relative_eq!(first.x, 100.0);
    assert_relative_eq!(first.y, 0.0);
    assert!(first.emphasized && first.highlighted && first.in_view);
    assert_eq!(first.radius_px, 6.0);
    assert_eq!(first.title, "Halving ES");

    let second = &placed[1];
    assert!(!second.emphasized && !second.highlighted && !second.in_view);
    assert_eq!(second.radius_px, 0.0);
    assert_eq!(second.title, "Crash");
    assert_relative_eq!(second.y, 25.0);
}

#[test]
fn boundary_markers_sit_on_pane_bottom() {
    let events = vec![Event::new(
        5.0,
        EventCategory::Technology,
        LocalizedText::new(),
    )];
    let placed = place_event_markers(
        &events,
        &[],
        TimeScale::new(0.0, 10.0).expect("time scale"),
        PriceScale::new(1.0, 10.0, PriceScaleMode::Log).expect("price scale"),
        Viewport::new(100, 80),
        MarkerPlacementContext {
            language: "en",
            fallback_language: "en",
            emphasis: &[true],
            highlighted_time: None,
        },
        MarkerPlacementConfig::default(),
    )
    .expect("placement");
    assert_eq!(placed[0].anchor, MarkerAnchor::Boundary);
    assert_eq!(placed[0].y, 80.0);
    assert_eq!(placed[0].title, "");
}

#[test]
fn emphasis_length_must_match_events() {
    let events = vec![Event::new(5.0, EventCategory::Market, LocalizedText::new())];
    let result = place_event_markers(
        &events,
        &three_point_series(),
        TimeScale::new(0.0, 10.0).expect("time scale"),
        PriceScale::new(1.0, 10.0, PriceScaleMode::Log).expect("price scale"),
        Viewport::new(100, 80),
        MarkerPlacementContext {
            language: "en",
            fallback_language: "en",
            emphasis: &[],
            highlighted_time: None,
        },
        MarkerPlacementConfig::default(),
    );
    assert!(result.is_err());
}
