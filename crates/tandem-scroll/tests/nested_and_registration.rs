mod common;

use common::{Composite, CONTAINER_HEIGHT};
use std::rc::Rc;
use tandem_foundation::{
    NestedScrollConnection, Orientation, PositionableSurface, RegionKind, ScrollActivityState,
    ScrollSource,
};
use tandem_scroll::{CompositeScrollCoordinator, CoordinatorError, FlingConfig, ScrollConfig};
use tandem_testing::{FakeListRegion, FakeSurface, ScrollTestRule};

#[test]
fn bottom_drag_collapses_top_and_seam_first() {
    let composite = Composite::new();

    let outcome = composite.bottom.drag(100);
    assert_eq!(outcome.pre_consumed, 100);
    assert_eq!(composite.positions(), (100, 0, 0));

    let outcome = composite.bottom.drag(700);
    assert_eq!(outcome.pre_consumed, 500);
    assert_eq!(outcome.local_consumed, 200);
    assert_eq!(composite.positions(), (300, 300, 200));
}

#[test]
fn bottom_drag_down_reopens_seam_after_its_own_scroll() {
    let composite = Composite::new();
    composite.coordinator.scroll_by(800);
    assert_eq!(composite.positions(), (300, 300, 200));

    let outcome = composite.bottom.drag(-350);
    assert_eq!(outcome.pre_consumed, 0);
    assert_eq!(outcome.local_consumed, -200);
    assert_eq!(outcome.post_consumed, -150);
    assert_eq!(composite.positions(), (300, 150, 0));

    let outcome = composite.bottom.drag(-1000);
    assert_eq!(outcome.post_consumed, -450);
    assert_eq!(composite.positions(), (0, 0, 0));
    assert_eq!(outcome.unconsumed(), -550);
}

#[test]
fn leftover_downward_fling_from_bottom_reopens_the_seam() {
    let composite = Composite::new();
    composite.coordinator.scroll_by(450);
    assert_eq!(composite.positions(), (300, 150, 0));

    assert_eq!(composite.bottom.release_velocity(-3000.0), -3000.0);
    assert!(composite.coordinator.is_flinging());
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Settling);

    composite.rule.pump_frames(600);
    assert!(!composite.coordinator.is_flinging());
    assert_eq!(composite.positions(), (0, 0, 0));
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
}

#[test]
fn leftover_upward_fling_from_bottom_is_not_taken() {
    let composite = Composite::new();
    assert_eq!(composite.bottom.release_velocity(3000.0), 0.0);
    assert!(!composite.coordinator.is_flinging());
}

#[test]
fn nested_drag_reports_one_scroll_per_phase_batch() {
    let composite = Composite::new();
    composite.bottom.drag(400);
    let scrolls = composite.listener.scrolls();
    assert!(!scrolls.is_empty());
    let last = scrolls[scrolls.len() - 1];
    assert_eq!(last.top.current, 300);
    assert_eq!(last.seam.current, 100);
}

#[test]
fn registration_wires_notifier_and_nested_parent() {
    let composite = Composite::new();
    assert!(composite.top.has_notifier());
    assert!(!composite.top.has_nested_parent());
    assert!(composite.bottom.has_notifier());
    assert!(composite.bottom.has_nested_parent());
    assert!(composite.coordinator.has_regions());
}

#[test]
fn replacing_a_region_detaches_the_old_one() {
    let composite = Composite::new();
    composite.coordinator.scroll_by(450);

    let replacement = Rc::new(FakeListRegion::uniform(30, 100, CONTAINER_HEIGHT).with_top_edge(300));
    composite
        .coordinator
        .set_bottom_region(replacement.clone())
        .expect("replacement installs");

    assert!(!composite.bottom.has_notifier());
    assert!(!composite.bottom.has_nested_parent());
    assert_eq!(composite.bottom.translation_y(), 0);
    assert!(replacement.has_nested_parent());
    assert_eq!(replacement.translation_y(), -150);
    assert_eq!(composite.coordinator.offset_current(), 150);
}

#[test]
fn horizontal_regions_are_rejected() {
    let rule = ScrollTestRule::new();
    let coordinator =
        CompositeScrollCoordinator::with_defaults(rule.handle(), Rc::new(FakeSurface::new(100, 800)));
    let sideways = Rc::new(FakeListRegion::uniform(5, 100, 300).with_orientation(Orientation::Horizontal));

    let error = coordinator.set_top_region(sideways.clone()).unwrap_err();
    assert_eq!(
        error,
        CoordinatorError::UnsupportedOrientation {
            region: RegionKind::Top
        }
    );
    assert!(!sideways.has_notifier());
}

#[test]
fn same_region_cannot_fill_both_slots() {
    let rule = ScrollTestRule::new();
    let coordinator =
        CompositeScrollCoordinator::with_defaults(rule.handle(), Rc::new(FakeSurface::new(100, 800)));
    let region = Rc::new(FakeListRegion::uniform(5, 100, 300));
    coordinator.set_top_region(region.clone()).expect("installs");
    assert_eq!(
        coordinator.set_bottom_region(region),
        Err(CoordinatorError::DuplicateRegion)
    );
}

#[test]
fn invalid_config_fails_construction() {
    let rule = ScrollTestRule::new();
    let config = ScrollConfig {
        fling: FlingConfig {
            friction: 0.0,
            ..FlingConfig::default()
        },
        ..ScrollConfig::default()
    };
    let result =
        CompositeScrollCoordinator::new(rule.handle(), Rc::new(FakeSurface::new(100, 800)), config);
    assert!(matches!(result, Err(CoordinatorError::InvalidConfig { .. })));
}

#[test]
fn set_config_swaps_gesture_slop() {
    let composite = Composite::new();
    let mut config = composite.coordinator.config();
    config.gesture = config.gesture.with_touch_slop(0);
    composite.coordinator.set_config(config).expect("valid");

    composite
        .coordinator
        .dispatch_touch_event(&tandem_testing::touch::down(1, 200.0, 0));
    composite
        .coordinator
        .dispatch_touch_event(&tandem_testing::touch::move_to(1, 190.0, 8));
    assert_eq!(composite.positions(), (10, 0, 0));

    config.gesture = config.gesture.with_touch_slop(-3);
    assert!(composite.coordinator.set_config(config).is_err());
    assert_eq!(composite.coordinator.config().gesture.touch_slop, 0);
}

#[test]
fn coordinator_dropping_leaves_regions_usable() {
    let composite = Composite::new();
    let Composite {
        coordinator,
        bottom,
        rule: _rule,
        ..
    } = composite;
    let connection = coordinator.nested_connection();
    drop(coordinator);

    assert_eq!(bottom.drag(200).local_consumed, 200);
    assert_eq!(connection.on_pre_scroll(50, ScrollSource::Drag), 0);
}
