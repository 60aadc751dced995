mod common;

use common::Composite;
use tandem_foundation::{RegionSnapshot, ScrollActivityState, ScrollCapability};
use tandem_scroll::ScrollSnapshot;
use tandem_testing::touch;

fn send_all(composite: &Composite, events: &[tandem_foundation::PointerEvent]) {
    for event in events {
        composite.coordinator.dispatch_touch_event(event);
    }
}

#[test]
fn drag_in_top_band_scrolls_after_slop() {
    let composite = Composite::new();
    send_all(&composite, &touch::drag(1, 250.0, 150.0, 4, 0));

    assert_eq!(composite.positions(), (92, 0, 0));
    assert_eq!(
        composite.coordinator.scroll_state(),
        ScrollActivityState::Dragging
    );
    assert_eq!(
        composite.listener.states(),
        vec![(ScrollActivityState::Dragging, true)]
    );
}

#[test]
fn small_moves_stay_below_slop() {
    let composite = Composite::new();
    assert!(composite
        .coordinator
        .dispatch_touch_event(&touch::down(1, 200.0, 0)));
    composite
        .coordinator
        .dispatch_touch_event(&touch::move_to(1, 195.0, 8));
    assert_eq!(composite.positions(), (0, 0, 0));
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
}

#[test]
fn press_outside_top_band_is_ignored() {
    let composite = Composite::new();
    assert!(!composite
        .coordinator
        .dispatch_touch_event(&touch::down(1, 600.0, 0)));
    assert!(!composite
        .coordinator
        .dispatch_touch_event(&touch::move_to(1, 300.0, 8)));
    assert_eq!(composite.positions(), (0, 0, 0));
}

#[test]
fn release_after_a_pause_settles_without_fling() {
    let composite = Composite::new();
    send_all(&composite, &touch::drag(1, 250.0, 150.0, 4, 0));
    composite
        .coordinator
        .dispatch_touch_event(&touch::up(1, 150.0, 400));

    assert!(!composite.coordinator.is_flinging());
    assert!(!composite.rule.has_frame_callbacks());
    assert_eq!(
        composite.listener.states(),
        vec![
            (ScrollActivityState::Dragging, true),
            (ScrollActivityState::Idle, true)
        ]
    );
}

#[test]
fn quick_release_flings_through_all_domains() {
    let composite = Composite::new();
    send_all(&composite, &touch::drag(1, 280.0, 80.0, 5, 0));
    composite
        .coordinator
        .dispatch_touch_event(&touch::up(1, 40.0, 48));

    assert!(composite.coordinator.is_flinging());
    assert_eq!(
        composite.coordinator.scroll_state(),
        ScrollActivityState::Settling
    );
    let after_drag = composite.positions();
    composite.rule.pump_frames(600);

    let (top, seam, bottom) = composite.positions();
    assert!(top + seam + bottom > after_drag.0 + after_drag.1 + after_drag.2);
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
    assert_eq!(
        composite.listener.states(),
        vec![
            (ScrollActivityState::Dragging, true),
            (ScrollActivityState::Settling, true),
            (ScrollActivityState::Idle, true)
        ]
    );
    composite.assert_in_bounds();
}

#[test]
fn press_anywhere_stops_a_running_fling() {
    let composite = Composite::new();
    assert!(composite.coordinator.fling(4000.0));
    composite.rule.advance_frame();
    composite.rule.advance_frame();
    let stopped_at = composite.positions();

    composite
        .coordinator
        .dispatch_touch_event(&touch::down(7, 900.0, 0));
    assert!(!composite.coordinator.is_flinging());
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
    assert_eq!(composite.bottom.stop_count(), 1);

    composite.rule.pump_frames(10);
    assert_eq!(composite.positions(), stopped_at);
}

#[test]
fn zero_velocity_fling_never_runs() {
    let composite = Composite::new();
    assert!(!composite.coordinator.fling(0.0));
    assert!(!composite.rule.has_frame_callbacks());
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
    assert!(composite.listener.states().is_empty());
}

#[test]
fn fling_starting_again_replaces_the_first() {
    let composite = Composite::new();
    composite.coordinator.scroll_by(600);
    composite.coordinator.fling(3000.0);
    composite.rule.advance_frame();
    composite.coordinator.fling(-3000.0);
    composite.rule.pump_frames(600);

    assert_eq!(composite.positions(), (0, 0, 0));
    assert_eq!(
        composite.listener.states().last(),
        Some(&(ScrollActivityState::Idle, true))
    );
}

#[test]
fn downward_drag_is_blocked_while_bottom_is_scrolled() {
    let composite = Composite::new();
    composite.coordinator.restore_scroll_info(&ScrollSnapshot {
        seam_offset: 100,
        top: None,
        bottom: Some(RegionSnapshot::List {
            position: 2,
            offset: 0,
        }),
    });
    assert_eq!(composite.positions(), (0, 100, 200));

    // Band now spans y -100..200.
    send_all(&composite, &touch::drag(1, 100.0, 180.0, 4, 0));
    assert_eq!(composite.positions(), (0, 100, 200));
}

#[test]
fn secondary_pointer_can_grab_the_band() {
    let composite = Composite::new();
    assert!(!composite
        .coordinator
        .intercept_touch_event(&touch::down(1, 900.0, 0)));
    assert!(composite
        .coordinator
        .intercept_touch_event(&touch::pointer_down(&[(1, 900.0), (2, 100.0)], 10)));

    composite
        .coordinator
        .dispatch_touch_event(&touch::move_all(&[(1, 900.0), (2, 50.0)], 20));
    assert_eq!(composite.positions(), (42, 0, 0));
}

#[test]
fn secondary_pointer_is_ignored_when_primary_is_in_band() {
    let composite = Composite::new();
    composite
        .coordinator
        .dispatch_touch_event(&touch::down(1, 100.0, 0));
    assert!(!composite
        .coordinator
        .intercept_touch_event(&touch::pointer_down(&[(1, 100.0), (2, 150.0)], 10)));
}

#[test]
fn cancel_returns_to_idle_without_fling() {
    let composite = Composite::new();
    send_all(&composite, &touch::drag(1, 250.0, 100.0, 3, 0));
    composite
        .coordinator
        .dispatch_touch_event(&touch::cancel(1, 90.0, 30));
    assert!(!composite.coordinator.is_flinging());
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
}

#[test]
fn smooth_scroll_settles_on_exact_distance() {
    let composite = Composite::new();
    assert!(composite.coordinator.smooth_scroll_by(450, 0));
    assert_eq!(
        composite.coordinator.scroll_state(),
        ScrollActivityState::Settling
    );
    composite.rule.pump_frames(100);

    assert_eq!(composite.positions(), (300, 150, 0));
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
    assert!(!composite.coordinator.smooth_scroll_by(0, 100));
}

#[test]
fn stop_scroll_cancels_smooth_scroll() {
    let composite = Composite::new();
    composite.coordinator.smooth_scroll_by(-200, 300);
    composite.coordinator.smooth_scroll_by(600, 300);
    composite.rule.advance_frame();
    composite.rule.advance_frame();
    composite.coordinator.stop_scroll();

    let stopped_at = composite.positions();
    composite.rule.pump_frames(10);
    assert_eq!(composite.positions(), stopped_at);
    assert_eq!(composite.coordinator.scroll_state(), ScrollActivityState::Idle);
    assert_eq!(composite.top.stop_count(), 1);
}

#[test]
fn bottom_region_state_is_reported_when_coordinator_is_idle() {
    let composite = Composite::new();
    composite.bottom.report_state(ScrollActivityState::Settling);
    composite.top.report_state(ScrollActivityState::Dragging);
    assert_eq!(
        composite.listener.states(),
        vec![(ScrollActivityState::Settling, false)]
    );
    assert_eq!(
        composite.coordinator.scroll_state(),
        ScrollActivityState::Settling
    );
}

#[test]
fn bottom_region_state_is_ignored_during_seam_motion() {
    let composite = Composite::new();
    composite.coordinator.fling(2000.0);
    composite.bottom.report_state(ScrollActivityState::Idle);
    assert_eq!(
        composite.coordinator.scroll_state(),
        ScrollActivityState::Settling
    );
    assert_eq!(composite.bottom.current_scroll(), 0);
}
