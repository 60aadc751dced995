use super::*;
use std::rc::Rc;
use tandem_foundation::{
    ContentExtent, PositionableSurface, RegionEvent, RegionEventSink, RegionKind, RegionNotifier,
    RegionSnapshot, ScrollCapability, ScrollRequest,
};

#[derive(Default)]
struct Events(std::cell::RefCell<Vec<RegionEvent>>);

impl RegionEventSink for Events {
    fn on_region_event(&self, _region: RegionKind, event: RegionEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn list_range_and_extent_follow_items() {
    let short = FakeListRegion::uniform(3, 100, 500);
    assert_eq!(short.scroll_range(), 0);
    assert_eq!(short.content_extent(), ContentExtent::Finite(300));

    let long = FakeListRegion::uniform(10, 100, 500);
    assert_eq!(long.scroll_range(), 500);
    assert_eq!(long.content_extent(), ContentExtent::Unbounded);

    let pinned = FakeListRegion::uniform(10, 100, 500).with_extent(ContentExtent::Finite(1200));
    assert_eq!(pinned.content_extent(), ContentExtent::Finite(1200));
}

#[test]
fn list_clamps_and_notifies_jumps_even_without_movement() {
    let list = FakeListRegion::uniform(10, 100, 500);
    let sink = Rc::new(Events::default());
    let weak = Rc::downgrade(&sink);
    list.set_notifier(Some(RegionNotifier::new(RegionKind::Top, weak)));

    list.consume(ScrollRequest::Delta(-20));
    assert_eq!(list.current_scroll(), 0);
    assert!(sink.0.borrow().is_empty());

    list.consume(ScrollRequest::JumpToStart);
    list.consume(ScrollRequest::Delta(900));
    assert_eq!(list.current_scroll(), 500);
    assert_eq!(
        *sink.0.borrow(),
        vec![
            RegionEvent::Scrolled { offset: 0, range: 500 },
            RegionEvent::Scrolled { offset: 500, range: 500 },
        ]
    );
}

#[test]
fn list_snapshot_points_at_first_visible_item() {
    let list = FakeListRegion::uniform(10, 100, 500);
    list.consume(ScrollRequest::Delta(250));
    let snapshot = list.save();
    assert_eq!(
        snapshot,
        Some(RegionSnapshot::List {
            position: 2,
            offset: -50
        })
    );

    list.consume(ScrollRequest::JumpToStart);
    list.restore(snapshot.as_ref());
    assert_eq!(list.current_scroll(), 250);
    assert_eq!(FakeListRegion::empty(400).save(), None);
}

#[test]
fn list_ignores_foreign_snapshot() {
    let list = FakeListRegion::uniform(10, 100, 500);
    list.consume(ScrollRequest::Delta(120));
    list.restore(Some(&RegionSnapshot::Delegate {
        header_offset: 10,
        content: None,
    }));
    assert_eq!(list.current_scroll(), 120);
}

#[test]
fn surface_records_translation() {
    let surface = FakeSurface::new(320, 200).with_top_edge(40);
    surface.set_translation_y(-15);
    assert_eq!(surface.translation_y(), -15);
    assert_eq!(surface.bounds().y, 25.0);
}

#[test]
fn rule_steps_frames_with_a_steady_clock() {
    let rule = ScrollTestRule::new();
    let handle = rule.handle();
    let seen = Rc::new(std::cell::Cell::new(0u64));
    let seen_in_callback = Rc::clone(&seen);
    handle.register_frame_callback(move |nanos| seen_in_callback.set(nanos));

    assert_eq!(rule.pump_frames(4), 1);
    assert_eq!(seen.get(), tandem_core::FRAME_NANOS_60HZ);
    assert_eq!(rule.pump_frames(4), 0);
}

#[test]
fn drag_helper_ends_at_target() {
    let events = touch::drag(3, 400.0, 300.0, 4, 100);
    assert_eq!(events.len(), 5);
    let last = events.last().and_then(|event| event.primary().copied());
    assert_eq!(last.map(|sample| sample.position.y), Some(300.0));
    assert_eq!(events[4].time_ms, 132);
}
