use crate::{
    consume_within, ContentExtent, OffsetTracker, PositionableSurface, RegionEvent,
    RegionEventSink, RegionKind, RegionNotifier, ScrollActivityState, ScrollRequest,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn jumps_land_exactly_on_the_bounds() {
    assert_eq!(ScrollRequest::JumpToEnd.resolve(30, 0, 100), 70);
    assert_eq!(ScrollRequest::JumpToStart.resolve(30, 0, 100), -30);
    assert_eq!(ScrollRequest::JumpToEnd.resolve(0, 0, 0), 0);
    assert_eq!(ScrollRequest::JumpToStart.resolve(0, -500, 0), -500);
}

#[test]
fn deltas_are_clamped_without_overflow() {
    assert_eq!(ScrollRequest::Delta(50).resolve(80, 0, 100), 20);
    assert_eq!(ScrollRequest::Delta(-50).resolve(10, 0, 100), -10);
    assert_eq!(ScrollRequest::Delta(i32::MAX).resolve(10, 0, 100), 90);
    assert_eq!(ScrollRequest::Delta(i32::MIN).resolve(10, 0, 100), -10);
    assert_eq!(consume_within(10, 150, 0, 100), 0);
    assert_eq!(consume_within(-10, 150, 0, 100), -10);
}

#[test]
fn out_of_range_positions_move_back_by_at_most_the_delta() {
    assert_eq!(consume_within(-3, 900, 0, 300), -3);
    assert_eq!(consume_within(-700, 900, 0, 300), -700);
    assert_eq!(consume_within(4, -50, 0, 300), 4);
    assert_eq!(consume_within(-4, -50, 0, 300), 0);
    assert_eq!(ScrollRequest::Delta(-3).resolve(300, 0, 100), -3);
    assert_eq!(ScrollRequest::Delta(5).resolve(300, 0, 100), 0);
}

#[test]
fn request_directions() {
    assert_eq!(ScrollRequest::from(-4).direction(), -1);
    assert_eq!(ScrollRequest::Delta(0).direction(), 0);
    assert_eq!(ScrollRequest::JumpToEnd.direction(), 1);
    assert!(ScrollRequest::JumpToStart.is_jump());
    assert!(!ScrollRequest::Delta(1).is_jump());
}

#[test]
fn unbounded_extent_falls_back_to_measured() {
    assert_eq!(ContentExtent::Finite(1200).or_measured(800), 1200);
    assert_eq!(ContentExtent::Unbounded.or_measured(800), 800);
    assert!(ContentExtent::Unbounded.is_unbounded());
}

struct Surface {
    translation: Cell<i32>,
    top: i32,
}

impl PositionableSurface for Surface {
    fn measured_height(&self) -> i32 {
        100
    }

    fn measured_width(&self) -> i32 {
        50
    }

    fn set_translation_y(&self, value: i32) {
        self.translation.set(value);
    }

    fn translation_y(&self) -> i32 {
        self.translation.get()
    }

    fn top_edge(&self) -> i32 {
        self.top
    }
}

#[test]
fn offset_tracker_moves_every_surface() {
    let upper = Rc::new(Surface {
        translation: Cell::new(0),
        top: 0,
    });
    let lower = Rc::new(Surface {
        translation: Cell::new(0),
        top: 100,
    });
    let tracker = OffsetTracker::with_surfaces([
        upper.clone() as Rc<dyn PositionableSurface>,
        lower.clone() as Rc<dyn PositionableSurface>,
    ]);

    assert!(tracker.set_offset(-40));
    assert!(!tracker.set_offset(-40));
    assert_eq!(upper.translation_y(), -40);
    assert_eq!(lower.bounds().y, 60.0);

    lower.translation.set(0);
    tracker.on_layout();
    assert_eq!(lower.translation_y(), -40);
    assert_eq!(tracker.layout_top(), 0);
}

#[derive(Default)]
struct Sink {
    events: RefCell<Vec<(RegionKind, RegionEvent)>>,
}

impl RegionEventSink for Sink {
    fn on_region_event(&self, region: RegionKind, event: RegionEvent) {
        self.events.borrow_mut().push((region, event));
    }
}

#[test]
fn notifier_delivers_tagged_events_until_sink_drops() {
    let sink = Rc::new(Sink::default());
    let weak = Rc::downgrade(&sink);
    let notifier = RegionNotifier::new(RegionKind::Bottom, weak);
    assert_eq!(notifier.region(), RegionKind::Bottom);

    notifier.scrolled(10, 90);
    notifier.state_changed(ScrollActivityState::Settling);
    assert_eq!(
        sink.events.borrow().as_slice(),
        &[
            (RegionKind::Bottom, RegionEvent::Scrolled { offset: 10, range: 90 }),
            (
                RegionKind::Bottom,
                RegionEvent::StateChanged(ScrollActivityState::Settling)
            ),
        ]
    );

    drop(sink);
    assert!(!notifier.is_connected());
    notifier.scrolled(0, 0);
}

#[cfg(feature = "serde")]
#[test]
fn delegate_snapshot_serializes_with_kind_tag() {
    use crate::RegionSnapshot;

    let snapshot = RegionSnapshot::Delegate {
        header_offset: -120,
        content: Some(Box::new(RegionSnapshot::List {
            position: 4,
            offset: 12,
        })),
    };
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["kind"], "delegate");
    assert_eq!(json["content"]["kind"], "list");
    let back: RegionSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}
