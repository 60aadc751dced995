//! Contracts between the coordinator and the regions it coordinates.

use crate::{ContentExtent, NestedScrollConnection, RegionSnapshot, ScrollRequest};
use std::fmt;
use std::rc::{Rc, Weak};
use tandem_core::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollActivityState {
    #[default]
    Idle,
    /// Moving under a pointer.
    Dragging,
    /// Moving on its own after release or a programmatic request.
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
    Scrolled { offset: i32, range: i32 },
    StateChanged(ScrollActivityState),
}

/// Receiver of [`RegionEvent`]s, tagged with the region that produced them.
pub trait RegionEventSink {
    fn on_region_event(&self, region: RegionKind, event: RegionEvent);
}

/// Typed channel a region reports through. Holds the sink weakly so a region
/// never keeps its coordinator alive.
#[derive(Clone)]
pub struct RegionNotifier {
    region: RegionKind,
    sink: Weak<dyn RegionEventSink>,
}

impl RegionNotifier {
    pub fn new(region: RegionKind, sink: Weak<dyn RegionEventSink>) -> Self {
        Self { region, sink }
    }

    pub fn region(&self) -> RegionKind {
        self.region
    }

    pub fn emit(&self, event: RegionEvent) {
        if let Some(sink) = self.sink.upgrade() {
            sink.on_region_event(self.region, event);
        }
    }

    pub fn scrolled(&self, offset: i32, range: i32) {
        self.emit(RegionEvent::Scrolled { offset, range });
    }

    pub fn state_changed(&self, state: ScrollActivityState) {
        self.emit(RegionEvent::StateChanged(state));
    }

    pub fn is_connected(&self) -> bool {
        self.sink.strong_count() > 0
    }
}

impl fmt::Debug for RegionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionNotifier")
            .field("region", &self.region)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// What every scrollable region exposes to the coordinator.
///
/// All methods take `&self`; implementations keep their state in cells since
/// the coordinator, the region's own gesture handling and its animations all
/// hold shared references to it on the same thread.
pub trait ScrollCapability {
    /// Internal scroll position, `0..=scroll_range()`.
    fn current_scroll(&self) -> i32;

    fn scroll_range(&self) -> i32;

    fn content_extent(&self) -> ContentExtent;

    /// Applies `request` to the internal scroll position, clamped to the range.
    /// Jump requests land exactly on the range end and always notify.
    fn consume(&self, request: ScrollRequest);

    fn smooth_scroll_by(&self, delta: i32, duration_ms: u64);

    fn stop_motion(&self);

    /// `None` when the region has nothing meaningful to save.
    fn save(&self) -> Option<RegionSnapshot>;

    fn restore(&self, snapshot: Option<&RegionSnapshot>);

    fn set_notifier(&self, notifier: Option<RegionNotifier>);

    fn orientation(&self) -> Orientation {
        Orientation::Vertical
    }

    /// Installs the connection this region offers its pre/post scroll phases
    /// to. Regions without nested scrolling ignore it.
    fn set_nested_parent(&self, _parent: Option<Rc<dyn NestedScrollConnection>>) {}
}

/// The layout side of a region: something measured that can be slid vertically.
pub trait PositionableSurface {
    fn measured_height(&self) -> i32;

    fn measured_width(&self) -> i32;

    fn set_translation_y(&self, value: i32);

    fn translation_y(&self) -> i32;

    /// Laid-out top edge in container coordinates, without translation.
    fn top_edge(&self) -> i32;

    /// Current on-screen bounds, translation included.
    fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            (self.top_edge() + self.translation_y()) as f32,
            self.measured_width() as f32,
            self.measured_height() as f32,
        )
    }
}
