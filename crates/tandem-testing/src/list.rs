use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tandem_foundation::{
    clamp_consumed, ContentExtent, NestedScrollConnection, NestedScrollDispatcher,
    NestedScrollOutcome, Orientation, PositionableSurface, RegionNotifier, RegionSnapshot,
    ScrollActivityState, ScrollCapability, ScrollRequest, ScrollSource,
};

/// A list region scrolling over fixed item heights inside a viewport.
///
/// Jump requests always notify; deltas notify when they move. Smooth scrolls
/// are recorded and applied at once.
pub struct FakeListRegion {
    item_heights: RefCell<Vec<i32>>,
    viewport: Cell<i32>,
    width: Cell<i32>,
    top_edge: Cell<i32>,
    translation: Cell<i32>,
    scroll: Cell<i32>,
    extent_override: Cell<Option<ContentExtent>>,
    orientation: Cell<Orientation>,
    notifier: RefCell<Option<RegionNotifier>>,
    dispatcher: NestedScrollDispatcher,
    requests: RefCell<Vec<ScrollRequest>>,
    smooth_scrolls: RefCell<Vec<(i32, u64)>>,
    stop_count: Cell<u32>,
}

impl FakeListRegion {
    pub fn new(item_heights: Vec<i32>, viewport: i32) -> Self {
        Self {
            item_heights: RefCell::new(item_heights),
            viewport: Cell::new(viewport),
            width: Cell::new(100),
            top_edge: Cell::new(0),
            translation: Cell::new(0),
            scroll: Cell::new(0),
            extent_override: Cell::new(None),
            orientation: Cell::new(Orientation::Vertical),
            notifier: RefCell::new(None),
            dispatcher: NestedScrollDispatcher::new(),
            requests: RefCell::new(Vec::new()),
            smooth_scrolls: RefCell::new(Vec::new()),
            stop_count: Cell::new(0),
        }
    }

    /// `count` items of `item_height` each.
    pub fn uniform(count: usize, item_height: i32, viewport: i32) -> Self {
        Self::new(vec![item_height; count], viewport)
    }

    /// A region with no items at all.
    pub fn empty(viewport: i32) -> Self {
        Self::new(Vec::new(), viewport)
    }

    pub fn with_top_edge(self, top_edge: i32) -> Self {
        self.top_edge.set(top_edge);
        self
    }

    /// Reports `extent` instead of the one derived from the items.
    pub fn with_extent(self, extent: ContentExtent) -> Self {
        self.extent_override.set(Some(extent));
        self
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        self.orientation.set(orientation);
        self
    }

    pub fn total_height(&self) -> i32 {
        self.item_heights.borrow().iter().sum()
    }

    pub fn set_item_heights(&self, item_heights: Vec<i32>) {
        *self.item_heights.borrow_mut() = item_heights;
    }

    pub fn set_viewport(&self, viewport: i32) {
        self.viewport.set(viewport);
    }

    pub fn set_top_edge(&self, top_edge: i32) {
        self.top_edge.set(top_edge);
    }

    /// Puts the scroll position anywhere, bypassing clamping and notification.
    pub fn set_scroll_unchecked(&self, scroll: i32) {
        self.scroll.set(scroll);
    }

    pub fn requests(&self) -> Vec<ScrollRequest> {
        self.requests.borrow().clone()
    }

    pub fn smooth_scrolls(&self) -> Vec<(i32, u64)> {
        self.smooth_scrolls.borrow().clone()
    }

    pub fn stop_count(&self) -> u32 {
        self.stop_count.get()
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.borrow().is_some()
    }

    pub fn has_nested_parent(&self) -> bool {
        self.dispatcher.has_parent()
    }

    /// A drag inside the list: parent pre-scroll, the list's own scroll, then
    /// parent post-scroll.
    pub fn drag(&self, delta: i32) -> NestedScrollOutcome {
        self.dispatcher
            .dispatch_scroll(delta, ScrollSource::Drag, |available| {
                let before = self.scroll.get();
                self.consume(ScrollRequest::Delta(available));
                clamp_consumed(available, self.scroll.get() - before)
            })
    }

    /// The list's own fling ended with `velocity` left over; offers it to the
    /// parent and returns what the parent took.
    pub fn release_velocity(&self, velocity: f32) -> f32 {
        self.dispatcher.dispatch_post_fling(0.0, velocity)
    }

    pub fn report_state(&self, state: ScrollActivityState) {
        let notifier = self.notifier.borrow().clone();
        if let Some(notifier) = notifier {
            notifier.state_changed(state);
        }
    }

    fn item_top(&self, position: usize) -> i32 {
        self.item_heights.borrow().iter().take(position).sum()
    }

    fn notify(&self) {
        let notifier = self.notifier.borrow().clone();
        if let Some(notifier) = notifier {
            notifier.scrolled(self.scroll.get(), self.scroll_range());
        }
    }
}

impl ScrollCapability for FakeListRegion {
    fn current_scroll(&self) -> i32 {
        self.scroll.get()
    }

    fn scroll_range(&self) -> i32 {
        (self.total_height() - self.viewport.get()).max(0)
    }

    fn content_extent(&self) -> ContentExtent {
        if let Some(extent) = self.extent_override.get() {
            return extent;
        }
        let total = self.total_height();
        if total > self.viewport.get() {
            ContentExtent::Unbounded
        } else {
            ContentExtent::Finite(total)
        }
    }

    fn consume(&self, request: ScrollRequest) {
        self.requests.borrow_mut().push(request);
        let current = self.scroll.get();
        let moved = request.resolve(current, 0, self.scroll_range());
        self.scroll.set(current + moved);
        if moved != 0 || request.is_jump() {
            self.notify();
        }
    }

    fn smooth_scroll_by(&self, delta: i32, duration_ms: u64) {
        self.smooth_scrolls.borrow_mut().push((delta, duration_ms));
        self.consume(ScrollRequest::Delta(delta));
    }

    fn stop_motion(&self) {
        self.stop_count.set(self.stop_count.get() + 1);
    }

    fn save(&self) -> Option<RegionSnapshot> {
        let heights = self.item_heights.borrow();
        if heights.is_empty() {
            return None;
        }
        let scroll = self.scroll.get();
        let mut top = 0;
        for (position, height) in heights.iter().enumerate() {
            if scroll < top + height || position + 1 == heights.len() {
                return Some(RegionSnapshot::List {
                    position,
                    offset: top - scroll,
                });
            }
            top += height;
        }
        None
    }

    fn restore(&self, snapshot: Option<&RegionSnapshot>) {
        match snapshot {
            Some(RegionSnapshot::List { position, offset }) => {
                let target = self.item_top(*position) - offset;
                self.scroll.set(target.clamp(0, self.scroll_range()));
                self.notify();
            }
            Some(other) => log::warn!("list region ignores a {} snapshot", other.kind_name()),
            None => {}
        }
    }

    fn set_notifier(&self, notifier: Option<RegionNotifier>) {
        *self.notifier.borrow_mut() = notifier;
    }

    fn orientation(&self) -> Orientation {
        self.orientation.get()
    }

    fn set_nested_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        self.dispatcher.set_parent(parent);
    }
}

impl PositionableSurface for FakeListRegion {
    fn measured_height(&self) -> i32 {
        self.viewport.get()
    }

    fn measured_width(&self) -> i32 {
        self.width.get()
    }

    fn set_translation_y(&self, value: i32) {
        self.translation.set(value);
    }

    fn translation_y(&self) -> i32 {
        self.translation.get()
    }

    fn top_edge(&self) -> i32 {
        self.top_edge.get()
    }
}
