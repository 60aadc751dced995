//! The composite scroll coordinator.
//!
//! Three scroll domains make up the composite surface: the top region's
//! internal scroll, the seam (how far the top region has slid up out of view,
//! pulling the bottom region with it) and the bottom region's internal scroll.
//! A delta that moves content up drains them in that order; a delta that moves
//! content down drains them in reverse, so the seam only reopens once the
//! bottom region is back at its start.

use crate::config::ScrollConfig;
use crate::error::{CoordinatorError, Result};
use crate::fling::FlingAnimation;
use crate::listener::{Extent, ListenerId, ListenerRegistry, ScrollListener, ScrollMetrics};
use crate::smooth_scroll::SmoothScroll;
use crate::snapshot::ScrollSnapshot;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tandem_core::{PostedTaskId, RuntimeHandle};
use tandem_foundation::{
    clamp_consumed, consume_within, GestureAction, GestureTracker, NestedScrollConnection,
    NestedScrollDispatcher, NestedScrollOutcome, OffsetTracker, Orientation, PointerEvent,
    PointerEventKind, PositionableSurface, RegionEvent, RegionEventSink, RegionKind,
    RegionNotifier, ScrollActivityState, ScrollCapability, ScrollRequest, ScrollSource,
    TouchContext,
};

#[derive(Clone)]
struct RegionSlot {
    scroll: Rc<dyn ScrollCapability>,
    surface: Rc<dyn PositionableSurface>,
}

impl RegionSlot {
    fn extent(&self) -> Extent {
        Extent::new(self.scroll.current_scroll(), self.scroll.scroll_range())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Top,
    Seam,
    Bottom,
}

const UPWARD_ORDER: [Domain; 3] = [Domain::Top, Domain::Seam, Domain::Bottom];
const DOWNWARD_ORDER: [Domain; 3] = [Domain::Bottom, Domain::Seam, Domain::Top];

enum PendingEvent {
    /// Metrics are read when delivered; a region payload overrides that
    /// region's fresh values.
    Scroll(Option<(RegionKind, Extent)>),
    State {
        state: ScrollActivityState,
        from_seam: bool,
    },
}

struct CoordinatorInner {
    weak_self: Weak<CoordinatorInner>,
    runtime: RuntimeHandle,
    container: Rc<dyn PositionableSurface>,
    config: Cell<ScrollConfig>,
    top: RefCell<Option<RegionSlot>>,
    bottom: RefCell<Option<RegionSlot>>,
    seam: RefCell<OffsetTracker>,
    listeners: RefCell<ListenerRegistry>,
    state: Cell<ScrollActivityState>,
    gesture: RefCell<GestureTracker>,
    fling: FlingAnimation,
    smooth: SmoothScroll,
    outer: NestedScrollDispatcher,
    connection: Rc<SeamConnection>,
    pending_check: Cell<Option<PostedTaskId>>,
    // Nesting depth of coordinator operations; events flush when it drops to 0.
    depth: Cell<u32>,
    // Set while the coordinator itself calls into a region.
    driving: Cell<u32>,
    flushing: Cell<bool>,
    events: RefCell<VecDeque<PendingEvent>>,
}

/// Makes a top and a bottom region scroll as one surface.
///
/// Cloning is cheap and yields another handle to the same coordinator.
#[derive(Clone)]
pub struct CompositeScrollCoordinator {
    inner: Rc<CoordinatorInner>,
}

impl CompositeScrollCoordinator {
    /// Fails with [`CoordinatorError::InvalidConfig`] when `config` does not
    /// validate.
    pub fn new(
        runtime: RuntimeHandle,
        container: Rc<dyn PositionableSurface>,
        config: ScrollConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(runtime, container, config))
    }

    pub fn with_defaults(runtime: RuntimeHandle, container: Rc<dyn PositionableSurface>) -> Self {
        Self::build(runtime, container, ScrollConfig::default())
    }

    fn build(
        runtime: RuntimeHandle,
        container: Rc<dyn PositionableSurface>,
        config: ScrollConfig,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak_self: &Weak<CoordinatorInner>| CoordinatorInner {
            weak_self: weak_self.clone(),
            fling: FlingAnimation::new(runtime.clone(), config.fling),
            smooth: SmoothScroll::new(runtime.clone()),
            runtime,
            container,
            config: Cell::new(config),
            top: RefCell::new(None),
            bottom: RefCell::new(None),
            seam: RefCell::new(OffsetTracker::new()),
            listeners: RefCell::new(ListenerRegistry::default()),
            state: Cell::new(ScrollActivityState::Idle),
            gesture: RefCell::new(GestureTracker::new(config.gesture)),
            outer: NestedScrollDispatcher::new(),
            connection: Rc::new(SeamConnection {
                inner: weak_self.clone(),
            }),
            pending_check: Cell::new(None),
            depth: Cell::new(0),
            driving: Cell::new(0),
            flushing: Cell::new(false),
            events: RefCell::new(VecDeque::new()),
        });
        Self { inner }
    }

    pub fn config(&self) -> ScrollConfig {
        self.inner.config.get()
    }

    pub fn set_config(&self, config: ScrollConfig) -> Result<()> {
        config.validate()?;
        self.inner.config.set(config);
        self.inner.fling.set_config(config.fling);
        self.inner.gesture.borrow_mut().set_config(config.gesture);
        Ok(())
    }

    /// Installs the top region, replacing and detaching any previous one.
    pub fn set_top_region<R>(&self, region: Rc<R>) -> Result<()>
    where
        R: ScrollCapability + PositionableSurface + 'static,
    {
        self.inner.install(RegionKind::Top, region.clone(), region)
    }

    /// Installs the bottom region, replacing and detaching any previous one.
    /// The coordinator becomes the region's nested scroll parent.
    pub fn set_bottom_region<R>(&self, region: Rc<R>) -> Result<()>
    where
        R: ScrollCapability + PositionableSurface + 'static,
    {
        self.inner.install(RegionKind::Bottom, region.clone(), region)
    }

    pub fn has_regions(&self) -> bool {
        self.inner.top().is_some() && self.inner.bottom().is_some()
    }

    /// Registering the same listener twice returns the existing id.
    pub fn add_listener(&self, listener: Rc<dyn ScrollListener>) -> ListenerId {
        self.inner.listeners.borrow_mut().add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn set_keep_bottom_stable_on_check_layout(&self, keep: bool) {
        let mut config = self.inner.config.get();
        config.keep_bottom_stable_on_check_layout = keep;
        self.inner.config.set(config);
    }

    pub fn is_keep_bottom_stable_on_check_layout(&self) -> bool {
        self.inner.config.get().keep_bottom_stable_on_check_layout
    }

    /// How far the seam has collapsed, `0..=offset_range()`.
    pub fn offset_current(&self) -> i32 {
        self.inner.offset_current()
    }

    /// Recomputed from the current measurements on every call.
    pub fn offset_range(&self) -> i32 {
        self.inner.offset_range()
    }

    pub fn scroll_state(&self) -> ScrollActivityState {
        self.inner.state.get()
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.inner.metrics()
    }

    pub fn is_flinging(&self) -> bool {
        self.inner.fling.is_running()
    }

    /// Scrolls the composite surface by `dy` (positive moves content up).
    pub fn scroll_by(&self, dy: i32) -> NestedScrollOutcome {
        let inner = &self.inner;
        inner.batch(|| {
            inner
                .outer
                .dispatch_scroll(dy, ScrollSource::Programmatic, |available| {
                    inner.distribute(available)
                })
        })
    }

    /// Animates a scroll by `dy` over `duration_ms` (zero uses the configured
    /// default). Returns whether anything was scheduled.
    pub fn smooth_scroll_by(&self, dy: i32, duration_ms: u64) -> bool {
        self.inner.smooth_scroll_by(dy, duration_ms)
    }

    /// Starts a seam fling as if the drag band had been released at `velocity`.
    pub fn fling(&self, velocity: f32) -> bool {
        let inner = &self.inner;
        inner.batch(|| inner.start_fling(velocity))
    }

    pub fn stop_scroll(&self) {
        self.inner.stop_scroll();
    }

    pub fn scroll_to_top(&self) {
        self.inner.scroll_to_top();
    }

    pub fn scroll_to_bottom(&self) {
        self.inner.scroll_to_bottom();
    }

    /// Collapses the seam fully with the top region at its end and the bottom
    /// region at its start.
    pub fn scroll_bottom_to_top(&self) {
        self.inner.scroll_bottom_to_top();
    }

    pub fn save_scroll_info(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            seam_offset: self.inner.offset_current(),
            top: self.inner.top().and_then(|slot| slot.scroll.save()),
            bottom: self.inner.bottom().and_then(|slot| slot.scroll.save()),
        }
    }

    pub fn restore_scroll_info(&self, snapshot: &ScrollSnapshot) {
        self.inner.restore(snapshot);
    }

    /// Reconciles the seam and the regions after measurements changed.
    pub fn check_layout(&self) {
        self.inner.check_layout();
    }

    /// Schedules [`check_layout`](Self::check_layout) as a posted task,
    /// replacing one that is still pending.
    pub fn post_check_layout(&self) {
        self.inner.post_check_layout();
    }

    /// Call after every layout pass of the container.
    pub fn on_layout(&self) {
        self.inner.on_layout();
    }

    /// Feeds a pointer event to the drag band. A press anywhere stops all
    /// motion first. Returns whether the event was used.
    pub fn dispatch_touch_event(&self, event: &PointerEvent) -> bool {
        let action = self.inner.handle_touch(event);
        if action != GestureAction::Ignored {
            event.consume();
            return true;
        }
        false
    }

    /// Like [`dispatch_touch_event`](Self::dispatch_touch_event) but answers
    /// whether the coordinator wants to own the rest of the pointer stream.
    pub fn intercept_touch_event(&self, event: &PointerEvent) -> bool {
        let action = self.inner.handle_touch(event);
        action.claims_stream() || self.inner.gesture.borrow().is_dragging()
    }

    /// Ancestor that gets the pre/post phases of coordinator-driven deltas.
    pub fn set_outer_connection(&self, connection: Option<Rc<dyn NestedScrollConnection>>) {
        self.inner.outer.set_parent(connection);
    }

    /// The connection the bottom region reports its nested scrolls to.
    pub fn nested_connection(&self) -> Rc<dyn NestedScrollConnection> {
        self.inner.connection.clone()
    }
}

impl CoordinatorInner {
    fn top(&self) -> Option<RegionSlot> {
        self.top.borrow().clone()
    }

    fn bottom(&self) -> Option<RegionSlot> {
        self.bottom.borrow().clone()
    }

    fn slot(&self, kind: RegionKind) -> &RefCell<Option<RegionSlot>> {
        match kind {
            RegionKind::Top => &self.top,
            RegionKind::Bottom => &self.bottom,
        }
    }

    fn install(
        &self,
        kind: RegionKind,
        scroll: Rc<dyn ScrollCapability>,
        surface: Rc<dyn PositionableSurface>,
    ) -> Result<()> {
        if scroll.orientation() != Orientation::Vertical {
            return Err(CoordinatorError::UnsupportedOrientation { region: kind });
        }
        let other = match kind {
            RegionKind::Top => self.bottom(),
            RegionKind::Bottom => self.top(),
        };
        if other.is_some_and(|other| Rc::ptr_eq(&other.scroll, &scroll)) {
            return Err(CoordinatorError::DuplicateRegion);
        }

        let previous = self.slot(kind).borrow_mut().take();
        if let Some(previous) = previous {
            previous.scroll.set_notifier(None);
            previous.scroll.set_nested_parent(None);
            previous.surface.set_translation_y(0);
        }

        scroll.set_notifier(Some(RegionNotifier::new(kind, self.weak_self.clone())));
        if kind == RegionKind::Bottom {
            let connection: Rc<dyn NestedScrollConnection> = self.connection.clone();
            scroll.set_nested_parent(Some(connection));
        }
        *self.slot(kind).borrow_mut() = Some(RegionSlot { scroll, surface });
        log::debug!("{:?} region installed", kind);

        self.rebuild_seam();
        self.post_check_layout();
        Ok(())
    }

    fn rebuild_seam(&self) {
        let collapse = self.offset_current();
        let surfaces = [self.top(), self.bottom()]
            .into_iter()
            .flatten()
            .map(|slot| slot.surface);
        let tracker = OffsetTracker::with_surfaces(surfaces);
        tracker.set_offset(-collapse);
        *self.seam.borrow_mut() = tracker;
    }

    fn offset_current(&self) -> i32 {
        -self.seam.borrow().offset()
    }

    fn offset_range(&self) -> i32 {
        let (Some(top), Some(bottom)) = (self.top(), self.bottom()) else {
            return 0;
        };
        let effective_bottom = bottom
            .scroll
            .content_extent()
            .or_measured(bottom.surface.measured_height());
        let range = top.surface.measured_height() - (self.container.measured_height() - effective_bottom);
        // Everything fits: the seam cannot move.
        range.max(0)
    }

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            top: self.top().map(|slot| slot.extent()).unwrap_or_default(),
            seam: Extent::new(self.offset_current(), self.offset_range()),
            bottom: self.bottom().map(|slot| slot.extent()).unwrap_or_default(),
        }
    }

    // Event delivery.

    fn batch<R>(&self, op: impl FnOnce() -> R) -> R {
        self.depth.set(self.depth.get() + 1);
        let result = op();
        self.depth.set(self.depth.get() - 1);
        if self.depth.get() == 0 {
            self.flush();
        }
        result
    }

    fn queue(&self, event: PendingEvent) {
        let mut events = self.events.borrow_mut();
        if matches!(event, PendingEvent::Scroll(None))
            && matches!(events.back(), Some(PendingEvent::Scroll(None)))
        {
            return;
        }
        events.push_back(event);
    }

    fn flush(&self) {
        if self.flushing.replace(true) {
            // A listener re-entered; the outer loop delivers what it queued.
            return;
        }
        loop {
            let Some(event) = self.events.borrow_mut().pop_front() else {
                break;
            };
            let listeners = self.listeners.borrow().snapshot();
            match event {
                PendingEvent::Scroll(payload) => {
                    let mut metrics = self.metrics();
                    match payload {
                        Some((RegionKind::Top, extent)) => metrics.top = extent,
                        Some((RegionKind::Bottom, extent)) => metrics.bottom = extent,
                        None => {}
                    }
                    for listener in &listeners {
                        listener.on_scroll(metrics);
                    }
                }
                PendingEvent::State { state, from_seam } => {
                    for listener in &listeners {
                        listener.on_scroll_state_change(state, from_seam);
                    }
                }
            }
        }
        self.flushing.set(false);
    }

    fn set_state(&self, state: ScrollActivityState, from_seam: bool) {
        if self.state.replace(state) == state {
            return;
        }
        log::debug!("scroll state {:?} (from seam: {})", state, from_seam);
        self.queue(PendingEvent::State { state, from_seam });
    }

    fn own_motion_active(&self) -> bool {
        self.fling.is_running() || self.smooth.is_running() || self.gesture.borrow().is_dragging()
    }

    // Distribution.

    fn set_seam_collapse(&self, collapse: i32) {
        if self.seam.borrow().set_offset(-collapse) {
            self.queue(PendingEvent::Scroll(None));
        }
    }

    fn consume_seam(&self, delta: i32) -> i32 {
        let current = self.offset_current();
        let moved = consume_within(delta, current, 0, self.offset_range());
        if moved != 0 {
            self.set_seam_collapse(current + moved);
        }
        moved
    }

    /// Applies `request` to a region and measures what actually moved.
    fn consume_region(&self, slot: &RegionSlot, request: ScrollRequest) -> i32 {
        let before = slot.scroll.current_scroll();
        self.driving.set(self.driving.get() + 1);
        slot.scroll.consume(request);
        self.driving.set(self.driving.get() - 1);
        let moved = slot.scroll.current_scroll() - before;
        match request {
            ScrollRequest::Delta(delta) => clamp_consumed(delta, moved),
            ScrollRequest::JumpToStart | ScrollRequest::JumpToEnd => moved,
        }
    }

    fn consume_chain(&self, delta: i32, order: &[Domain]) -> i32 {
        let mut remaining = delta;
        for domain in order {
            if remaining == 0 {
                break;
            }
            let used = match domain {
                Domain::Top => self
                    .top()
                    .map_or(0, |slot| self.consume_region(&slot, ScrollRequest::Delta(remaining))),
                Domain::Seam => self.consume_seam(remaining),
                Domain::Bottom => self
                    .bottom()
                    .map_or(0, |slot| self.consume_region(&slot, ScrollRequest::Delta(remaining))),
            };
            debug_assert!(
                clamp_consumed(remaining, used) == used,
                "{:?} consumed {} of {}",
                domain,
                used,
                remaining
            );
            let used = clamp_consumed(remaining, used);
            log::trace!("{:?} consumed {} of {}", domain, used, remaining);
            remaining -= used;
        }
        delta - remaining
    }

    /// Local phase of a coordinator-originated delta.
    fn distribute(&self, delta: i32) -> i32 {
        match delta.signum() {
            1 => self.consume_chain(delta, &UPWARD_ORDER),
            -1 => self.consume_chain(delta, &DOWNWARD_ORDER),
            _ => 0,
        }
    }

    // Motion.

    fn step_closure(&self, source: ScrollSource) -> impl Fn(i32) -> i32 + 'static {
        let weak = self.weak_self.clone();
        move |delta| {
            let Some(inner) = weak.upgrade() else {
                return 0;
            };
            let outcome = inner.batch(|| {
                inner
                    .outer
                    .dispatch_scroll(delta, source, |available| inner.distribute(available))
            });
            outcome.consumed()
        }
    }

    fn settle_closure(&self) -> impl FnOnce(crate::MotionEnd) + 'static {
        let weak = self.weak_self.clone();
        move |end| {
            if let Some(inner) = weak.upgrade() {
                log::debug!("seam motion ended: {:?}", end);
                inner.batch(|| inner.set_state(ScrollActivityState::Idle, true));
            }
        }
    }

    fn has_any_region(&self) -> bool {
        self.top.borrow().is_some() || self.bottom.borrow().is_some()
    }

    fn start_fling(&self, velocity: f32) -> bool {
        self.smooth.cancel();
        if !self.has_any_region() {
            return false;
        }
        let velocity = self.outer.dispatch_pre_fling(velocity);
        let started = self.fling.start(
            velocity,
            self.step_closure(ScrollSource::Fling),
            self.settle_closure(),
        );
        if started {
            self.set_state(ScrollActivityState::Settling, true);
        } else {
            self.set_state(ScrollActivityState::Idle, true);
        }
        started
    }

    fn smooth_scroll_by(&self, dy: i32, duration_ms: u64) -> bool {
        if dy == 0 || !self.has_any_region() {
            return false;
        }
        self.batch(|| {
            self.fling.cancel();
            let spec = self.config.get().smooth_scroll_spec(duration_ms);
            let started = self.smooth.start(
                dy,
                spec,
                self.step_closure(ScrollSource::Programmatic),
                self.settle_closure(),
            );
            if started {
                self.set_state(ScrollActivityState::Settling, true);
            }
            started
        })
    }

    fn stop_scroll(&self) {
        self.batch(|| {
            let fling = self.fling.cancel();
            let smooth = self.smooth.cancel();
            if let Some(bottom) = self.bottom() {
                bottom.scroll.stop_motion();
            }
            if let Some(top) = self.top() {
                top.scroll.stop_motion();
            }
            if fling || smooth {
                self.set_state(ScrollActivityState::Idle, true);
            }
        });
    }

    // Jumps and layout.

    fn scroll_to_top(&self) {
        self.batch(|| {
            if let Some(bottom) = self.bottom() {
                self.consume_region(&bottom, ScrollRequest::JumpToStart);
            }
            if let Some(top) = self.top() {
                self.set_seam_collapse(0);
                self.consume_region(&top, ScrollRequest::JumpToStart);
            }
            self.queue(PendingEvent::Scroll(None));
        });
    }

    fn scroll_to_bottom(&self) {
        self.batch(|| {
            if let Some(top) = self.top() {
                self.consume_region(&top, ScrollRequest::JumpToEnd);
                if self.bottom().is_some() {
                    // Container height minus bottom extent minus top height,
                    // i.e. fully collapsed; zero when everything fits.
                    self.set_seam_collapse(self.offset_range());
                }
            }
            if let Some(bottom) = self.bottom() {
                self.consume_region(&bottom, ScrollRequest::JumpToEnd);
            }
            self.queue(PendingEvent::Scroll(None));
        });
    }

    fn scroll_bottom_to_top(&self) {
        self.batch(|| {
            if let Some(top) = self.top() {
                self.consume_region(&top, ScrollRequest::JumpToEnd);
            }
            if let Some(bottom) = self.bottom() {
                self.consume_region(&bottom, ScrollRequest::JumpToStart);
                self.set_seam_collapse(self.offset_range());
            }
            self.queue(PendingEvent::Scroll(None));
        });
    }

    fn restore(&self, snapshot: &ScrollSnapshot) {
        self.batch(|| {
            // Not clamped to the range: restores usually precede the layout
            // pass that makes the range meaningful. `on_layout` clamps.
            self.set_seam_collapse(snapshot.seam_offset.max(0));
            if let Some(top) = self.top() {
                top.scroll.restore(snapshot.top.as_ref());
            }
            if let Some(bottom) = self.bottom() {
                bottom.scroll.restore(snapshot.bottom.as_ref());
            }
            self.queue(PendingEvent::Scroll(None));
        });
    }

    fn clamp_seam(&self) {
        let range = self.offset_range();
        if self.offset_current() > range {
            log::debug!("seam clamped to range {}", range);
            self.set_seam_collapse(range);
        }
    }

    fn check_layout(&self) {
        self.batch(|| {
            let (Some(top), Some(bottom)) = (self.top(), self.bottom()) else {
                return;
            };
            self.clamp_seam();
            let top_current = top.scroll.current_scroll();
            let top_range = top.scroll.scroll_range();
            let offset_current = self.offset_current();
            let offset_range = self.offset_range();
            let keep_bottom = self.config.get().keep_bottom_stable_on_check_layout;

            if offset_current >= offset_range || (offset_current > 0 && keep_bottom) {
                self.consume_region(&top, ScrollRequest::JumpToEnd);
                return;
            }

            if bottom.scroll.current_scroll() > 0 {
                log::debug!("check layout: bottom region back to start");
                self.consume_region(&bottom, ScrollRequest::JumpToStart);
            }

            if top_current < top_range && offset_current > 0 {
                // Hand the seam collapse back to the top region's own scroll.
                let remain = top_range - top_current;
                log::debug!(
                    "check layout: moving {} of seam collapse into top region",
                    offset_current.min(remain)
                );
                if offset_current >= remain {
                    self.consume_region(&top, ScrollRequest::JumpToEnd);
                    self.set_seam_collapse(offset_current - remain);
                } else {
                    self.consume_region(&top, ScrollRequest::Delta(offset_current));
                    self.set_seam_collapse(0);
                }
            }
        });
    }

    fn post_check_layout(&self) {
        if let Some(pending) = self.pending_check.take() {
            self.runtime.cancel_posted(pending);
        }
        let weak = self.weak_self.clone();
        let id = self.runtime.post(move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending_check.set(None);
                inner.check_layout();
            }
        });
        self.pending_check.set(id);
    }

    fn on_layout(&self) {
        self.batch(|| {
            self.seam.borrow().on_layout();
            self.clamp_seam();
        });
        self.post_check_layout();
    }

    // Touch.

    fn handle_touch(&self, event: &PointerEvent) -> GestureAction {
        if event.kind == PointerEventKind::Down {
            self.stop_scroll();
        }
        let Some(top) = self.top() else {
            return GestureAction::Ignored;
        };
        let context = TouchContext {
            drag_band: top.surface.bounds(),
            child_scroll: self.bottom().map_or(0, |slot| slot.scroll.current_scroll()),
        };
        let action = self.gesture.borrow_mut().on_touch_event(event, &context);
        self.batch(|| match action {
            GestureAction::Drag(delta) => {
                self.set_state(ScrollActivityState::Dragging, true);
                self.outer
                    .dispatch_scroll(delta, ScrollSource::Drag, |available| {
                        self.distribute(available)
                    });
            }
            GestureAction::Released { velocity } => {
                if self.state.get() == ScrollActivityState::Dragging {
                    self.start_fling(velocity);
                }
            }
            GestureAction::Cancelled => self.set_state(ScrollActivityState::Idle, true),
            GestureAction::Ignored
            | GestureAction::Pressed
            | GestureAction::Grabbed
            | GestureAction::Tracking
            | GestureAction::Blocked => {}
        });
        action
    }
}

impl RegionEventSink for CoordinatorInner {
    fn on_region_event(&self, region: RegionKind, event: RegionEvent) {
        match event {
            RegionEvent::Scrolled { offset, range } => {
                if self.depth.get() > 0 {
                    self.queue(PendingEvent::Scroll(None));
                } else {
                    self.queue(PendingEvent::Scroll(Some((region, Extent::new(offset, range)))));
                    self.flush();
                }
            }
            RegionEvent::StateChanged(state) => {
                // Top region motion is driven by the seam; its own state is noise.
                if region == RegionKind::Top || self.own_motion_active() {
                    return;
                }
                self.batch(|| self.set_state(state, false));
            }
        }
    }
}

/// Nested scroll parent of the bottom region: upward deltas first go to the
/// top region and the seam, downward leftovers reopen the seam and then
/// scroll the top region back.
struct SeamConnection {
    inner: Weak<CoordinatorInner>,
}

impl SeamConnection {
    fn coordinator(&self) -> Option<Rc<CoordinatorInner>> {
        self.inner
            .upgrade()
            .filter(|inner| inner.driving.get() == 0)
    }
}

impl NestedScrollConnection for SeamConnection {
    fn on_pre_scroll(&self, available: i32, source: ScrollSource) -> i32 {
        let Some(inner) = self.coordinator() else {
            return 0;
        };
        inner.batch(|| {
            let outer = inner.outer.pre_scroll(available, source);
            let remaining = available - outer;
            let local = if remaining > 0 {
                inner.consume_chain(remaining, &[Domain::Top, Domain::Seam])
            } else {
                0
            };
            outer + local
        })
    }

    fn on_post_scroll(&self, consumed: i32, available: i32, source: ScrollSource) -> i32 {
        let Some(inner) = self.coordinator() else {
            return 0;
        };
        inner.batch(|| {
            let local = if available < 0 {
                inner.consume_chain(available, &[Domain::Seam, Domain::Top])
            } else {
                0
            };
            let outer = inner
                .outer
                .post_scroll(consumed + local, available - local, source);
            local + outer
        })
    }

    fn on_pre_fling(&self, velocity: f32) -> f32 {
        match self.coordinator() {
            Some(inner) => velocity - inner.outer.dispatch_pre_fling(velocity),
            None => 0.0,
        }
    }

    /// Velocity the bottom region could not use (it hit its start while
    /// flinging down) keeps going as a seam fling.
    fn on_post_fling(&self, consumed: f32, available: f32) -> f32 {
        let Some(inner) = self.coordinator() else {
            return 0.0;
        };
        if available < 0.0 && inner.batch(|| inner.start_fling(available)) {
            return available;
        }
        inner.outer.dispatch_post_fling(consumed, available)
    }
}
