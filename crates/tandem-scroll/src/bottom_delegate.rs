//! A bottom region made of a header stacked above a scrollable content region.
//!
//! The header collapses before the content scrolls and reopens only once the
//! content is back at its start. The delegate is itself a
//! [`ScrollCapability`], so the coordinator treats it like any other bottom
//! region, and it sits between the coordinator and its content in the nested
//! scroll chain.

use crate::config::ScrollConfig;
use crate::error::{CoordinatorError, Result};
use crate::fling::FlingAnimation;
use crate::motion::MotionEnd;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tandem_core::{PostedTaskId, RuntimeHandle};
use tandem_foundation::{
    clamp_consumed, ContentExtent, GestureAction, GestureTracker, NestedScrollConnection,
    NestedScrollDispatcher, OffsetTracker, Orientation, PointerEvent, PointerEventKind,
    PositionableSurface, RegionEvent, RegionEventSink, RegionKind, RegionNotifier,
    RegionSnapshot, ScrollActivityState, ScrollCapability, ScrollRequest, ScrollSource,
    TouchContext,
};

/// Spacing around the header and content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelegateInsets {
    pub header_bottom_margin: i32,
    /// Part of the header that stays visible when fully collapsed.
    pub header_sticky_height: i32,
    pub content_bottom_margin: i32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    top_edge: i32,
    width: i32,
    height: i32,
}

struct DelegateInner {
    weak_self: Weak<DelegateInner>,
    runtime: RuntimeHandle,
    header: Rc<dyn PositionableSurface>,
    content: Rc<dyn ScrollCapability>,
    content_surface: Rc<dyn PositionableSurface>,
    insets: DelegateInsets,
    frame: Cell<Frame>,
    translation: Cell<i32>,
    offsets: OffsetTracker,
    notifier: RefCell<Option<RegionNotifier>>,
    dispatcher: NestedScrollDispatcher,
    gesture: RefCell<GestureTracker>,
    state: Cell<ScrollActivityState>,
    fling: FlingAnimation,
    pending_check: Cell<Option<PostedTaskId>>,
}

/// Header plus content, scrolled as one bottom region.
pub struct BottomDelegateLayout {
    inner: Rc<DelegateInner>,
}

impl BottomDelegateLayout {
    pub fn new<C>(
        runtime: RuntimeHandle,
        header: Rc<dyn PositionableSurface>,
        content: Rc<C>,
        insets: DelegateInsets,
        config: ScrollConfig,
    ) -> Result<Self>
    where
        C: ScrollCapability + PositionableSurface + 'static,
    {
        config.validate()?;
        if content.orientation() != Orientation::Vertical {
            return Err(CoordinatorError::UnsupportedOrientation {
                region: RegionKind::Bottom,
            });
        }
        let content_surface: Rc<dyn PositionableSurface> = content.clone();
        let offsets = OffsetTracker::with_surfaces([header.clone(), content_surface.clone()]);
        let inner = Rc::new_cyclic(|weak_self: &Weak<DelegateInner>| DelegateInner {
            weak_self: weak_self.clone(),
            fling: FlingAnimation::new(runtime.clone(), config.fling),
            runtime,
            header,
            content: content.clone(),
            content_surface,
            insets,
            frame: Cell::new(Frame::default()),
            translation: Cell::new(0),
            offsets,
            notifier: RefCell::new(None),
            dispatcher: NestedScrollDispatcher::new(),
            gesture: RefCell::new(GestureTracker::new(config.gesture)),
            state: Cell::new(ScrollActivityState::Idle),
            pending_check: Cell::new(None),
        });

        let sink = Rc::downgrade(&inner);
        content.set_notifier(Some(RegionNotifier::new(RegionKind::Bottom, sink)));
        let connection: Rc<dyn NestedScrollConnection> = Rc::new(DelegateConnection {
            inner: Rc::downgrade(&inner),
        });
        content.set_nested_parent(Some(connection));
        Ok(Self { inner })
    }

    pub fn header(&self) -> &Rc<dyn PositionableSurface> {
        &self.inner.header
    }

    pub fn content(&self) -> &Rc<dyn ScrollCapability> {
        &self.inner.content
    }

    pub fn insets(&self) -> DelegateInsets {
        self.inner.insets
    }

    /// Records where the host placed the delegate and re-applies the header
    /// offset to the freshly laid-out children.
    pub fn layout(&self, top_edge: i32, width: i32, height: i32) {
        self.inner.frame.set(Frame {
            top_edge,
            width,
            height,
        });
        self.inner.offsets.on_layout();
        self.inner.post_check_layout();
    }

    /// How far the header has collapsed, `0..=header_offset_range()`.
    pub fn header_offset_current(&self) -> i32 {
        self.inner.collapse()
    }

    pub fn header_offset_range(&self) -> i32 {
        self.inner.header_range()
    }

    pub fn check_layout(&self) {
        self.inner.check_layout();
    }

    pub fn post_check_layout(&self) {
        self.inner.post_check_layout();
    }

    pub fn fling(&self, velocity: f32) -> bool {
        self.inner.start_fling(velocity)
    }

    pub fn is_flinging(&self) -> bool {
        self.inner.fling.is_running()
    }

    pub fn dispatch_touch_event(&self, event: &PointerEvent) -> bool {
        let action = self.inner.handle_touch(event);
        if action != GestureAction::Ignored {
            event.consume();
            return true;
        }
        false
    }

    pub fn intercept_touch_event(&self, event: &PointerEvent) -> bool {
        let action = self.inner.handle_touch(event);
        action.claims_stream() || self.inner.gesture.borrow().is_dragging()
    }
}

impl DelegateInner {
    fn collapse(&self) -> i32 {
        -self.offsets.offset()
    }

    fn header_range(&self) -> i32 {
        let insets = self.insets;
        let mut min_offset = -self.header.measured_height() - insets.header_bottom_margin
            + insets.header_sticky_height;
        if let Some(extent) = self.content.content_extent().finite() {
            // Short content leaves part of the header on screen.
            min_offset += self.content_surface.measured_height() - extent;
        }
        -min_offset.min(0)
    }

    fn content_extent(&self) -> ContentExtent {
        let Some(content) = self.content.content_extent().finite() else {
            return ContentExtent::Unbounded;
        };
        if content > self.content_surface.measured_height() {
            return ContentExtent::Unbounded;
        }
        let total = self.header.measured_height() + content + self.insets.content_bottom_margin;
        if total > self.frame.get().height {
            return ContentExtent::Unbounded;
        }
        ContentExtent::Finite(total)
    }

    fn current_scroll(&self) -> i32 {
        self.collapse() + self.content.current_scroll()
    }

    /// Collapsible part of the header plus the content range.
    fn combined_range(&self) -> i32 {
        self.header_range() + self.content.scroll_range()
    }

    fn notify_scrolled(&self) {
        let notifier = self.notifier.borrow().clone();
        if let Some(notifier) = notifier {
            notifier.scrolled(self.current_scroll(), self.combined_range());
        }
    }

    fn set_state(&self, state: ScrollActivityState) {
        if self.state.replace(state) == state {
            return;
        }
        log::debug!("delegate scroll state {:?}", state);
        let notifier = self.notifier.borrow().clone();
        if let Some(notifier) = notifier {
            notifier.state_changed(state);
        }
    }

    /// Moves the header and returns how much of `request` it took. Always
    /// notifies, even when nothing moved.
    fn move_header(&self, request: ScrollRequest) -> i32 {
        let current = self.collapse();
        let moved = request.resolve(current, 0, self.header_range());
        if moved != 0 {
            self.offsets.set_offset(-(current + moved));
        }
        self.notify_scrolled();
        moved
    }

    /// Header share of `delta`; returns what is left.
    fn offset_by(&self, delta: i32) -> i32 {
        if delta == 0 {
            return 0;
        }
        delta - self.move_header(ScrollRequest::Delta(delta))
    }

    fn consume_content(&self, delta: i32) -> i32 {
        let before = self.content.current_scroll();
        self.content.consume(ScrollRequest::Delta(delta));
        clamp_consumed(delta, self.content.current_scroll() - before)
    }

    fn consume(&self, request: ScrollRequest) {
        match request {
            ScrollRequest::JumpToEnd => {
                self.move_header(request);
                self.content.consume(request);
            }
            ScrollRequest::JumpToStart => {
                self.content.consume(request);
                self.move_header(request);
            }
            ScrollRequest::Delta(delta) if delta > 0 => {
                let rest = self.offset_by(delta);
                if rest != 0 {
                    self.consume_content(rest);
                }
            }
            ScrollRequest::Delta(delta) if delta < 0 => {
                let rest = delta - self.consume_content(delta);
                self.offset_by(rest);
            }
            ScrollRequest::Delta(_) => {}
        }
    }

    /// Local phase for the delegate's own fling.
    fn consume_measured(&self, delta: i32) -> i32 {
        let before = self.current_scroll();
        self.consume(ScrollRequest::Delta(delta));
        clamp_consumed(delta, self.current_scroll() - before)
    }

    fn start_fling(&self, velocity: f32) -> bool {
        let velocity = self.dispatcher.dispatch_pre_fling(velocity);
        let step = {
            let weak = self.weak_self.clone();
            move |delta| {
                let Some(inner) = weak.upgrade() else {
                    return 0;
                };
                inner
                    .dispatcher
                    .dispatch_scroll(delta, ScrollSource::Fling, |available| {
                        inner.consume_measured(available)
                    })
                    .consumed()
            }
        };
        let end = {
            let weak = self.weak_self.clone();
            move |end: MotionEnd| {
                if let Some(inner) = weak.upgrade() {
                    log::debug!("delegate fling ended: {:?}", end);
                    inner.set_state(ScrollActivityState::Idle);
                }
            }
        };
        let started = self.fling.start(velocity, step, end);
        self.set_state(if started {
            ScrollActivityState::Settling
        } else {
            ScrollActivityState::Idle
        });
        started
    }

    fn stop_motion(&self) {
        if self.fling.cancel() {
            self.set_state(ScrollActivityState::Idle);
        }
        self.content.stop_motion();
    }

    fn check_layout(&self) {
        let range = self.header_range();
        if self.collapse() > range {
            self.offsets.set_offset(-range);
        }
        if self.collapse() < range && self.content.current_scroll() > 0 {
            log::debug!("delegate check layout: content back to start");
            self.content.consume(ScrollRequest::JumpToStart);
        }
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

    fn handle_touch(&self, event: &PointerEvent) -> GestureAction {
        if event.kind == PointerEventKind::Down {
            self.stop_motion();
        }
        let frame = self.frame.get();
        let context = TouchContext {
            drag_band: self
                .header
                .bounds()
                .translate(0.0, (frame.top_edge + self.translation.get()) as f32),
            child_scroll: self.content.current_scroll(),
        };
        let action = self.gesture.borrow_mut().on_touch_event(event, &context);
        match action {
            GestureAction::Drag(delta) => {
                self.set_state(ScrollActivityState::Dragging);
                self.dispatcher
                    .dispatch_scroll(delta, ScrollSource::Drag, |available| {
                        available - self.offset_by(available)
                    });
            }
            GestureAction::Released { velocity } => {
                if self.state.get() == ScrollActivityState::Dragging {
                    self.start_fling(velocity);
                }
            }
            GestureAction::Cancelled => self.set_state(ScrollActivityState::Idle),
            GestureAction::Ignored
            | GestureAction::Pressed
            | GestureAction::Grabbed
            | GestureAction::Tracking
            | GestureAction::Blocked => {}
        }
        action
    }

    fn save(&self) -> RegionSnapshot {
        RegionSnapshot::Delegate {
            header_offset: self.collapse(),
            content: self.content.save().map(Box::new),
        }
    }

    fn restore(&self, snapshot: &RegionSnapshot) {
        match snapshot {
            RegionSnapshot::Delegate {
                header_offset,
                content,
            } => {
                self.offsets.set_offset(-(*header_offset).max(0));
                self.content.restore(content.as_deref());
            }
            other => log::warn!(
                "bottom delegate ignores a {} snapshot",
                other.kind_name()
            ),
        }
    }
}

impl RegionEventSink for DelegateInner {
    fn on_region_event(&self, _region: RegionKind, event: RegionEvent) {
        let notifier = self.notifier.borrow().clone();
        let Some(notifier) = notifier else {
            return;
        };
        match event {
            RegionEvent::Scrolled { offset, range } => {
                notifier.scrolled(
                    offset + self.collapse(),
                    range + self.header_range(),
                );
            }
            RegionEvent::StateChanged(state) => notifier.state_changed(state),
        }
    }
}

/// Nested scroll parent of the delegate's content.
struct DelegateConnection {
    inner: Weak<DelegateInner>,
}

impl NestedScrollConnection for DelegateConnection {
    fn on_pre_scroll(&self, available: i32, source: ScrollSource) -> i32 {
        let Some(inner) = self.inner.upgrade() else {
            return 0;
        };
        let outer = inner.dispatcher.pre_scroll(available, source);
        let remaining = available - outer;
        let local = if remaining > 0 {
            remaining - inner.offset_by(remaining)
        } else {
            0
        };
        outer + local
    }

    fn on_post_scroll(&self, consumed: i32, available: i32, source: ScrollSource) -> i32 {
        let Some(inner) = self.inner.upgrade() else {
            return 0;
        };
        let rest = inner.offset_by(available);
        let local = available - rest;
        local + inner.dispatcher.post_scroll(consumed + local, rest, source)
    }

    fn on_pre_fling(&self, velocity: f32) -> f32 {
        match self.inner.upgrade() {
            Some(inner) => velocity - inner.dispatcher.dispatch_pre_fling(velocity),
            None => 0.0,
        }
    }

    fn on_post_fling(&self, consumed: f32, available: f32) -> f32 {
        let Some(inner) = self.inner.upgrade() else {
            return 0.0;
        };
        if inner.start_fling(available) {
            return available;
        }
        inner.dispatcher.dispatch_post_fling(consumed, available)
    }
}

impl ScrollCapability for BottomDelegateLayout {
    fn current_scroll(&self) -> i32 {
        self.inner.current_scroll()
    }

    fn scroll_range(&self) -> i32 {
        if self.inner.content_extent().is_unbounded() {
            self.inner.combined_range()
        } else {
            0
        }
    }

    fn content_extent(&self) -> ContentExtent {
        self.inner.content_extent()
    }

    fn consume(&self, request: ScrollRequest) {
        self.inner.consume(request);
    }

    fn smooth_scroll_by(&self, delta: i32, duration_ms: u64) {
        self.inner.content.smooth_scroll_by(delta, duration_ms);
    }

    fn stop_motion(&self) {
        self.inner.stop_motion();
    }

    fn save(&self) -> Option<RegionSnapshot> {
        Some(self.inner.save())
    }

    fn restore(&self, snapshot: Option<&RegionSnapshot>) {
        if let Some(snapshot) = snapshot {
            self.inner.restore(snapshot);
        }
    }

    fn set_notifier(&self, notifier: Option<RegionNotifier>) {
        *self.inner.notifier.borrow_mut() = notifier;
    }

    fn set_nested_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        self.inner.dispatcher.set_parent(parent);
    }
}

impl PositionableSurface for BottomDelegateLayout {
    fn measured_height(&self) -> i32 {
        self.inner.frame.get().height
    }

    fn measured_width(&self) -> i32 {
        self.inner.frame.get().width
    }

    fn set_translation_y(&self, value: i32) {
        self.inner.translation.set(value);
    }

    fn translation_y(&self) -> i32 {
        self.inner.translation.get()
    }

    fn top_edge(&self) -> i32 {
        self.inner.frame.get().top_edge
    }
}
