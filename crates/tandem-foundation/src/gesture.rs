//! Pointer stream to drag delta translation.

use crate::input::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;
use crate::GestureConfig;
use tandem_core::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pressed inside the drag band, slop not yet exceeded.
    Tracking,
    Dragging,
}

/// Per-event facts the tracker cannot know on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContext {
    /// Area in which a press may start a drag.
    pub drag_band: Rect,
    /// Internal scroll of the content below the band; while positive, drags
    /// that would reveal the band are refused.
    pub child_scroll: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    Ignored,
    /// A press inside the drag band started tracking.
    Pressed,
    /// A secondary pointer inside the band took over from a primary outside it.
    Grabbed,
    /// Still below slop, or the tracked pointer changed.
    Tracking,
    /// Scroll by this many pixels; positive moves content up.
    Drag(i32),
    /// A downward drag refused because the content below is scrolled.
    Blocked,
    /// The gesture ended. `velocity` is in scroll space (positive continues
    /// moving content up) and is zero when no drag happened.
    Released { velocity: f32 },
    Cancelled,
}

impl GestureAction {
    /// Whether the tracker now owns the pointer stream.
    pub fn claims_stream(&self) -> bool {
        matches!(
            self,
            GestureAction::Grabbed | GestureAction::Drag(_) | GestureAction::Blocked
        )
    }
}

pub struct GestureTracker {
    config: GestureConfig,
    phase: GesturePhase,
    active_pointer: Option<PointerId>,
    last_y: i32,
    velocity: Option<VelocityTracker1D>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            active_pointer: None,
            last_y: 0,
            velocity: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn on_touch_event(&mut self, event: &PointerEvent, context: &TouchContext) -> GestureAction {
        match event.kind {
            PointerEventKind::Down => self.on_press(event, context),
            PointerEventKind::PointerDown => self.on_secondary_press(event, context),
            PointerEventKind::Move => self.on_move(event, context),
            PointerEventKind::PointerUp => self.on_secondary_release(event),
            PointerEventKind::Up => self.on_release(event),
            PointerEventKind::Cancel => {
                if self.phase == GesturePhase::Idle {
                    return GestureAction::Ignored;
                }
                log::debug!("gesture cancelled in {:?}", self.phase);
                self.reset();
                GestureAction::Cancelled
            }
        }
    }

    /// Drops all tracking state without reporting a release.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.active_pointer = None;
        self.velocity = None;
    }

    fn track(&mut self, id: PointerId, y: f32, time_ms: i64) {
        self.phase = GesturePhase::Tracking;
        self.active_pointer = Some(id);
        self.last_y = y.round() as i32;
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(time_ms, y);
        self.velocity = Some(tracker);
    }

    fn on_press(&mut self, event: &PointerEvent, context: &TouchContext) -> GestureAction {
        self.reset();
        let Some(pointer) = event.action_pointer() else {
            return GestureAction::Ignored;
        };
        if !context.drag_band.contains(pointer.position) {
            return GestureAction::Ignored;
        }
        self.track(pointer.id, pointer.position.y, event.time_ms);
        log::debug!("gesture tracking pointer {}", pointer.id);
        GestureAction::Pressed
    }

    fn on_secondary_press(&mut self, event: &PointerEvent, context: &TouchContext) -> GestureAction {
        if event.action_index == 0 || self.phase == GesturePhase::Dragging {
            return GestureAction::Ignored;
        }
        let (Some(primary), Some(secondary)) = (event.primary(), event.action_pointer()) else {
            return GestureAction::Ignored;
        };
        if context.drag_band.contains(primary.position)
            || !context.drag_band.contains(secondary.position)
        {
            return GestureAction::Ignored;
        }
        self.track(secondary.id, secondary.position.y, event.time_ms);
        log::debug!("gesture grabbed by secondary pointer {}", secondary.id);
        GestureAction::Grabbed
    }

    fn on_move(&mut self, event: &PointerEvent, context: &TouchContext) -> GestureAction {
        if self.phase == GesturePhase::Idle {
            return GestureAction::Ignored;
        }
        let Some(sample) = self.active_pointer.and_then(|id| event.find(id)) else {
            log::warn!("move without tracked pointer {:?}", self.active_pointer);
            self.reset();
            return GestureAction::Ignored;
        };
        if let Some(tracker) = self.velocity.as_mut() {
            tracker.add_data_point(event.time_ms, sample.position.y);
        }

        let y = sample.position.y.round() as i32;
        let mut delta = self.last_y - y;
        if self.phase == GesturePhase::Tracking {
            let slop = self.config.touch_slop;
            if delta.abs() < slop {
                return GestureAction::Tracking;
            }
            self.phase = GesturePhase::Dragging;
            delta -= slop * delta.signum();
            log::debug!("gesture dragging after slop {}", slop);
        }
        self.last_y = y;

        if delta < 0 && context.child_scroll > 0 {
            return GestureAction::Blocked;
        }
        GestureAction::Drag(delta)
    }

    fn on_secondary_release(&mut self, event: &PointerEvent) -> GestureAction {
        let Some(lifted) = event.action_pointer() else {
            return GestureAction::Ignored;
        };
        if self.active_pointer != Some(lifted.id) {
            return GestureAction::Ignored;
        }
        let next_index = if event.action_index == 0 { 1 } else { 0 };
        let Some(next) = event.pointers.get(next_index) else {
            self.reset();
            return GestureAction::Cancelled;
        };
        self.active_pointer = Some(next.id);
        self.last_y = next.position.y.round() as i32;
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(event.time_ms, next.position.y);
        self.velocity = Some(tracker);
        GestureAction::Tracking
    }

    fn on_release(&mut self, event: &PointerEvent) -> GestureAction {
        if self.phase == GesturePhase::Idle {
            return GestureAction::Ignored;
        }
        let mut velocity = 0.0;
        if self.phase == GesturePhase::Dragging {
            if let Some(tracker) = self.velocity.as_mut() {
                if let Some(sample) = self.active_pointer.and_then(|id| event.find(id)) {
                    tracker.add_data_point(event.time_ms, sample.position.y);
                }
                // Pointer y grows downwards, scroll deltas grow upwards.
                velocity = -tracker.calculate_velocity_with_max(self.config.max_fling_velocity);
            }
        }
        log::debug!("gesture released with velocity {}", velocity);
        self.reset();
        GestureAction::Released { velocity }
    }
}
