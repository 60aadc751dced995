//! Three-phase nested scroll distribution.
//!
//! A delta that originates in a child is first offered to its parent
//! (pre-scroll), then consumed locally, then the leftover is offered to the
//! parent again (post-scroll). Flings follow the same shape with velocities.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollSource {
    Drag,
    Fling,
    Programmatic,
}

/// The parent side of nested scrolling. Every hook returns how much of what
/// it was offered it consumed; the defaults consume nothing.
pub trait NestedScrollConnection {
    fn on_pre_scroll(&self, _available: i32, _source: ScrollSource) -> i32 {
        0
    }

    fn on_post_scroll(&self, _consumed: i32, _available: i32, _source: ScrollSource) -> i32 {
        0
    }

    fn on_pre_fling(&self, _velocity: f32) -> f32 {
        0.0
    }

    fn on_post_fling(&self, _consumed: f32, _available: f32) -> f32 {
        0.0
    }
}

/// Where a dispatched delta went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NestedScrollOutcome {
    pub requested: i32,
    pub pre_consumed: i32,
    pub local_consumed: i32,
    pub post_consumed: i32,
}

impl NestedScrollOutcome {
    pub fn consumed(&self) -> i32 {
        self.pre_consumed + self.local_consumed + self.post_consumed
    }

    pub fn unconsumed(&self) -> i32 {
        self.requested - self.consumed()
    }

    /// Consumed by this layer or above it, i.e. everything except overscroll.
    pub fn is_fully_consumed(&self) -> bool {
        self.unconsumed() == 0
    }
}

/// Keeps a parent's answer within what it was offered: same sign, no larger.
pub fn clamp_consumed(available: i32, consumed: i32) -> i32 {
    if available >= 0 {
        consumed.clamp(0, available)
    } else {
        consumed.clamp(available, 0)
    }
}

fn clamp_consumed_velocity(available: f32, consumed: f32) -> f32 {
    if !consumed.is_finite() {
        return 0.0;
    }
    if available >= 0.0 {
        consumed.clamp(0.0, available)
    } else {
        consumed.clamp(available, 0.0)
    }
}

/// Child side of nested scrolling: runs the three phases against an optional
/// parent.
#[derive(Default)]
pub struct NestedScrollDispatcher {
    parent: RefCell<Option<Rc<dyn NestedScrollConnection>>>,
}

impl NestedScrollDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        *self.parent.borrow_mut() = parent;
    }

    pub fn has_parent(&self) -> bool {
        self.parent.borrow().is_some()
    }

    // Cloned out so a parent may re-enter this dispatcher.
    fn parent(&self) -> Option<Rc<dyn NestedScrollConnection>> {
        self.parent.borrow().clone()
    }

    /// Pre-scroll phase alone, for layers that sit between a child and their
    /// own parent. Returns what the parent consumed.
    pub fn pre_scroll(&self, available: i32, source: ScrollSource) -> i32 {
        if available == 0 {
            return 0;
        }
        match self.parent() {
            Some(parent) => clamp_consumed(available, parent.on_pre_scroll(available, source)),
            None => 0,
        }
    }

    /// Post-scroll phase alone. `consumed` is what was used below the parent.
    pub fn post_scroll(&self, consumed: i32, available: i32, source: ScrollSource) -> i32 {
        if available == 0 {
            return 0;
        }
        match self.parent() {
            Some(parent) => {
                clamp_consumed(available, parent.on_post_scroll(consumed, available, source))
            }
            None => 0,
        }
    }

    /// Distributes `delta`: parent pre-scroll, then `local` with whatever is
    /// left (returning what it consumed), then parent post-scroll with the rest.
    pub fn dispatch_scroll(
        &self,
        delta: i32,
        source: ScrollSource,
        local: impl FnOnce(i32) -> i32,
    ) -> NestedScrollOutcome {
        let mut outcome = NestedScrollOutcome {
            requested: delta,
            ..Default::default()
        };
        if delta == 0 {
            return outcome;
        }

        outcome.pre_consumed = self.pre_scroll(delta, source);

        let available = delta - outcome.pre_consumed;
        if available != 0 {
            let local_consumed = local(available);
            debug_assert!(
                clamp_consumed(available, local_consumed) == local_consumed,
                "local phase consumed {} of {}",
                local_consumed,
                available
            );
            outcome.local_consumed = clamp_consumed(available, local_consumed);
        }

        let leftover = available - outcome.local_consumed;
        outcome.post_consumed = self.post_scroll(
            outcome.pre_consumed + outcome.local_consumed,
            leftover,
            source,
        );

        log::trace!(
            "nested scroll {:?} delta={} pre={} local={} post={}",
            source,
            delta,
            outcome.pre_consumed,
            outcome.local_consumed,
            outcome.post_consumed
        );
        outcome
    }

    /// Offers `velocity` to the parent before the child flings; returns the
    /// velocity left for the child.
    pub fn dispatch_pre_fling(&self, velocity: f32) -> f32 {
        match self.parent() {
            Some(parent) => velocity - clamp_consumed_velocity(velocity, parent.on_pre_fling(velocity)),
            None => velocity,
        }
    }

    /// Offers velocity the child did not use to the parent; returns what the
    /// parent consumed.
    pub fn dispatch_post_fling(&self, consumed: f32, available: f32) -> f32 {
        match self.parent() {
            Some(parent) => {
                clamp_consumed_velocity(available, parent.on_post_fling(consumed, available))
            }
            None => 0.0,
        }
    }
}
