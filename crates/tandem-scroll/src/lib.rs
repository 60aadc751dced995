//! Composite scroll coordination: two stacked, independently scrollable
//! regions driven as one continuous scroll surface.
//!
//! [`CompositeScrollCoordinator`] owns the seam between a top and a bottom
//! region and distributes every delta (drag, fling, programmatic) across the
//! top region's scroll, the seam and the bottom region's scroll.
//! [`BottomDelegateLayout`] is a ready-made bottom region that puts a
//! collapsing header above a content region.

mod bottom_delegate;
mod config;
mod coordinator;
mod error;
mod fling;
mod listener;
mod motion;
mod smooth_scroll;
mod snapshot;

pub use bottom_delegate::{BottomDelegateLayout, DelegateInsets};
pub use config::{FlingConfig, ScrollConfig};
pub use coordinator::CompositeScrollCoordinator;
pub use error::{CoordinatorError, Result};
pub use fling::{FlingAnimation, FlingState};
pub use listener::{Extent, ListenerId, ScrollListener, ScrollMetrics};
pub use motion::MotionEnd;
pub use smooth_scroll::SmoothScroll;
pub use snapshot::ScrollSnapshot;

#[cfg(test)]
#[path = "tests/motion_tests.rs"]
mod motion_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
