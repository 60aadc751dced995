//! Building blocks shared by the tandem scroll regions and their coordinator:
//! the capability contract regions implement, the nested scroll protocol, the
//! seam offset bookkeeping and the drag gesture state machine.

mod capability;
mod config;
mod gesture;
pub mod gesture_constants;
mod input;
mod nested;
mod offset;
mod request;
mod snapshot;
mod velocity_tracker;

pub use capability::{
    Orientation, PositionableSurface, RegionEvent, RegionEventSink, RegionKind, RegionNotifier,
    ScrollActivityState, ScrollCapability,
};
pub use config::GestureConfig;
pub use gesture::{GestureAction, GesturePhase, GestureTracker, TouchContext};
pub use input::{PointerEvent, PointerEventKind, PointerId, PointerSample};
pub use nested::{
    clamp_consumed, NestedScrollConnection, NestedScrollDispatcher, NestedScrollOutcome,
    ScrollSource,
};
pub use offset::OffsetTracker;
pub use request::{consume_within, ContentExtent, ScrollRequest};
pub use snapshot::RegionSnapshot;
pub use velocity_tracker::{VelocityTracker1D, ASSUME_STOPPED_MS};

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod gesture_tests;

#[cfg(test)]
#[path = "tests/nested_tests.rs"]
mod nested_tests;

#[cfg(test)]
#[path = "tests/request_tests.rs"]
mod request_tests;
