//! Pointer event builders. All positions use x = 10.

use tandem_foundation::{PointerEvent, PointerEventKind, PointerId};

const X: f32 = 10.0;

pub fn down(id: PointerId, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Down, time_ms).with_pointer(id, X, y)
}

pub fn move_to(id: PointerId, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Move, time_ms).with_pointer(id, X, y)
}

pub fn up(id: PointerId, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Up, time_ms).with_pointer(id, X, y)
}

pub fn cancel(id: PointerId, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Cancel, time_ms).with_pointer(id, X, y)
}

/// `pointers` are `(id, y)`; the last one is the pointer going down.
pub fn pointer_down(pointers: &[(PointerId, f32)], time_ms: i64) -> PointerEvent {
    let mut event = PointerEvent::new(PointerEventKind::PointerDown, time_ms)
        .with_action_index(pointers.len().saturating_sub(1));
    for &(id, y) in pointers {
        event = event.with_pointer(id, X, y);
    }
    event
}

/// Moves every pointer in `pointers` at once.
pub fn move_all(pointers: &[(PointerId, f32)], time_ms: i64) -> PointerEvent {
    let mut event = PointerEvent::new(PointerEventKind::Move, time_ms);
    for &(id, y) in pointers {
        event = event.with_pointer(id, X, y);
    }
    event
}

/// A drag of `pointer` from `from_y` to `to_y` in `steps` moves, 8ms apart,
/// starting at `start_ms`. Does not include the release.
pub fn drag(pointer: PointerId, from_y: f32, to_y: f32, steps: u32, start_ms: i64) -> Vec<PointerEvent> {
    let steps = steps.max(1);
    let mut events = Vec::with_capacity(steps as usize + 1);
    events.push(down(pointer, from_y, start_ms));
    for step in 1..=steps {
        let fraction = step as f32 / steps as f32;
        let y = from_y + (to_y - from_y) * fraction;
        events.push(move_to(pointer, y, start_ms + 8 * step as i64));
    }
    events
}
