use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;
use tandem_core::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// First pointer pressed.
    Down,
    /// An additional pointer pressed; `action_index` names it.
    PointerDown,
    Move,
    /// A pointer other than the last one lifted; `action_index` names it.
    PointerUp,
    /// Last pointer lifted.
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

/// One multi-pointer input event, positions in container coordinates.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Index into `pointers` of the pointer that caused a down/up.
    pub action_index: usize,
    pub pointers: SmallVec<[PointerSample; 2]>,
    pub time_ms: i64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, time_ms: i64) -> Self {
        Self {
            kind,
            action_index: 0,
            pointers: SmallVec::new(),
            time_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_pointer(mut self, id: PointerId, x: f32, y: f32) -> Self {
        self.pointers.push(PointerSample {
            id,
            position: Point::new(x, y),
        });
        self
    }

    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    pub fn find(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|sample| sample.id == id)
    }

    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    pub fn action_pointer(&self) -> Option<&PointerSample> {
        self.pointers.get(self.action_index)
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
