use std::cell::Cell;
use std::rc::Rc;

/// Shared flag guarding scheduled continuations.
///
/// A continuation captures a clone of the token when it is scheduled and
/// checks [`LivenessToken::is_alive`] before touching any state. Invalidating
/// any clone kills all of them, so a callback that was already queued for the
/// next frame becomes a no-op.
#[derive(Clone, Debug)]
pub struct LivenessToken {
    alive: Rc<Cell<bool>>,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn invalidate(&self) {
        self.alive.set(false);
    }

    pub fn same_as(&self, other: &LivenessToken) -> bool {
        Rc::ptr_eq(&self.alive, &other.alive)
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}
