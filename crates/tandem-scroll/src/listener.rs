use indexmap::IndexMap;
use smallvec::SmallVec;
use std::rc::Rc;
use tandem_foundation::ScrollActivityState;

/// Position and limit along one scroll domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub current: i32,
    pub range: i32,
}

impl Extent {
    pub const fn new(current: i32, range: i32) -> Self {
        Self { current, range }
    }

    pub fn at_start(&self) -> bool {
        self.current <= 0
    }

    pub fn at_end(&self) -> bool {
        self.current >= self.range
    }
}

/// The three scroll domains of the composite surface. `seam.current` is how
/// far the seam has collapsed, `0..=seam.range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub top: Extent,
    pub seam: Extent,
    pub bottom: Extent,
}

pub trait ScrollListener {
    fn on_scroll(&self, _metrics: ScrollMetrics) {}

    /// `originated_from_seam` is set when the change comes from a drag or
    /// motion the coordinator drives itself rather than from the bottom region.
    fn on_scroll_state_change(&self, _state: ScrollActivityState, _originated_from_seam: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Insertion-ordered listener set; the same `Rc` is only registered once.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: IndexMap<ListenerId, Rc<dyn ScrollListener>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, listener: Rc<dyn ScrollListener>) -> ListenerId {
        if let Some((id, _)) = self
            .entries
            .iter()
            .find(|(_, existing)| Rc::ptr_eq(existing, &listener))
        {
            return *id;
        }
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cloned out so listeners may add or remove listeners while being called.
    pub(crate) fn snapshot(&self) -> SmallVec<[Rc<dyn ScrollListener>; 4]> {
        self.entries.values().cloned().collect()
    }
}
