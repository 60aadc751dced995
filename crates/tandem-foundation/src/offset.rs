use crate::PositionableSurface;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

/// Vertical offset shared by a group of surfaces relative to where layout put
/// them.
///
/// Callers clamp; the tracker applies whatever it is given.
pub struct OffsetTracker {
    surfaces: SmallVec<[Rc<dyn PositionableSurface>; 2]>,
    offset: Cell<i32>,
    layout_top: Cell<i32>,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self {
            surfaces: SmallVec::new(),
            offset: Cell::new(0),
            layout_top: Cell::new(0),
        }
    }

    pub fn with_surfaces(surfaces: impl IntoIterator<Item = Rc<dyn PositionableSurface>>) -> Self {
        let tracker = Self {
            surfaces: surfaces.into_iter().collect(),
            ..Self::new()
        };
        tracker.on_layout();
        tracker
    }

    pub fn offset(&self) -> i32 {
        self.offset.get()
    }

    /// Top edge of the first surface as of the last layout pass.
    pub fn layout_top(&self) -> i32 {
        self.layout_top.get()
    }

    /// Returns whether the offset changed.
    pub fn set_offset(&self, value: i32) -> bool {
        if self.offset.replace(value) == value {
            return false;
        }
        self.apply();
        true
    }

    /// Re-reads the laid-out position and re-applies the current offset, since
    /// a layout pass may have reset translations.
    pub fn on_layout(&self) {
        if let Some(first) = self.surfaces.first() {
            self.layout_top.set(first.top_edge());
        }
        self.apply();
    }

    fn apply(&self) {
        let offset = self.offset.get();
        for surface in &self.surfaces {
            surface.set_translation_y(offset);
        }
    }
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new()
    }
}
