use std::cell::Cell;
use tandem_foundation::PositionableSurface;

/// A measured rectangle that records the translation applied to it.
#[derive(Debug, Default)]
pub struct FakeSurface {
    width: Cell<i32>,
    height: Cell<i32>,
    top_edge: Cell<i32>,
    translation: Cell<i32>,
}

impl FakeSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            ..Self::default()
        }
    }

    pub fn with_top_edge(self, top_edge: i32) -> Self {
        self.top_edge.set(top_edge);
        self
    }

    pub fn set_height(&self, height: i32) {
        self.height.set(height);
    }

    pub fn set_top_edge(&self, top_edge: i32) {
        self.top_edge.set(top_edge);
    }
}

impl PositionableSurface for FakeSurface {
    fn measured_height(&self) -> i32 {
        self.height.get()
    }

    fn measured_width(&self) -> i32 {
        self.width.get()
    }

    fn set_translation_y(&self, value: i32) {
        self.translation.set(value);
    }

    fn translation_y(&self) -> i32 {
        self.translation.get()
    }

    fn top_edge(&self) -> i32 {
        self.top_edge.get()
    }
}
