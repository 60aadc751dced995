#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tandem_foundation::{ScrollActivityState, ScrollCapability};
use tandem_scroll::{CompositeScrollCoordinator, ScrollListener, ScrollMetrics};
use tandem_testing::{FakeListRegion, FakeSurface, ScrollTestRule};

pub const CONTAINER_HEIGHT: i32 = 1000;
pub const TOP_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heard {
    Scroll(ScrollMetrics),
    State(ScrollActivityState, bool),
}

#[derive(Default)]
pub struct RecordingListener {
    heard: RefCell<Vec<Heard>>,
}

impl RecordingListener {
    pub fn heard(&self) -> Vec<Heard> {
        self.heard.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<ScrollMetrics> {
        self.heard
            .borrow()
            .iter()
            .filter_map(|heard| match heard {
                Heard::Scroll(metrics) => Some(*metrics),
                Heard::State(..) => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<(ScrollActivityState, bool)> {
        self.heard
            .borrow()
            .iter()
            .filter_map(|heard| match heard {
                Heard::State(state, from_seam) => Some((*state, *from_seam)),
                Heard::Scroll(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.heard.borrow_mut().clear();
    }
}

impl ScrollListener for RecordingListener {
    fn on_scroll(&self, metrics: ScrollMetrics) {
        self.heard.borrow_mut().push(Heard::Scroll(metrics));
    }

    fn on_scroll_state_change(&self, state: ScrollActivityState, originated_from_seam: bool) {
        self.heard
            .borrow_mut()
            .push(Heard::State(state, originated_from_seam));
    }
}

/// A 1000px container holding a 300px top list (600px of items, range 300)
/// above a full-height bottom list. The seam range is 300 unless the bottom
/// content is short.
pub struct Composite {
    pub rule: ScrollTestRule,
    pub container: Rc<FakeSurface>,
    pub top: Rc<FakeListRegion>,
    pub bottom: Rc<FakeListRegion>,
    pub coordinator: CompositeScrollCoordinator,
    pub listener: Rc<RecordingListener>,
}

impl Composite {
    pub fn new() -> Self {
        Self::with_bottom(FakeListRegion::uniform(20, 100, CONTAINER_HEIGHT))
    }

    pub fn with_bottom(bottom: FakeListRegion) -> Self {
        Self::with_regions(FakeListRegion::uniform(6, 100, TOP_HEIGHT), bottom)
    }

    pub fn with_regions(top: FakeListRegion, bottom: FakeListRegion) -> Self {
        let rule = ScrollTestRule::new();
        let container = Rc::new(FakeSurface::new(100, CONTAINER_HEIGHT));
        let top = Rc::new(top);
        let bottom = Rc::new(bottom.with_top_edge(TOP_HEIGHT));
        let coordinator = CompositeScrollCoordinator::with_defaults(rule.handle(), container.clone());
        coordinator
            .set_top_region(top.clone())
            .expect("top region installs");
        coordinator
            .set_bottom_region(bottom.clone())
            .expect("bottom region installs");
        rule.run_posted_tasks();
        let listener = Rc::new(RecordingListener::default());
        coordinator.add_listener(listener.clone());
        Self {
            rule,
            container,
            top,
            bottom,
            coordinator,
            listener,
        }
    }

    /// `(top scroll, seam collapse, bottom scroll)`
    pub fn positions(&self) -> (i32, i32, i32) {
        (
            self.top.current_scroll(),
            self.coordinator.offset_current(),
            self.bottom.current_scroll(),
        )
    }

    pub fn assert_in_bounds(&self) {
        let (top, seam, bottom) = self.positions();
        assert!((0..=self.top.scroll_range()).contains(&top), "top {top}");
        assert!(
            (0..=self.coordinator.offset_range()).contains(&seam),
            "seam {seam}"
        );
        assert!(
            (0..=self.bottom.scroll_range()).contains(&bottom),
            "bottom {bottom}"
        );
    }
}
