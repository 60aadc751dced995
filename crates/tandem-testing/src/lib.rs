//! Test doubles for the tandem scroll crates.
//!
//! Nothing here renders: surfaces are plain cells, list regions scroll over a
//! vector of item heights, and [`ScrollTestRule`] steps frames by hand.

mod harness;
mod list;
mod surface;
pub mod touch;

pub use harness::ScrollTestRule;
pub use list::FakeListRegion;
pub use surface::FakeSurface;

#[cfg(test)]
#[path = "tests/fake_tests.rs"]
mod tests;
