use std::cell::Cell;
use tandem_core::{Runtime, RuntimeHandle, FRAME_NANOS_60HZ};

/// Owns a [`Runtime`] and steps it one 60Hz frame at a time.
///
/// Frame times start at zero and advance by [`FRAME_NANOS_60HZ`] per
/// [`advance_frame`](Self::advance_frame), so animations see a steady clock.
pub struct ScrollTestRule {
    runtime: Runtime,
    frame_time_nanos: Cell<u64>,
}

impl ScrollTestRule {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            frame_time_nanos: Cell::new(0),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos.get()
    }

    /// Runs the callbacks queued for the next frame. Returns how many ran.
    pub fn advance_frame(&self) -> usize {
        let time = self.frame_time_nanos.get() + FRAME_NANOS_60HZ;
        self.frame_time_nanos.set(time);
        self.runtime.handle().drain_frame_callbacks(time)
    }

    /// Runs tasks posted so far, e.g. pending layout checks.
    pub fn run_posted_tasks(&self) -> usize {
        self.runtime.handle().run_posted_tasks()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    /// Advances frames until nothing is scheduled. Returns the number of
    /// frames stepped.
    ///
    /// Panics after `max_frames`, which in a test means an animation never
    /// settles.
    pub fn pump_frames(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.has_frame_callbacks() {
            if frames >= max_frames {
                panic!("animation still running after {} frames", max_frames);
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }
}

impl Default for ScrollTestRule {
    fn default() -> Self {
        Self::new()
    }
}
