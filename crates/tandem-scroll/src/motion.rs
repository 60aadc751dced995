//! Frame-by-frame driver shared by fling and smooth scroll.
//!
//! A run samples an integer position from its curve every frame, hands the
//! delta since the previous frame to `on_step`, and reschedules itself for the
//! next frame until the curve ends or `on_step` reports that nothing along the
//! dispatch chain moved. Each run owns a [`LivenessToken`]; cancelling
//! invalidates it so a callback already queued for the next frame does nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tandem_core::{FrameCallbackRegistration, FrameClock, LivenessToken, RuntimeHandle};

pub(crate) trait MotionCurve {
    /// Integer offset from the run origin after `elapsed_nanos`, and whether
    /// the curve has reached its end.
    fn sample(&self, elapsed_nanos: u64) -> (i32, bool);
}

/// Why a run stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEnd {
    Finished,
    /// A whole frame's delta was refused.
    HitBoundary,
}

struct MotionRun {
    curve: Box<dyn MotionCurve>,
    start_nanos: Cell<Option<u64>>,
    applied: Cell<i32>,
    token: LivenessToken,
    on_step: Box<dyn Fn(i32) -> i32>,
    on_end: RefCell<Option<Box<dyn FnOnce(MotionEnd)>>>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
}

impl MotionRun {
    fn finish(&self, end: MotionEnd) {
        self.token.invalidate();
        let on_end = self.on_end.borrow_mut().take();
        if let Some(on_end) = on_end {
            on_end(end);
        }
    }
}

fn schedule(run: Rc<MotionRun>, clock: FrameClock) -> bool {
    let next_run = Rc::clone(&run);
    let next_clock = clock.clone();
    let registration = clock.with_frame_nanos(move |frame_time_nanos| {
        step(next_run, next_clock, frame_time_nanos);
    });
    let active = registration.is_active();
    *run.registration.borrow_mut() = Some(registration);
    active
}

fn step(run: Rc<MotionRun>, clock: FrameClock, frame_time_nanos: u64) {
    if !run.token.is_alive() {
        return;
    }
    let start = match run.start_nanos.get() {
        Some(start) => start,
        None => {
            run.start_nanos.set(Some(frame_time_nanos));
            frame_time_nanos
        }
    };
    let (position, finished) = run.curve.sample(frame_time_nanos.saturating_sub(start));
    let delta = position - run.applied.get();
    run.applied.set(position);

    let consumed = if delta != 0 { (run.on_step)(delta) } else { 0 };
    if !run.token.is_alive() {
        // `on_step` cancelled or replaced this run.
        return;
    }
    log::trace!("motion step delta={} consumed={}", delta, consumed);

    if finished {
        run.finish(MotionEnd::Finished);
    } else if delta != 0 && consumed == 0 {
        run.finish(MotionEnd::HitBoundary);
    } else if !schedule(Rc::clone(&run), clock) {
        run.finish(MotionEnd::Finished);
    }
}

pub(crate) struct MotionDriver {
    frame_clock: FrameClock,
    current: RefCell<Option<Rc<MotionRun>>>,
}

impl MotionDriver {
    pub(crate) fn new(runtime: RuntimeHandle) -> Self {
        Self {
            frame_clock: runtime.frame_clock(),
            current: RefCell::new(None),
        }
    }

    /// Cancels any current run and starts `curve`. Returns `false` when no
    /// frame could be scheduled; `on_end` is then never called.
    pub(crate) fn start(
        &self,
        curve: impl MotionCurve + 'static,
        on_step: impl Fn(i32) -> i32 + 'static,
        on_end: impl FnOnce(MotionEnd) + 'static,
    ) -> bool {
        self.cancel();
        let run = Rc::new(MotionRun {
            curve: Box::new(curve),
            start_nanos: Cell::new(None),
            applied: Cell::new(0),
            token: LivenessToken::new(),
            on_step: Box::new(on_step),
            on_end: RefCell::new(Some(Box::new(on_end))),
            registration: RefCell::new(None),
        });
        *self.current.borrow_mut() = Some(Rc::clone(&run));
        if schedule(Rc::clone(&run), self.frame_clock.clone()) {
            return true;
        }
        run.token.invalidate();
        self.current.borrow_mut().take();
        false
    }

    /// Stops the current run without calling its `on_end`. Returns whether a
    /// run was live.
    pub(crate) fn cancel(&self) -> bool {
        let Some(run) = self.current.borrow_mut().take() else {
            return false;
        };
        let was_live = run.token.is_alive();
        run.token.invalidate();
        let registration = run.registration.borrow_mut().take();
        drop(registration);
        was_live
    }

    pub(crate) fn is_running(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|run| run.token.is_alive())
    }
}
