use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn frame_callbacks_run_once_in_registration_order() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log = Rc::new(RefCell::new(Vec::new()));

    for label in ["a", "b"] {
        let log = Rc::clone(&log);
        handle.register_frame_callback(move |time| log.borrow_mut().push((label, time)));
    }

    assert!(handle.needs_frame());
    assert_eq!(handle.drain_frame_callbacks(16), 2);
    assert_eq!(handle.drain_frame_callbacks(32), 0);
    assert_eq!(log.borrow().as_slice(), &[("a", 16), ("b", 16)]);
    assert!(!handle.needs_frame());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let hits = Rc::new(Cell::new(0));

    {
        let handle_inner = handle.clone();
        let hits = Rc::clone(&hits);
        handle.register_frame_callback(move |_| {
            hits.set(hits.get() + 1);
            let hits = Rc::clone(&hits);
            handle_inner.register_frame_callback(move |_| hits.set(hits.get() + 10));
        });
    }

    handle.drain_frame_callbacks(0);
    assert_eq!(hits.get(), 1);
    assert!(handle.has_frame_callbacks());
    handle.drain_frame_callbacks(FRAME_NANOS_60HZ);
    assert_eq!(hits.get(), 11);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.set(true))
    };
    assert!(registration.is_active());
    drop(registration);

    runtime.handle().drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn with_frame_millis_converts_nanos() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let seen = Rc::new(Cell::new(0));
    let _registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_millis(move |millis| seen.set(millis))
    };

    runtime.handle().drain_frame_callbacks(48_000_000);
    assert_eq!(seen.get(), 48);
}

#[test]
fn posted_tasks_can_be_cancelled_before_running() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let log = Rc::clone(&log);
        handle.post(move || log.borrow_mut().push(1))
    };
    {
        let log = Rc::clone(&log);
        handle.post(move || log.borrow_mut().push(2));
    }

    assert!(handle.cancel_posted(first.unwrap_or_default()));
    assert_eq!(handle.run_posted_tasks(), 1);
    assert_eq!(log.borrow().as_slice(), &[2]);
    assert!(!handle.has_posted_tasks());
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert!(handle.post(|| {}).is_none());
    assert_eq!(handle.drain_frame_callbacks(0), 0);
}

#[test]
fn liveness_token_invalidation_is_shared() {
    let token = LivenessToken::new();
    let clone = token.clone();
    assert!(clone.is_alive());
    token.invalidate();
    assert!(!clone.is_alive());
    assert!(clone.same_as(&token));
    assert!(!clone.same_as(&LivenessToken::new()));
}

#[test]
fn rect_contains_is_half_open() {
    let rect = Rect::new(0.0, 100.0, 50.0, 20.0);
    assert!(rect.contains(Point::new(0.0, 100.0)));
    assert!(rect.contains(Point::new(49.9, 119.9)));
    assert!(!rect.contains(Point::new(10.0, 120.0)));
    assert!(!rect.contains(Point::new(50.0, 110.0)));
    assert_eq!(rect.translate(0.0, -30.0).y, 70.0);
}
