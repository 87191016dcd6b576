use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn drain_runs_callbacks_in_registration_order() {
    let runtime = RuntimeHandle::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for label in ["a", "b", "c"] {
        let log = Rc::clone(&log);
        runtime.register_frame_callback(move |time| log.borrow_mut().push((label, time)));
    }

    assert_eq!(runtime.drain_frame_callbacks(16), 3);
    assert_eq!(*log.borrow(), vec![("a", 16), ("b", 16), ("c", 16)]);
    assert!(!runtime.has_pending_frame_callbacks());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = RuntimeHandle::new();
    let hits = Rc::new(Cell::new(0));
    {
        let runtime_inner = runtime.clone();
        let hits = Rc::clone(&hits);
        runtime.register_frame_callback(move |_| {
            hits.set(hits.get() + 1);
            let hits = Rc::clone(&hits);
            runtime_inner.register_frame_callback(move |_| hits.set(hits.get() + 10));
        });
    }

    runtime.drain_frame_callbacks(1);
    assert_eq!(hits.get(), 1);
    assert!(runtime.has_pending_frame_callbacks());

    runtime.drain_frame_callbacks(2);
    assert_eq!(hits.get(), 11);
}

#[test]
fn cancelled_callback_never_runs() {
    let runtime = RuntimeHandle::new();
    let ran = Rc::new(Cell::new(false));
    let id = {
        let ran = Rc::clone(&ran);
        runtime
            .register_frame_callback(move |_| ran.set(true))
            .expect("runtime is live")
    };
    runtime.cancel_frame_callback(id);
    runtime.cancel_frame_callback(id + 100);

    assert_eq!(runtime.drain_frame_callbacks(0), 0);
    assert!(!ran.get());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = RuntimeHandle::new();
    let ran = Rc::new(Cell::new(false));
    {
        let ran = Rc::clone(&ran);
        let registration = runtime.frame_clock().with_frame_nanos(move |_| ran.set(true));
        assert!(registration.is_active());
    }
    runtime.drain_frame_callbacks(0);
    assert!(!ran.get());
}

#[test]
fn disposed_runtime_refuses_registrations() {
    let runtime = RuntimeHandle::new();
    let ran = Rc::new(Cell::new(false));
    {
        let ran = Rc::clone(&ran);
        runtime.register_frame_callback(move |_| ran.set(true));
    }
    runtime.dispose();

    assert!(runtime.is_disposed());
    assert!(runtime.register_frame_callback(|_| {}).is_none());
    let registration = runtime.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert_eq!(runtime.drain_frame_callbacks(0), 0);
    assert!(!ran.get());
}

#[test]
fn frame_waker_fires_on_registration() {
    let runtime = RuntimeHandle::new();
    let wakes = Rc::new(Cell::new(0));
    {
        let wakes = Rc::clone(&wakes);
        runtime.set_frame_waker(move || wakes.set(wakes.get() + 1));
    }
    runtime.register_frame_callback(|_| {});
    runtime.register_frame_callback(|_| {});
    assert_eq!(wakes.get(), 2);

    runtime.clear_frame_waker();
    runtime.register_frame_callback(|_| {});
    assert_eq!(wakes.get(), 2);
}

#[test]
fn frame_millis_converts_from_nanos() {
    let runtime = RuntimeHandle::new();
    let seen = Rc::new(Cell::new(0u64));
    let _registration = {
        let seen = Rc::clone(&seen);
        runtime.frame_clock().with_frame_millis(move |ms| seen.set(ms))
    };
    runtime.drain_frame_callbacks(33_333_333);
    assert_eq!(seen.get(), 33);
}
