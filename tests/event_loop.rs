use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use calloop::EventLoop;
use countdown_ring::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dispatch_until<F: Fn() -> bool>(event_loop: &mut EventLoop<'static, ()>, done: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() && Instant::now() < deadline {
        event_loop
            .dispatch(Some(Duration::from_millis(10)), &mut ())
            .unwrap();
    }
}

#[test]
fn test_event_loop_drives_sequencer() {
    init_logger();
    let mut event_loop: EventLoop<'static, ()> = EventLoop::try_new().unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let sequencer = Sequencer::new();
    for value in 1..=4 {
        let log = log.clone();
        sequencer.enqueue(move || log.borrow_mut().push(value)).unwrap();
    }

    let interval = Interval::from_secs_f64(0.02).unwrap();
    sequencer
        .start(interval, &LoopScheduler::new(event_loop.handle()))
        .unwrap();
    assert_eq!(*log.borrow(), vec![1]);
    assert!(sequencer.is_armed());

    dispatch_until(&mut event_loop, || {
        sequencer.state() == SequencerState::Stopped
    });

    assert_eq!(*log.borrow(), vec![1, 2, 3, 4]);
    assert!(!sequencer.is_armed());
}

#[test]
fn test_event_loop_runs_full_countdown() {
    init_logger();
    let mut event_loop: EventLoop<'static, ()> = EventLoop::try_new().unwrap();

    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let config = RingConfig::new(vec![Color::WHITE]).countdown_interval(0.02);
    let ring = CountdownRing::new(config)
        .unwrap()
        .on_finished(move || counter.set(counter.get() + 1));

    let labels = Rc::new(RefCell::new(Vec::new()));
    let seen = labels.clone();
    let label = ring.state().label.clone();
    let _effect = create_effect(move || seen.borrow_mut().push(label.get()));

    ring.start(&LoopScheduler::new(event_loop.handle())).unwrap();
    dispatch_until(&mut event_loop, || ring.is_finished());

    assert!(ring.is_finished());
    assert_eq!(hits.get(), 1);
    assert_eq!(*labels.borrow(), vec!["Ready", "3", "2", "1"]);
    assert_eq!(ring.sequencer_state(), SequencerState::Stopped);

    // The released timer must not fire again
    event_loop
        .dispatch(Some(Duration::from_millis(50)), &mut ())
        .unwrap();
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_cancel_removes_loop_timer() {
    init_logger();
    let mut event_loop: EventLoop<'static, ()> = EventLoop::try_new().unwrap();
    let counter = Rc::new(Cell::new(0));

    let sequencer = Sequencer::new();
    for _ in 0..5 {
        let counter = counter.clone();
        sequencer
            .enqueue(move || counter.set(counter.get() + 1))
            .unwrap();
    }

    let interval = Interval::from_secs_f64(0.01).unwrap();
    sequencer
        .start(interval, &LoopScheduler::new(event_loop.handle()))
        .unwrap();
    sequencer.stop();

    event_loop
        .dispatch(Some(Duration::from_millis(50)), &mut ())
        .unwrap();
    assert_eq!(counter.get(), 1);
}
