use std::cell::Cell;
use std::rc::Rc;

use countdown_ring::reactive::create_effect;
use countdown_ring::SignalFields;

#[derive(Clone, Debug, PartialEq, SignalFields)]
struct TestState {
    count: i32,
    name: String,
}

#[test]
fn test_signal_fields_creation() {
    let signals = TestStateSignals::new(TestState {
        count: 0,
        name: "test".into(),
    });
    assert_eq!(signals.count.get(), 0);
    assert_eq!(signals.name.get(), "test");
}

#[test]
fn test_set_decomposes() {
    let signals = TestStateSignals::new(TestState {
        count: 0,
        name: "a".into(),
    });
    signals.set(TestState {
        count: 5,
        name: "a".into(),
    });
    assert_eq!(signals.count.get(), 5);
    assert_eq!(signals.name.get(), "a");
}

#[test]
fn test_set_notifies_once() {
    let signals = TestStateSignals::new(TestState {
        count: 0,
        name: "a".into(),
    });
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let observed = signals.clone();
    let _effect = create_effect(move || {
        let _ = observed.get();
        counter.set(counter.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    signals.set(TestState {
        count: 1,
        name: "b".into(),
    });
    assert_eq!(runs.get(), 2);
}

#[test]
fn test_untracked_snapshot() {
    let signals = TestStateSignals::new(TestState {
        count: 3,
        name: "x".into(),
    });
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let observed = signals.clone();
    let _effect = create_effect(move || {
        let _ = observed.get_untracked();
        counter.set(counter.get() + 1);
    });

    signals.count.set(4);
    assert_eq!(runs.get(), 1);
    assert_eq!(
        signals.get_untracked(),
        TestState {
            count: 4,
            name: "x".into()
        }
    );
}

#[test]
fn test_signals_are_clone() {
    fn assert_clone<T: Clone>() {}
    assert_clone::<TestStateSignals>();
}

#[test]
fn test_individual_field_update() {
    let signals = TestStateSignals::new(TestState {
        count: 10,
        name: "hello".into(),
    });

    signals.count.set(20);
    assert_eq!(signals.count.get(), 20);
    assert_eq!(signals.name.get(), "hello"); // unchanged
}

#[test]
fn test_clones_share_storage() {
    let signals = TestStateSignals::new(TestState {
        count: 0,
        name: "x".into(),
    });
    let other = signals.clone();
    other.set(TestState {
        count: 42,
        name: "y".into(),
    });
    assert_eq!(signals.count.get(), 42);
    assert_eq!(signals.name.get(), "y");
}

// Test with pub visibility
#[derive(Clone, PartialEq, SignalFields)]
pub struct PubState {
    pub value: u32,
}

#[test]
fn test_pub_visibility() {
    let signals = PubStateSignals::new(PubState { value: 99 });
    assert_eq!(signals.value.get(), 99);
}

// Test with Vec field
#[derive(Clone, PartialEq, SignalFields)]
struct VecState {
    items: Vec<String>,
    count: usize,
}

#[test]
fn test_vec_field() {
    let signals = VecStateSignals::new(VecState {
        items: vec!["a".into(), "b".into()],
        count: 2,
    });
    assert_eq!(signals.items.get(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(signals.count.get(), 2);

    signals.set(VecState {
        items: vec!["c".into()],
        count: 1,
    });
    assert_eq!(signals.items.get(), vec!["c".to_string()]);
    assert_eq!(signals.count.get(), 1);
}
