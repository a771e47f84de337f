use super::runtime::{run_effect, with_runtime, EffectId};

/// A side effect that re-runs whenever a signal it read changes.
///
/// The effect is disposed when this handle is dropped.
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let id = with_runtime(|rt| rt.allocate_effect(Box::new(f)));
        run_effect(id);

        Self { id }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        let callback = with_runtime(|rt| rt.dispose_effect(self.id));
        drop(callback);
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::{batch, create_signal};

    #[test]
    fn test_slots_are_recycled() {
        let signal = create_signal(0);
        let source = signal.clone();
        drop(create_effect(move || {
            source.get();
        }));
        drop(signal);

        let effects = with_runtime(|rt| rt.effect_capacity());
        let signals = with_runtime(|rt| rt.signal_capacity());

        for value in 0..10 {
            let signal = create_signal(value);
            let source = signal.clone();
            let _effect = create_effect(move || {
                source.get();
            });
            signal.set(value + 1);
        }

        assert_eq!(with_runtime(|rt| rt.effect_capacity()), effects);
        assert_eq!(with_runtime(|rt| rt.signal_capacity()), signals);
    }

    #[test]
    fn test_recycled_signal_does_not_wake_old_subscriber() {
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let slot = Rc::new(RefCell::new(Some(create_signal(0))));
        let reader = slot.clone();
        let _effect = create_effect(move || {
            if let Some(signal) = reader.borrow().as_ref() {
                signal.get();
            }
            *counter.borrow_mut() += 1;
        });

        // Last handle gone, its id goes back to the runtime
        slot.borrow_mut().take();

        let fresh = create_signal(0);
        fresh.set(1);
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_effect_runs_immediately() {
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let _effect = create_effect(move || *counter.borrow_mut() += 1);
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_effect_reruns_on_dependency_change() {
        let signal = create_signal(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let source = signal.clone();
        let _effect = create_effect(move || log.borrow_mut().push(source.get()));

        signal.set(2);
        signal.set(2);
        signal.set(3);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_untracked_read_does_not_subscribe() {
        let signal = create_signal(1);
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let source = signal.clone();
        let _effect = create_effect(move || {
            source.get_untracked();
            *counter.borrow_mut() += 1;
        });

        signal.set(5);
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_batch_runs_effect_once() {
        let a = create_signal(0);
        let b = create_signal(0);
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let (ra, rb) = (a.clone(), b.clone());
        let _effect = create_effect(move || {
            ra.get();
            rb.get();
            *counter.borrow_mut() += 1;
        });

        batch(|| {
            a.set(1);
            b.set(1);
        });

        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn test_dropped_effect_stops_running() {
        let signal = create_signal(0);
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let source = signal.clone();
        let effect = create_effect(move || {
            source.get();
            *counter.borrow_mut() += 1;
        });

        drop(effect);
        signal.set(1);
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_effect_may_write_other_signals() {
        let source = create_signal(1);
        let doubled = create_signal(0);
        let (input, output) = (source.clone(), doubled.clone());
        let _effect = create_effect(move || output.set(input.get() * 2));

        source.set(4);
        assert_eq!(doubled.get(), 8);
    }
}
