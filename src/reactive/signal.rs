use std::sync::{Arc, RwLock};

use super::invalidation::request_frame;
use super::runtime::{
    current_runtime_id, notify_signal_write, try_with_runtime, with_runtime, RuntimeId, SignalId,
};

struct SignalInner<T> {
    id: SignalId,
    /// Runtime that allocated `id`
    owner: RuntimeId,
    value: RwLock<T>,
}

/// A reactive value.
///
/// Reading a signal with [`Signal::get`] or [`Signal::with`] inside an
/// effect subscribes that effect; writing a different value re-runs every
/// subscriber and requests a frame.
///
/// # Thread Safety
/// Values can be read and written from any thread. Effects only run on the
/// thread that created the signal; writes from elsewhere update the value
/// and request a frame without notifying effects.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                owner: current_runtime_id().unwrap_or_default(),
                value: RwLock::new(value),
            }),
        }
    }

    pub fn split(self) -> (ReadSignal<T>, WriteSignal<T>) {
        (
            ReadSignal {
                inner: self.inner.clone(),
            },
            WriteSignal { inner: self.inner },
        )
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.track();
        self.inner.with_value(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with_value(f)
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.inner.track();
        self.inner.with_value(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.inner.with_value(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the signal's value using a closure, only triggering updates if the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.inner.update(f);
    }
}

impl<T> SignalInner<T> {
    fn is_local(&self) -> bool {
        current_runtime_id() == Some(self.owner)
    }

    fn track(&self) {
        if self.is_local() {
            try_with_runtime(|rt| rt.track_read(self.id));
        }
    }

    fn notify(&self) {
        if self.is_local() {
            notify_signal_write(self.id);
        }
        request_frame();
    }

    fn with_value<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        if self.is_local() {
            try_with_runtime(|rt| rt.release_signal(self.id));
        }
    }
}

impl<T: PartialEq> SignalInner<T> {
    fn set(&self, value: T) {
        let Ok(mut guard) = self.value.write() else {
            return; // Lock poisoned, skip update silently
        };
        if *guard != value {
            *guard = value;
            drop(guard);
            self.notify();
        }
    }
}

impl<T: PartialEq + Clone> SignalInner<T> {
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let Ok(mut guard) = self.value.write() else {
            return;
        };
        let old_value = guard.clone();
        f(&mut *guard);
        if *guard != old_value {
            drop(guard);
            self.notify();
        }
    }
}

/// Read-only handle to a signal.
#[derive(Clone)]
pub struct ReadSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.inner.track();
        self.inner.with_value(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.inner.with_value(T::clone)
    }
}

impl<T> ReadSignal<T> {
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.track();
        self.inner.with_value(f)
    }
}

/// Write-only handle to a signal.
#[derive(Clone)]
pub struct WriteSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T: PartialEq> WriteSignal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }
}

impl<T: PartialEq + Clone> WriteSignal<T> {
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.inner.update(f);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
