use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RUNTIME_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
    static RUNTIME_ID: u64 = NEXT_RUNTIME_ID.fetch_add(1, Ordering::Relaxed);
}

pub type RuntimeId = u64;

/// Identifies this thread's runtime. `None` once the thread is shutting down.
pub fn current_runtime_id() -> Option<RuntimeId> {
    RUNTIME_ID.try_with(|id| *id).ok()
}

pub type SignalId = usize;
pub type EffectId = usize;

/// Dependency graph between signals and effects for the current thread.
///
/// Effect callbacks are never invoked while the runtime is borrowed: they are
/// taken out of their slot, run, and put back. This lets an effect read and
/// write signals (and create further effects) freely.
///
/// Slots of dropped signals and disposed effects are recycled.
#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: Vec<EffectId>,
    effect_callbacks: Vec<Option<Box<dyn FnMut()>>>,
    effect_alive: Vec<bool>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    free_signals: Vec<SignalId>,
    free_effects: Vec<EffectId>,
    batch_depth: usize,
    flushing: bool,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        if let Some(id) = self.free_signals.pop() {
            return id;
        }
        let id = self.signal_subscribers.len();
        self.signal_subscribers.push(HashSet::new());
        id
    }

    /// Forget a dropped signal and make its id available again.
    pub fn release_signal(&mut self, signal_id: SignalId) {
        let Some(subscribers) = self.signal_subscribers.get_mut(signal_id) else {
            return;
        };
        for effect_id in std::mem::take(subscribers) {
            self.effect_dependencies[effect_id].remove(&signal_id);
        }
        self.free_signals.push(signal_id);
    }

    pub fn allocate_effect(&mut self, callback: Box<dyn FnMut()>) -> EffectId {
        if let Some(id) = self.free_effects.pop() {
            self.effect_callbacks[id] = Some(callback);
            self.effect_alive[id] = true;
            return id;
        }
        let id = self.effect_callbacks.len();
        self.effect_callbacks.push(Some(callback));
        self.effect_alive.push(true);
        self.effect_dependencies.push(HashSet::new());
        id
    }

    /// Number of effect slots ever allocated, live or free
    pub fn effect_capacity(&self) -> usize {
        self.effect_callbacks.len()
    }

    /// Number of signal slots ever allocated, live or free
    pub fn signal_capacity(&self) -> usize {
        self.signal_subscribers.len()
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // The signal may belong to another thread's runtime
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    /// Queue every subscriber of `signal_id`. Returns true when the caller
    /// should flush now (outside any batch or running flush).
    pub fn notify_write(&mut self, signal_id: SignalId) -> bool {
        if signal_id >= self.signal_subscribers.len() {
            return false;
        }

        let mut subscribers: Vec<_> = self.signal_subscribers[signal_id].iter().copied().collect();
        subscribers.sort_unstable();
        for effect_id in subscribers {
            if !self.pending_effects.contains(&effect_id) {
                self.pending_effects.push(effect_id);
            }
        }

        self.batch_depth == 0 && !self.flushing
    }

    fn begin_effect(&mut self, effect_id: EffectId) -> Option<(Box<dyn FnMut()>, Option<EffectId>)> {
        if !self.effect_alive.get(effect_id).copied().unwrap_or(false) {
            return None;
        }

        // Dependencies are rebuilt on every run
        let old_deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in old_deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }

        let callback = self.effect_callbacks[effect_id].take()?;
        let prev_effect = self.current_effect.replace(effect_id);
        Some((callback, prev_effect))
    }

    fn end_effect(
        &mut self,
        effect_id: EffectId,
        callback: Box<dyn FnMut()>,
        prev_effect: Option<EffectId>,
    ) {
        self.current_effect = prev_effect;
        // A disposed slot may already hold a newer effect
        if self.effect_alive[effect_id] && self.effect_callbacks[effect_id].is_none() {
            self.effect_callbacks[effect_id] = Some(callback);
        }
    }

    /// Unsubscribe an effect and free its slot. The callback is handed back
    /// so captured signals are dropped outside the runtime borrow.
    pub fn dispose_effect(&mut self, effect_id: EffectId) -> Option<Box<dyn FnMut()>> {
        if !self.effect_alive[effect_id] {
            return None;
        }
        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            if signal_id < self.signal_subscribers.len() {
                self.signal_subscribers[signal_id].remove(&effect_id);
            }
        }
        self.effect_alive[effect_id] = false;
        self.pending_effects.retain(|id| *id != effect_id);
        self.free_effects.push(effect_id);
        self.effect_callbacks[effect_id].take()
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is not already borrowed or torn down.
pub fn try_with_runtime<F>(f: F)
where
    F: FnOnce(&mut Runtime),
{
    let _ = RUNTIME.try_with(|rt| {
        if let Ok(mut runtime) = rt.try_borrow_mut() {
            f(&mut runtime);
        }
    });
}

/// Run a single effect with dependency tracking.
pub fn run_effect(effect_id: EffectId) {
    let Some((mut callback, prev_effect)) = with_runtime(|rt| rt.begin_effect(effect_id)) else {
        return;
    };

    callback();

    with_runtime(|rt| rt.end_effect(effect_id, callback, prev_effect));
}

/// Run queued effects until the queue is empty.
pub fn flush_effects() {
    let already_flushing = with_runtime(|rt| std::mem::replace(&mut rt.flushing, true));
    if already_flushing {
        return;
    }

    loop {
        let next = with_runtime(|rt| {
            if rt.pending_effects.is_empty() {
                None
            } else {
                Some(rt.pending_effects.remove(0))
            }
        });
        match next {
            Some(effect_id) => run_effect(effect_id),
            None => break,
        }
    }

    with_runtime(|rt| rt.flushing = false);
}

/// Notify subscribers of a changed signal and flush if not batching.
pub fn notify_signal_write(signal_id: SignalId) {
    let mut should_flush = false;
    try_with_runtime(|rt| should_flush = rt.notify_write(signal_id));
    if should_flush {
        flush_effects();
    }
}

/// Group several signal writes so dependent effects run once, afterwards.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let should_flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0 && !rt.flushing
    });

    if should_flush {
        flush_effects();
    }

    result
}
