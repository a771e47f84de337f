use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Box<dyn FnOnce()>;

/// One-shot completion notification.
///
/// Clones share the same slot; whichever clone fires first runs the
/// callback, later calls do nothing.
#[derive(Clone, Default)]
pub struct Completion {
    callback: Rc<RefCell<Option<Callback>>>,
    fired: Rc<Cell<bool>>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback, replacing any earlier one. Runs immediately
    /// if the completion already fired.
    pub fn set<F: FnOnce() + 'static>(&self, callback: F) {
        if self.fired.get() {
            callback();
            return;
        }
        *self.callback.borrow_mut() = Some(Box::new(callback));
    }

    /// Fire once. Returns false if it had already fired.
    pub fn fire(&self) -> bool {
        if self.fired.replace(true) {
            return false;
        }
        let callback = self.callback.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
