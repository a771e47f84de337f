use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Interval, Scheduler, TickAction, TickCallback, TimerHandle};
use crate::error::Result;

struct ManualTimer {
    interval: Interval,
    callback: Option<TickCallback>,
    armed: Rc<Cell<bool>>,
}

/// A scheduler whose timers only fire when told to.
///
/// Every call to [`ManualScheduler::fire`] counts as one elapsed interval
/// for each armed timer, regardless of the interval it was armed with.
/// Useful for tests and for hosts that drive the countdown from their own
/// frame clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Rc<RefCell<Vec<ManualTimer>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every armed timer once. Returns how many fired.
    pub fn fire(&self) -> usize {
        let count = self.timers.borrow().len();
        let mut fired = 0;

        for index in 0..count {
            let taken = {
                let mut timers = self.timers.borrow_mut();
                let timer = &mut timers[index];
                if timer.armed.get() {
                    timer.callback.take().map(|cb| (cb, timer.armed.clone()))
                } else {
                    None
                }
            };

            let Some((mut callback, armed)) = taken else {
                continue;
            };

            fired += 1;
            if callback() == TickAction::Stop {
                armed.set(false);
            }

            if armed.get() {
                self.timers.borrow_mut()[index].callback = Some(callback);
            }
        }

        fired
    }

    /// Fire `ticks` times.
    pub fn advance(&self, ticks: usize) {
        for _ in 0..ticks {
            self.fire();
        }
    }

    /// Number of timers currently armed
    pub fn armed(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|timer| timer.armed.get())
            .count()
    }

    /// Number of timers ever scheduled
    pub fn timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Interval of the most recently scheduled timer
    pub fn last_interval(&self) -> Option<Interval> {
        self.timers.borrow().last().map(|timer| timer.interval)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(
        &self,
        interval: Interval,
        on_tick: TickCallback,
    ) -> Result<Box<dyn TimerHandle>> {
        let armed = Rc::new(Cell::new(true));
        self.timers.borrow_mut().push(ManualTimer {
            interval,
            callback: Some(on_tick),
            armed: armed.clone(),
        });
        Ok(Box::new(ManualTimerHandle { armed }))
    }
}

struct ManualTimerHandle {
    armed: Rc<Cell<bool>>,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&mut self) {
        self.armed.set(false);
    }

    fn is_armed(&self) -> bool {
        self.armed.get()
    }
}
