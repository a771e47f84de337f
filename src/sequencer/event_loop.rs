use std::cell::Cell;
use std::rc::Rc;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

use super::{Interval, Scheduler, TickAction, TickCallback, TimerHandle};
use crate::error::Result;

/// Schedules sequencer ticks as timer sources on a calloop event loop.
pub struct LoopScheduler<D: 'static> {
    handle: LoopHandle<'static, D>,
}

impl<D: 'static> LoopScheduler<D> {
    pub fn new(handle: LoopHandle<'static, D>) -> Self {
        Self { handle }
    }
}

impl<D: 'static> Clone for LoopScheduler<D> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

#[derive(Default)]
struct TimerFlags {
    cancelled: Cell<bool>,
    dispatching: Cell<bool>,
}

impl<D: 'static> Scheduler for LoopScheduler<D> {
    fn schedule_repeating(
        &self,
        interval: Interval,
        mut on_tick: TickCallback,
    ) -> Result<Box<dyn TimerHandle>> {
        let period = interval.as_duration();
        let flags = Rc::new(TimerFlags::default());
        let timer_flags = flags.clone();

        let token = self
            .handle
            .insert_source(
                Timer::from_duration(period),
                move |deadline, _, _data: &mut D| {
                    if timer_flags.cancelled.get() {
                        return TimeoutAction::Drop;
                    }

                    timer_flags.dispatching.set(true);
                    let action = on_tick();
                    timer_flags.dispatching.set(false);

                    if action == TickAction::Stop || timer_flags.cancelled.get() {
                        timer_flags.cancelled.set(true);
                        log::debug!("releasing sequencer timer");
                        TimeoutAction::Drop
                    } else {
                        // Reschedule from the deadline so the cadence does not drift
                        TimeoutAction::ToInstant(deadline + period)
                    }
                },
            )
            .map_err(|err| err.error)?;

        log::debug!("armed sequencer timer every {:?}", period);

        Ok(Box::new(LoopTimer {
            handle: self.handle.clone(),
            token: Some(token),
            flags,
        }))
    }
}

struct LoopTimer<D: 'static> {
    handle: LoopHandle<'static, D>,
    token: Option<RegistrationToken>,
    flags: Rc<TimerFlags>,
}

impl<D: 'static> TimerHandle for LoopTimer<D> {
    fn cancel(&mut self) {
        let already_cancelled = self.flags.cancelled.replace(true);
        let Some(token) = self.token.take() else {
            return;
        };

        // Inside its own dispatch the callback returns Drop instead
        if !already_cancelled && !self.flags.dispatching.get() {
            self.handle.remove(token);
        }
    }

    fn is_armed(&self) -> bool {
        !self.flags.cancelled.get()
    }
}
