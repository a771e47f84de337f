//! Timed execution of an ordered list of state transformations.
//!
//! A [`Sequencer`] holds a FIFO of zero-argument closures. [`Sequencer::start`]
//! runs the first one immediately, then arms a single repeating timer that
//! runs one more per tick. The timer is released as soon as the queue is
//! exhausted, and the sequencer never runs again.
//!
//! Timers come from a [`Scheduler`]: [`LoopScheduler`] registers them on a
//! calloop event loop, [`ManualScheduler`] fires them on demand.
//!
//! ## Example
//!
//! ```ignore
//! let sequencer = Sequencer::new();
//! sequencer.enqueue(move || label.set("3".into()))?;
//! sequencer.enqueue(move || label.set("2".into()))?;
//! sequencer.start(Interval::from_secs_f64(1.0)?, &LoopScheduler::new(handle))?;
//! ```

mod event_loop;
mod manual;

pub use event_loop::LoopScheduler;
pub use manual::ManualScheduler;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::error::{Error, Result};

/// A deferred state mutation. Consumed when executed.
pub type Transformation = Box<dyn FnOnce()>;

/// Callback invoked by a scheduler on every timer expiry.
pub type TickCallback = Box<dyn FnMut() -> TickAction>;

/// What the timer should do after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
    /// Keep firing at the same interval
    Continue,
    /// Release the timer
    Stop,
}

/// Lifecycle of a [`Sequencer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Accepting transformations, no timer
    Idle,
    /// Timer armed, transformations pending
    Running,
    /// Exhausted or stopped. Terminal.
    Stopped,
}

/// Delay between two consecutive transformations. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval(Duration);

impl Interval {
    /// Validate an interval given in seconds.
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(Error::InvalidInterval(secs));
        }
        match Duration::try_from_secs_f64(secs) {
            // Below one nanosecond rounds to zero
            Ok(duration) if !duration.is_zero() => Ok(Self(duration)),
            _ => Err(Error::InvalidInterval(secs)),
        }
    }

    pub fn new(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(Error::InvalidInterval(duration.as_secs_f64()));
        }
        Ok(Self(duration))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(Duration::from_millis(300))
    }
}

/// A source of repeating timers.
pub trait Scheduler {
    /// Arm a timer calling `on_tick` every `interval` until it returns
    /// [`TickAction::Stop`] or the returned handle is cancelled.
    fn schedule_repeating(
        &self,
        interval: Interval,
        on_tick: TickCallback,
    ) -> Result<Box<dyn TimerHandle>>;
}

/// Ownership of an armed timer.
pub trait TimerHandle {
    /// Release the timer. Idempotent.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;
}

struct SequencerInner {
    sequence: VecDeque<Transformation>,
    state: SequencerState,
    timer: Option<Box<dyn TimerHandle>>,
    executed: usize,
}

impl Drop for SequencerInner {
    fn drop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

/// Runs queued transformations one per timer tick.
///
/// Cloning yields another handle to the same queue, so transformations can
/// capture the sequencer that runs them.
#[derive(Clone)]
pub struct Sequencer {
    inner: Rc<RefCell<SequencerInner>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SequencerInner {
                sequence: VecDeque::new(),
                state: SequencerState::Idle,
                timer: None,
                executed: 0,
            })),
        }
    }

    /// Append a transformation. Only allowed before [`Sequencer::start`].
    pub fn enqueue<F>(&self, transformation: F) -> Result<()>
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        if inner.state != SequencerState::Idle {
            log::warn!("rejecting transformation enqueued after start");
            return Err(Error::AlreadyStarted);
        }
        inner.sequence.push_back(Box::new(transformation));
        Ok(())
    }

    /// Run the first transformation now and the rest one per `interval`.
    ///
    /// An empty sequencer goes straight to [`SequencerState::Stopped`]
    /// without arming a timer.
    pub fn start<S: Scheduler + ?Sized>(&self, interval: Interval, scheduler: &S) -> Result<()> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state != SequencerState::Idle {
                return Err(Error::AlreadyStarted);
            }
            if inner.sequence.is_empty() {
                log::debug!("sequencer started empty, stopping");
                inner.state = SequencerState::Stopped;
                return Ok(());
            }
            inner.state = SequencerState::Running;
            log::debug!(
                "starting sequencer: {} transformations, interval {:?}",
                inner.sequence.len(),
                interval.as_duration()
            );
        }

        if self.perform_next() == TickAction::Stop {
            return Ok(());
        }

        let weak = Rc::downgrade(&self.inner);
        let handle = scheduler.schedule_repeating(interval, Box::new(move || tick_weak(&weak)));
        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                self.stop();
                return Err(err);
            }
        };

        let mut inner = self.inner.borrow_mut();
        if inner.state == SequencerState::Running {
            inner.timer = Some(handle);
        } else {
            drop(inner);
            let mut handle = handle;
            handle.cancel();
        }
        Ok(())
    }

    /// Handle one timer expiry. A no-op unless running.
    pub fn tick(&self) -> TickAction {
        if self.state() != SequencerState::Running {
            return TickAction::Stop;
        }
        self.perform_next()
    }

    /// Cancel the timer and drop every pending transformation. Idempotent.
    pub fn stop(&self) {
        let (timer, pending) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == SequencerState::Stopped && inner.timer.is_none() {
                return;
            }
            inner.state = SequencerState::Stopped;
            (inner.timer.take(), std::mem::take(&mut inner.sequence))
        };

        log::debug!("sequencer stopped, {} transformations discarded", pending.len());

        if let Some(mut timer) = timer {
            timer.cancel();
        }
        // Dropped outside the borrow: captured values may call back in
        drop(pending);
    }

    pub fn state(&self) -> SequencerState {
        self.inner.borrow().state
    }

    /// Number of transformations still waiting to run
    pub fn pending(&self) -> usize {
        self.inner.borrow().sequence.len()
    }

    /// Number of transformations run so far
    pub fn executed(&self) -> usize {
        self.inner.borrow().executed
    }

    pub fn is_armed(&self) -> bool {
        self.inner
            .borrow()
            .timer
            .as_ref()
            .is_some_and(|timer| timer.is_armed())
    }

    /// Remove the next transformation, release the borrow, then run it.
    fn perform_next(&self) -> TickAction {
        let next = self.inner.borrow_mut().sequence.pop_front();
        let Some(transformation) = next else {
            self.stop();
            return TickAction::Stop;
        };

        transformation();

        let exhausted = {
            let mut inner = self.inner.borrow_mut();
            inner.executed += 1;
            inner.state != SequencerState::Running || inner.sequence.is_empty()
        };

        if exhausted {
            self.stop();
            TickAction::Stop
        } else {
            TickAction::Continue
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

fn tick_weak(inner: &Weak<RefCell<SequencerInner>>) -> TickAction {
    match inner.upgrade() {
        Some(inner) => Sequencer { inner }.tick(),
        None => TickAction::Stop,
    }
}
