//! The countdown ring component.
//!
//! [`CountdownRing`] owns a [`RingStateSignals`] store and a [`Sequencer`]
//! loaded with the seven [`CountdownPhase`]s. The host calls
//! [`CountdownRing::start`] once, observes the store with effects, and
//! draws [`CountdownRing::frame`] (optionally smoothed by a [`RingAnimator`]).
//!
//! ```ignore
//! let ring = CountdownRing::new(RingConfig::new(vec![Color::from_hex(0xFF2D55)]))?
//!     .on_finished(|| log::info!("go"));
//! let state = ring.state().clone();
//! let _effect = create_effect(move || println!("{}", state.label.get()));
//! ring.start(&LoopScheduler::new(event_loop.handle()))?;
//! ```

mod animator;
mod completion;
mod config;
mod phase;

pub use animator::RingAnimator;
pub use completion::Completion;
pub use config::RingConfig;
pub use phase::CountdownPhase;

use crate::error::{Error, Result};
use crate::layout::Size;
use crate::renderer::RingFrame;
use crate::sequencer::{Interval, Scheduler, Sequencer, SequencerState};
use crate::SignalFields;

/// Render targets of the ring at one point of the countdown.
#[derive(Clone, Debug, PartialEq, SignalFields)]
pub struct RingState {
    /// Sweep of the progress ring, 0 to 360
    pub degrees: f32,
    pub label: String,
    /// Label opacity, 0 to 1
    pub alpha: f32,
    /// Label size relative to its full size
    pub text_factor: f32,
    /// Stroke width relative to its full width, 0 to 1
    pub shrink: f32,
    pub finished: bool,
}

impl Default for RingState {
    fn default() -> Self {
        Self {
            degrees: 1.0,
            label: "Ready".to_string(),
            alpha: 1.0,
            text_factor: 0.5,
            shrink: 1.0,
            finished: false,
        }
    }
}

/// An animated "Ready, 3, 2, 1" countdown ring.
pub struct CountdownRing {
    config: RingConfig,
    interval: Interval,
    state: RingStateSignals,
    sequencer: Sequencer,
    completion: Completion,
}

impl CountdownRing {
    /// Validate `config` and build an idle countdown.
    pub fn new(config: RingConfig) -> Result<Self> {
        let interval = config.validate()?;
        Ok(Self {
            config,
            interval,
            state: RingStateSignals::new(RingState::default()),
            sequencer: Sequencer::new(),
            completion: Completion::new(),
        })
    }

    /// Run `callback` once, on the final step.
    pub fn on_finished<F: FnOnce() + 'static>(self, callback: F) -> Self {
        self.completion.set(callback);
        self
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The observable render targets
    pub fn state(&self) -> &RingStateSignals {
        &self.state
    }

    /// Current targets without subscribing the running effect
    pub fn snapshot(&self) -> RingState {
        self.state.get_untracked()
    }

    /// Queue the countdown phases and apply the first one immediately.
    ///
    /// May only be called once; later calls return [`Error::AlreadyStarted`].
    pub fn start<S: Scheduler + ?Sized>(&self, scheduler: &S) -> Result<()> {
        if self.sequencer.state() != SequencerState::Idle {
            return Err(Error::AlreadyStarted);
        }

        for phase in CountdownPhase::ALL {
            let state = self.state.clone();
            let completion = self.completion.clone();
            self.sequencer.enqueue(move || {
                log::debug!("countdown phase {:?}", phase);
                phase.apply(&state);
                if phase == CountdownPhase::Finished {
                    log::info!("countdown finished");
                    completion.fire();
                }
            })?;
        }

        log::info!(
            "starting countdown, {} phases every {:?}",
            CountdownPhase::ALL.len(),
            self.interval.as_duration()
        );
        self.sequencer.start(self.interval, scheduler)
    }

    /// Stop the countdown where it is. Remaining phases never run.
    pub fn cancel(&self) {
        self.sequencer.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished.get_untracked()
    }

    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Render description of the current targets at `size`.
    pub fn frame(&self, size: Size) -> RingFrame {
        RingFrame::new(size, &self.config, &self.snapshot())
    }
}

impl Drop for CountdownRing {
    fn drop(&mut self) {
        self.sequencer.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::sequencer::ManualScheduler;
    use crate::style::Color;

    fn ring() -> CountdownRing {
        CountdownRing::new(RingConfig::new(vec![Color::WHITE])).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ring = ring();
        assert_eq!(ring.snapshot(), RingState::default());
        assert_eq!(ring.sequencer_state(), SequencerState::Idle);
        assert!(!ring.is_finished());
    }

    #[test]
    fn test_rejects_bad_interval() {
        let config = RingConfig::new(vec![Color::WHITE]).countdown_interval(0.0);
        assert!(matches!(
            CountdownRing::new(config),
            Err(Error::InvalidInterval(_))
        ));

        let config = RingConfig::new(vec![Color::WHITE]).countdown_interval(1e20);
        assert!(matches!(
            CountdownRing::new(config),
            Err(Error::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_runs_to_completion() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let ring = ring().on_finished(move || counter.set(counter.get() + 1));
        let scheduler = ManualScheduler::new();

        ring.start(&scheduler).unwrap();
        assert_eq!(ring.snapshot().label, "Ready");

        scheduler.advance(6);
        assert!(ring.is_finished());
        assert_eq!(hits.get(), 1);
        assert_eq!(ring.sequencer_state(), SequencerState::Stopped);
        assert_eq!(scheduler.armed(), 0);

        scheduler.advance(3);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let ring = ring();
        let scheduler = ManualScheduler::new();
        ring.start(&scheduler).unwrap();
        assert!(matches!(ring.start(&scheduler), Err(Error::AlreadyStarted)));
    }

    #[test]
    fn test_cancel_freezes_state() {
        let ring = ring();
        let scheduler = ManualScheduler::new();
        ring.start(&scheduler).unwrap();
        scheduler.advance(2);
        ring.cancel();
        scheduler.advance(5);

        assert_eq!(ring.snapshot().label, "3");
        assert!(!ring.is_finished());
    }
}
