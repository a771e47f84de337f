//! An animated "Ready, 3, 2, 1" countdown ring.
//!
//! A [`Sequencer`](sequencer::Sequencer) applies one state transformation per
//! timer tick to a reactive [`RingState`](countdown::RingState) store. Hosts
//! observe the store with effects and draw the ring from
//! [`RingFrame`](renderer::RingFrame), a CPU-side description that uploads
//! straight into a wgpu vertex buffer.
//!
//! ```ignore
//! use countdown_ring::prelude::*;
//!
//! let mut event_loop: EventLoop<()> = EventLoop::try_new()?;
//! let ring = CountdownRing::new(RingConfig::new(vec![Color::from_hex(0xFF2D55)]))?
//!     .on_finished(|| log::info!("go!"));
//! ring.start(&LoopScheduler::new(event_loop.handle()))?;
//! while !ring.is_finished() {
//!     event_loop.dispatch(None, &mut ())?;
//! }
//! ```

// Lets the derive macro's `::countdown_ring` paths resolve inside this crate
extern crate self as countdown_ring;

pub mod animation;
pub mod countdown;
pub mod error;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod ring;
pub mod sequencer;
pub mod style;

pub use countdown_ring_macros::SignalFields;
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{SpringConfig, TimingFunction, Transition};
    pub use crate::countdown::{
        CountdownPhase, CountdownRing, RingAnimator, RingConfig, RingState, RingStateSignals,
    };
    pub use crate::error::{Error, Result};
    pub use crate::layout::{Point, Rect, Size};
    pub use crate::reactive::{
        batch, create_effect, create_signal, ChangeFlags, Effect, ReadSignal, Signal, WriteSignal,
    };
    pub use crate::renderer::{RingFrame, Vertex};
    pub use crate::sequencer::{
        Interval, LoopScheduler, ManualScheduler, Scheduler, Sequencer, SequencerState,
    };
    pub use crate::style::{Color, GradientDirection, LinearGradient};
    pub use crate::SignalFields;
}
