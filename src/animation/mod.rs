mod animatable;
mod animated;
mod spring;
mod timing;

pub use animatable::Animatable;
pub use animated::{AdvanceResult, AnimatedValue};
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;

/// Configuration for how a property should animate when it changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds (ignored by springs)
    pub duration_ms: f32,
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Spring-driven transition; runs until the spring settles
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration_ms: 1000.0,
            timing: TimingFunction::Spring(config),
            delay_ms: 0.0,
        }
    }

    /// Interpolating spring with an initial velocity, e.g. `(20.0, 10.0, 6.0)`
    /// for the default ring sweep.
    pub fn interpolating_spring(stiffness: f32, damping: f32, initial_velocity: f32) -> Self {
        Self::spring(SpringConfig::new(stiffness, damping).with_initial_velocity(initial_velocity))
    }

    /// The fade used for opacity changes
    pub fn ease_in_out() -> Self {
        Self::new(350.0, TimingFunction::EaseInOut)
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::spring(SpringConfig::RING)
    }
}
