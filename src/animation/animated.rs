use std::time::Instant;

use super::{Animatable, SpringState, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    NoChange,
    Changed(T),
}

impl<T> AdvanceResult<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// A value that eases toward its latest target.
///
/// Hosts push discrete targets with [`AnimatedValue::animate_to`] and sample
/// the in-between value once per frame with [`AnimatedValue::advance_at`].
pub struct AnimatedValue<T: Animatable> {
    current: T,
    target: T,
    start: T,
    /// 0.0 to 1.0; springs stay below 1.0 until settled
    progress: f32,
    start_time: Instant,
    transition: Transition,
    spring_state: Option<SpringState>,
}

impl<T: Animatable> AnimatedValue<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0,
            start_time: Instant::now(),
            transition,
            spring_state: None,
        }
    }

    /// Start animating to a new target value from the current one.
    pub fn animate_to(&mut self, new_target: T) {
        self.animate_to_at(new_target, Instant::now());
    }

    pub fn animate_to_at(&mut self, new_target: T, now: Instant) {
        // Don't restart if we're already animating to this target
        if new_target == self.target {
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = now;
        self.spring_state = self.transition.timing.spring_config().map(SpringState::new);
    }

    pub fn advance(&mut self) -> AdvanceResult<T> {
        self.advance_at(Instant::now())
    }

    /// Advance the animation to `now` and report whether the value changed.
    pub fn advance_at(&mut self, now: Instant) -> AdvanceResult<T> {
        if !self.is_animating() {
            return AdvanceResult::NoChange;
        }

        let elapsed_ms = now.saturating_duration_since(self.start_time).as_secs_f32() * 1000.0;
        let adjusted_ms = elapsed_ms - self.transition.delay_ms;
        if adjusted_ms <= 0.0 {
            return AdvanceResult::NoChange;
        }

        let eased_t = match (&mut self.spring_state, self.transition.timing.spring_config()) {
            (Some(spring), Some(config)) => {
                let position = spring.step(adjusted_ms / 1000.0, config);
                self.progress = if spring.is_settled(0.001) { 1.0 } else { 0.5 };
                if self.progress >= 1.0 {
                    1.0
                } else {
                    position
                }
            }
            _ => {
                let t = if self.transition.duration_ms > 0.0 {
                    (adjusted_ms / self.transition.duration_ms).min(1.0)
                } else {
                    1.0
                };
                self.progress = t;
                self.transition.timing.evaluate(t)
            }
        };

        let new_value = T::lerp(&self.start, &self.target, eased_t);
        if new_value == self.current {
            return AdvanceResult::NoChange;
        }

        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Jump to `value` without animating.
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
        self.spring_state = None;
    }
}
