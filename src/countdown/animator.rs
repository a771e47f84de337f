use std::time::Instant;

use super::{RingConfig, RingState};
use crate::animation::AnimatedValue;

/// Smooths the discrete countdown targets for hosts without their own
/// animation system.
///
/// Sweep and stroke width follow `ring_animation`, the label opacity follows
/// `fade_animation`. Label text and size switch immediately.
pub struct RingAnimator {
    degrees: AnimatedValue<f32>,
    shrink: AnimatedValue<f32>,
    alpha: AnimatedValue<f32>,
}

impl RingAnimator {
    pub fn new(config: &RingConfig, initial: &RingState) -> Self {
        Self {
            degrees: AnimatedValue::new(initial.degrees, config.ring_animation.clone()),
            shrink: AnimatedValue::new(initial.shrink, config.ring_animation.clone()),
            alpha: AnimatedValue::new(initial.alpha, config.fade_animation.clone()),
        }
    }

    /// Retarget to `target` and return the interpolated state at `now`.
    pub fn advance_at(&mut self, target: &RingState, now: Instant) -> RingState {
        self.degrees.animate_to_at(target.degrees, now);
        self.shrink.animate_to_at(target.shrink, now);
        self.alpha.animate_to_at(target.alpha, now);

        self.degrees.advance_at(now);
        self.shrink.advance_at(now);
        self.alpha.advance_at(now);

        RingState {
            degrees: self.degrees.current().clamp(0.0, 360.0),
            shrink: self.shrink.current().max(0.0),
            alpha: self.alpha.current().clamp(0.0, 1.0),
            ..target.clone()
        }
    }

    pub fn advance(&mut self, target: &RingState) -> RingState {
        self.advance_at(target, Instant::now())
    }

    pub fn is_animating(&self) -> bool {
        self.degrees.is_animating() || self.shrink.is_animating() || self.alpha.is_animating()
    }
}
