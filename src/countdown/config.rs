use crate::animation::Transition;
use crate::error::{Error, Result};
use crate::sequencer::Interval;
use crate::style::Color;

/// Appearance and timing of a countdown ring.
#[derive(Clone, Debug)]
pub struct RingConfig {
    /// Ring gradient stops, top-leading to bottom-trailing. Must not be empty.
    pub ring_colors: Vec<Color>,
    /// Label gradient stops. Must not be empty.
    pub text_colors: Vec<Color>,
    /// Scales the stroke width
    pub width_multiplier: f32,
    /// Ring height divided by this gives the unscaled stroke width
    pub width_divisor: f32,
    /// Animation of the sweep angle and stroke width
    pub ring_animation: Transition,
    /// Animation of the label opacity
    pub fade_animation: Transition,
    /// Seconds between countdown steps
    pub countdown_interval: f64,
}

impl RingConfig {
    pub fn new(ring_colors: Vec<Color>) -> Self {
        Self {
            ring_colors,
            text_colors: vec![Color::WHITE, Color::WHITE],
            width_multiplier: 1.0,
            width_divisor: 10.0,
            ring_animation: Transition::interpolating_spring(20.0, 10.0, 6.0),
            fade_animation: Transition::ease_in_out(),
            countdown_interval: 1.0,
        }
    }

    pub fn text_colors(mut self, colors: Vec<Color>) -> Self {
        self.text_colors = colors;
        self
    }

    pub fn width_multiplier(mut self, multiplier: f32) -> Self {
        self.width_multiplier = multiplier;
        self
    }

    pub fn width_divisor(mut self, divisor: f32) -> Self {
        self.width_divisor = divisor;
        self
    }

    pub fn ring_animation(mut self, transition: Transition) -> Self {
        self.ring_animation = transition;
        self
    }

    pub fn fade_animation(mut self, transition: Transition) -> Self {
        self.fade_animation = transition;
        self
    }

    pub fn countdown_interval(mut self, secs: f64) -> Self {
        self.countdown_interval = secs;
        self
    }

    /// Stroke width for a ring drawn in a square of side `height`.
    pub fn stroke_width(&self, height: f32) -> f32 {
        height / self.width_divisor * self.width_multiplier
    }

    /// Check every field and return the validated tick interval.
    pub fn validate(&self) -> Result<Interval> {
        if self.ring_colors.is_empty() {
            return Err(Error::EmptyRingColors);
        }
        if self.text_colors.is_empty() {
            return Err(Error::EmptyTextColors);
        }
        if !self.width_multiplier.is_finite() || self.width_multiplier <= 0.0 {
            return Err(Error::InvalidWidthMultiplier(self.width_multiplier));
        }
        if !self.width_divisor.is_finite() || self.width_divisor <= 0.0 {
            return Err(Error::InvalidWidthDivisor(self.width_divisor));
        }
        Interval::from_secs_f64(self.countdown_interval)
    }
}
