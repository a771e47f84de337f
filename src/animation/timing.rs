//! Easing curves for eased transitions.
//!
//! - [`TimingFunction::Linear`], [`TimingFunction::EaseIn`],
//!   [`TimingFunction::EaseOut`], [`TimingFunction::EaseInOut`]
//! - [`TimingFunction::CubicBezier`] - CSS-style control points
//! - [`TimingFunction::Spring`] - physics-driven, ignores the duration
//! - [`TimingFunction::Custom`] - any `Fn(f32) -> f32`

use std::sync::Arc;

use super::spring::SpringConfig;

/// Timing function that controls the animation curve
#[derive(Clone)]
pub enum TimingFunction {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    Spring(SpringConfig),
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the curve at normalized time `t` in [0, 1].
    ///
    /// Springs run on real elapsed time in [`AnimatedValue`](super::AnimatedValue)
    /// and return `t` here.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Spring(_) => t,
            TimingFunction::Custom(f) => f(t),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }

    pub fn spring_config(&self) -> Option<&SpringConfig> {
        match self {
            TimingFunction::Spring(config) => Some(config),
            _ => None,
        }
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Spring(config) => write!(f, "Spring({:?})", config),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Solve x(s) = t with Newton-Raphson, then return y(s).
/// Assumes x1 and x2 lie in [0, 1].
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut s = t;
    for _ in 0..8 {
        let x = bezier(s, x1, x2) - t;
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= x / slope;
    }
    bezier(s, y1, y2)
}

fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let ms = 1.0 - s;
    3.0 * ms * ms * p1 + 6.0 * ms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
