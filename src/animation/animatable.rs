use crate::style::Color;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Linear interpolation between two values.
    /// `t` may leave [0, 1] when a spring overshoots.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&360.0, &240.0, 0.0), 360.0);
        assert_eq!(f32::lerp(&360.0, &240.0, 0.5), 300.0);
        assert_eq!(f32::lerp(&360.0, &240.0, 1.0), 240.0);
        // Overshoot past the target
        assert_eq!(f32::lerp(&360.0, &240.0, 1.5), 180.0);
    }

    #[test]
    fn test_color_lerp() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::WHITE;
        let mid = Color::lerp(&black, &white, 0.5);
        assert_eq!(mid, Color::rgb(0.5, 0.5, 0.5));
    }
}
