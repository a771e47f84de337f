use crate::animation::Animatable;
use crate::layout::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with alpha scaled by `opacity`
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Gradient direction for linear gradients
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GradientDirection {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Top-left to bottom-right
    #[default]
    Diagonal,
    /// Top-right to bottom-left
    DiagonalReverse,
}

/// Linear gradient over evenly spaced color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub colors: Vec<Color>,
    pub direction: GradientDirection,
}

impl LinearGradient {
    pub fn new(colors: Vec<Color>, direction: GradientDirection) -> Self {
        Self { colors, direction }
    }

    /// Top-leading to bottom-trailing
    pub fn diagonal(colors: Vec<Color>) -> Self {
        Self::new(colors, GradientDirection::Diagonal)
    }

    /// Color at position `t` along the gradient, clamped to [0, 1].
    pub fn color_at(&self, t: f32) -> Color {
        match self.colors.as_slice() {
            [] => Color::TRANSPARENT,
            [only] => *only,
            colors => {
                let t = t.clamp(0.0, 1.0);
                let segments = (colors.len() - 1) as f32;
                let scaled = t * segments;
                let index = (scaled.floor() as usize).min(colors.len() - 2);
                let local = scaled - index as f32;
                Color::lerp(&colors[index], &colors[index + 1], local)
            }
        }
    }

    /// Color for a point inside `bounds`.
    pub fn sample(&self, point: Point, bounds: Rect) -> Color {
        let tx = if bounds.width.abs() < 1e-4 {
            0.5
        } else {
            (point.x - bounds.x) / bounds.width
        };
        let ty = if bounds.height.abs() < 1e-4 {
            0.5
        } else {
            (point.y - bounds.y) / bounds.height
        };

        let t = match self.direction {
            GradientDirection::Horizontal => tx,
            GradientDirection::Vertical => ty,
            GradientDirection::Diagonal => (tx + ty) / 2.0,
            GradientDirection::DiagonalReverse => ((1.0 - tx) + ty) / 2.0,
        };
        self.color_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Color::from_hex(0xFF8000);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn test_color_at_multiple_stops() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let green = Color::rgb(0.0, 1.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let gradient = LinearGradient::diagonal(vec![red, green, blue]);

        assert_eq!(gradient.color_at(0.0), red);
        assert_eq!(gradient.color_at(0.5), green);
        assert_eq!(gradient.color_at(1.0), blue);
        assert_eq!(gradient.color_at(2.0), blue);
        assert_eq!(gradient.color_at(0.25), Color::rgb(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_single_stop_is_solid() {
        let gradient = LinearGradient::diagonal(vec![Color::WHITE]);
        assert_eq!(gradient.color_at(0.7), Color::WHITE);
    }

    #[test]
    fn test_diagonal_sample_corners() {
        let gradient = LinearGradient::diagonal(vec![Color::BLACK, Color::WHITE]);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(gradient.sample(Point::new(0.0, 0.0), bounds), Color::BLACK);
        assert_eq!(gradient.sample(Point::new(100.0, 100.0), bounds), Color::WHITE);
        assert_eq!(
            gradient.sample(Point::new(100.0, 0.0), bounds),
            Color::rgb(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(Color::WHITE.with_opacity(0.25).a, 0.25);
    }
}
