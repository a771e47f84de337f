//! CPU-side render description of a countdown ring.
//!
//! [`RingFrame`] turns a [`RingState`] and the available size into two
//! stroked arcs and a label box. The host uploads
//! [`RingFrame::to_vertices`] with [`Vertex::desc`] and shapes the label
//! text with its own text stack.

pub mod constants;
mod stroke;
mod vertex;

pub use stroke::{LineCap, RingStroke};
pub use vertex::Vertex;

use constants::{LABEL_FONT_FRACTION, LABEL_MIN_SCALE, LABEL_WIDTH_FRACTION, TRACK_OPACITY};

use crate::countdown::{RingConfig, RingState};
use crate::layout::{Point, Rect, Size};
use crate::ring::Ring;
use crate::style::LinearGradient;

/// The center label of the ring
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrame {
    pub text: String,
    pub center: Point,
    pub font_size: f32,
    /// Width the text should fit in, shrinking down to `min_scale`
    pub max_width: f32,
    pub min_scale: f32,
    pub opacity: f32,
    pub gradient: LinearGradient,
}

/// Everything needed to draw one frame of the ring
#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    /// Square the ring is drawn in
    pub bounds: Rect,
    /// Faded full circle behind the progress
    pub track: RingStroke,
    pub progress: RingStroke,
    pub label: LabelFrame,
}

impl RingFrame {
    pub fn new(size: Size, config: &RingConfig, state: &RingState) -> Self {
        let side = size.height;
        let bounds = Rect::new((size.width - side) / 2.0, 0.0, side, side);

        let stroke_width = config.stroke_width(side);
        let inset = stroke_width / 2.0;
        let line_width = stroke_width * state.shrink.max(0.0);
        let gradient = LinearGradient::diagonal(config.ring_colors.clone());

        let stroke = |degrees: f32, opacity: f32| RingStroke {
            arc: Ring::new(degrees, side, inset).arc_in(bounds),
            line_width,
            gradient: gradient.clone(),
            gradient_bounds: bounds,
            opacity,
            cap: LineCap::Round,
        };

        Self {
            bounds,
            track: stroke(360.0, TRACK_OPACITY),
            progress: stroke(state.degrees, 1.0),
            label: LabelFrame {
                text: state.label.clone(),
                center: bounds.center(),
                font_size: size.width * LABEL_FONT_FRACTION * state.text_factor,
                max_width: size.width * LABEL_WIDTH_FRACTION,
                min_scale: LABEL_MIN_SCALE,
                opacity: state.alpha.clamp(0.0, 1.0),
                gradient: LinearGradient::diagonal(config.text_colors.clone()),
            },
        }
    }

    /// Track and progress rings as one triangle list, track first.
    pub fn to_vertices(&self, screen_width: f32, screen_height: f32) -> (Vec<Vertex>, Vec<u16>) {
        let (mut vertices, mut indices) = self.track.to_vertices(screen_width, screen_height);
        let (progress_vertices, progress_indices) =
            self.progress.to_vertices(screen_width, screen_height);

        let base = vertices.len() as u16;
        vertices.extend(progress_vertices);
        indices.extend(progress_indices.into_iter().map(|i| i + base));

        (vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn config() -> RingConfig {
        RingConfig::new(vec![Color::from_hex(0xFF2D55), Color::from_hex(0xFF9500)])
    }

    #[test]
    fn test_frame_geometry() {
        let frame = RingFrame::new(Size::new(300.0, 200.0), &config(), &RingState::default());

        assert_eq!(frame.bounds, Rect::new(50.0, 0.0, 200.0, 200.0));
        // 200 / 10 * 1
        assert_eq!(frame.track.line_width, 20.0);
        assert_eq!(frame.track.arc.radius, 90.0);
        assert_eq!(frame.track.arc.center, Point::new(150.0, 100.0));
        assert_eq!(frame.track.opacity, TRACK_OPACITY);
        assert_eq!(frame.progress.arc.end_degrees, 1.0);
    }

    #[test]
    fn test_label_follows_state() {
        let state = RingState {
            label: "3".into(),
            text_factor: 1.0,
            alpha: 0.5,
            ..RingState::default()
        };
        let frame = RingFrame::new(Size::new(300.0, 300.0), &config(), &state);

        assert_eq!(frame.label.text, "3");
        assert!((frame.label.font_size - 100.0).abs() < 1e-3);
        assert!((frame.label.max_width - 200.0).abs() < 1e-3);
        assert_eq!(frame.label.opacity, 0.5);
        assert_eq!(frame.label.gradient.colors, vec![Color::WHITE, Color::WHITE]);
    }

    #[test]
    fn test_shrunk_ring_has_no_geometry() {
        let state = RingState {
            shrink: 0.0,
            ..RingState::default()
        };
        let frame = RingFrame::new(Size::new(100.0, 100.0), &config(), &state);
        let (vertices, indices) = frame.to_vertices(100.0, 100.0);

        assert!(vertices.is_empty());
        assert!(indices.is_empty());
    }

    #[test]
    fn test_combined_indices_are_offset() {
        let state = RingState {
            degrees: 240.0,
            ..RingState::default()
        };
        let frame = RingFrame::new(Size::new(100.0, 100.0), &config(), &state);
        let (track_vertices, _) = frame.track.to_vertices(100.0, 100.0);
        let (vertices, indices) = frame.to_vertices(100.0, 100.0);

        assert!(vertices.len() > track_vertices.len());
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert!(indices.iter().any(|&i| (i as usize) >= track_vertices.len()));
    }
}
