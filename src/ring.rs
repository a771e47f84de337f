//! The ring shape: an open circular arc sweeping clockwise from 3 o'clock.

use crate::animation::Animatable;
use crate::layout::{Point, Rect};

/// An arc of `degrees` around a circle of diameter `radius`, pulled in by
/// `inset` so a stroke of twice the inset stays inside the box.
///
/// `radius` follows the host's geometry: it is the side of the square the
/// ring is drawn in, not the circle's radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub degrees: f32,
    pub radius: f32,
    pub inset: f32,
}

impl Ring {
    pub fn new(degrees: f32, radius: f32, inset: f32) -> Self {
        Self {
            degrees,
            radius,
            inset,
        }
    }

    /// The arc path inside `rect`.
    pub fn arc_in(&self, rect: Rect) -> Arc {
        Arc {
            center: Point::new(rect.x + self.radius / 2.0, rect.y + self.radius / 2.0),
            radius: (self.radius / 2.0 - self.inset).max(0.0),
            start_degrees: 0.0,
            end_degrees: self.degrees.clamp(0.0, 360.0),
        }
    }
}

impl Animatable for Ring {
    /// Only the sweep animates; size follows the latest layout.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            degrees: f32::lerp(&from.degrees, &to.degrees, t),
            ..*to
        }
    }
}

/// A circular arc in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f32,
    pub start_degrees: f32,
    pub end_degrees: f32,
}

impl Arc {
    pub fn sweep(&self) -> f32 {
        self.end_degrees - self.start_degrees
    }

    /// Point on the circle at `degrees`; increasing angles run clockwise on screen.
    pub fn point_at(&self, degrees: f32) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            self.center.x + self.radius * radians.cos(),
            self.center.y + self.radius * radians.sin(),
        )
    }

    /// Unit direction from the center toward `degrees`.
    pub fn normal_at(&self, degrees: f32) -> (f32, f32) {
        let radians = degrees.to_radians();
        (radians.cos(), radians.sin())
    }

    /// Number of segments for a smooth curve, at least one.
    pub fn segments(&self) -> usize {
        // 64 segments per full turn
        ((self.sweep().abs() / 360.0 * 64.0).ceil() as usize).max(1)
    }

    /// `segments + 1` evenly spaced angles from start to end.
    pub fn angles(&self, segments: usize) -> impl Iterator<Item = f32> + '_ {
        let segments = segments.max(1);
        (0..=segments)
            .map(move |i| self.start_degrees + self.sweep() * i as f32 / segments as f32)
    }

    /// `segments + 1` evenly spaced points from start to end.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        self.angles(segments).map(|deg| self.point_at(deg)).collect()
    }
}
