use super::constants::CAP_SEGMENTS;
use super::vertex::Vertex;
use crate::layout::{Point, Rect};
use crate::ring::Arc;
use crate::style::LinearGradient;

/// How the ends of an open arc are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

/// A stroked arc ready to be tessellated.
#[derive(Debug, Clone, PartialEq)]
pub struct RingStroke {
    pub arc: Arc,
    pub line_width: f32,
    pub gradient: LinearGradient,
    /// Box the gradient spans, normally the ring's square frame
    pub gradient_bounds: Rect,
    pub opacity: f32,
    pub cap: LineCap,
}

impl RingStroke {
    /// True when the stroke would not cover any pixel.
    pub fn is_empty(&self) -> bool {
        self.line_width <= 0.0 || self.arc.sweep() <= 0.0
    }

    /// Triangle list in normalized device coordinates.
    pub fn to_vertices(&self, screen_width: f32, screen_height: f32) -> (Vec<Vertex>, Vec<u16>) {
        if self.is_empty() || screen_width <= 0.0 || screen_height <= 0.0 {
            return (Vec::new(), Vec::new());
        }

        let to_ndc = |p: Point| {
            [
                (p.x / screen_width) * 2.0 - 1.0,
                1.0 - (p.y / screen_height) * 2.0,
            ]
        };
        let vertex_at = |p: Point| {
            let color = self
                .gradient
                .sample(p, self.gradient_bounds)
                .with_opacity(self.opacity);
            Vertex::new(to_ndc(p), color.to_array())
        };

        let half = self.line_width / 2.0;
        let outer = self.arc.radius + half;
        let inner = (self.arc.radius - half).max(0.0);
        let center = self.arc.center;
        let segments = self.arc.segments();

        let mut vertices = Vec::with_capacity((segments + 1) * 2 + (CAP_SEGMENTS + 2) * 2);
        let mut indices = Vec::with_capacity(segments * 6 + CAP_SEGMENTS * 6);

        // Band: an outer and inner vertex per sample
        for degrees in self.arc.angles(segments) {
            let (nx, ny) = self.arc.normal_at(degrees);
            vertices.push(vertex_at(Point::new(center.x + nx * outer, center.y + ny * outer)));
            vertices.push(vertex_at(Point::new(center.x + nx * inner, center.y + ny * inner)));
        }
        for i in 0..segments as u16 {
            let outer0 = i * 2;
            let inner0 = outer0 + 1;
            let outer1 = outer0 + 2;
            let inner1 = outer0 + 3;
            indices.extend_from_slice(&[outer0, inner0, outer1, inner0, inner1, outer1]);
        }

        if self.cap == LineCap::Round {
            self.push_cap(self.arc.start_degrees, -1.0, half, &vertex_at, &mut vertices, &mut indices);
            self.push_cap(self.arc.end_degrees, 1.0, half, &vertex_at, &mut vertices, &mut indices);
        }

        (vertices, indices)
    }

    /// Half-disc fan at `degrees`, bulging along the direction of travel
    /// (`direction` = 1.0) or against it (-1.0).
    fn push_cap(
        &self,
        degrees: f32,
        direction: f32,
        half: f32,
        vertex_at: &impl Fn(Point) -> Vertex,
        vertices: &mut Vec<Vertex>,
        indices: &mut Vec<u16>,
    ) {
        let tip = self.arc.point_at(degrees);
        let (nx, ny) = self.arc.normal_at(degrees);
        // Clockwise tangent on screen
        let (tx, ty) = (-ny * direction, nx * direction);

        let base = vertices.len() as u16;
        vertices.push(vertex_at(tip));
        for k in 0..=CAP_SEGMENTS {
            let phi = std::f32::consts::PI * k as f32 / CAP_SEGMENTS as f32;
            let (cos, sin) = (phi.cos(), phi.sin());
            let dx = nx * cos + tx * sin;
            let dy = ny * cos + ty * sin;
            vertices.push(vertex_at(Point::new(tip.x + dx * half, tip.y + dy * half)));
        }
        for k in 0..CAP_SEGMENTS as u16 {
            indices.extend_from_slice(&[base, base + 1 + k, base + 2 + k]);
        }
    }
}
