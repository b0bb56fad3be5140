//! Lyon-based line tessellation for guide lines lying in the XZ plane.
//!
//! Shapes are described in 2D (x, z), stroked with lyon, and emitted as a
//! flat non-indexed triangle list at a fixed height. The result is meant to be
//! registered once as static geometry, not rebuilt per frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

/// Line vertex position. 3 floats = 12 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 3;
}

/// Maps lyon's plane onto world XZ at height `y`.
struct PlaneCtor {
    y: f32,
}

impl StrokeVertexConstructor<LineVertex> for PlaneCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> LineVertex {
        let p = vertex.position();
        LineVertex { x: p.x, y: self.y, z: p.y }
    }
}

pub struct LineTessellator {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<LineVertex, u32>,
    vertices: Vec<LineVertex>,
    height: f32,
    tolerance: f32,
}

impl LineTessellator {
    pub fn new() -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::new(),
            height: 0.0,
            tolerance: 0.01,
        }
    }

    /// Height of the plane subsequent strokes are placed in.
    pub fn with_height(mut self, y: f32) -> Self {
        self.height = y;
        self
    }

    /// Max deviation from the true curve, in world units.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Drain the triangle list as flat xyz triples.
    pub fn take_positions(&mut self) -> Vec<f32> {
        let out = bytemuck::cast_slice(&self.vertices).to_vec();
        self.vertices.clear();
        out
    }

    /// Stroke a circle centred at (x, z).
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.stroke_path(&builder.build(), width);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(self.tolerance).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, PlaneCtor { y: self.height }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("Line tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for LineTessellator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_vertex_is_12_bytes() {
        assert_eq!(std::mem::size_of::<LineVertex>(), 12);
    }

    #[test]
    fn circle_lies_in_xz_plane_near_radius() {
        let mut lines = LineTessellator::new().with_height(0.5);
        lines.stroke_circle(Vec2::ZERO, 2.0, 0.02);
        assert!(lines.vertex_count() > 0);
        assert_eq!(lines.vertex_count() % 3, 0);
        for v in lines.vertices() {
            assert_eq!(v.y, 0.5);
            let r = (v.x * v.x + v.z * v.z).sqrt();
            assert!((r - 2.0).abs() < 0.05, "vertex at radius {r}");
        }
    }

    #[test]
    fn degenerate_shapes_emit_nothing() {
        let mut lines = LineTessellator::new();
        lines.stroke_circle(Vec2::ZERO, 0.0, 0.1);
        lines.stroke_circle(Vec2::new(1.0, 1.0), 1.0, 0.0);
        assert_eq!(lines.vertex_count(), 0);
    }

    #[test]
    fn take_positions_drains() {
        let mut lines = LineTessellator::new();
        lines.stroke_circle(Vec2::ZERO, 1.0, 0.1);
        let count = lines.vertex_count();
        let flat = lines.take_positions();
        assert_eq!(flat.len(), count * 3);
        assert_eq!(lines.vertex_count(), 0);
    }
}
