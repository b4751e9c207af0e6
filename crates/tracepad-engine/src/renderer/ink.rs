use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::components::color::Color;

/// One painted ink segment in backing-raster coordinates.
/// 9 floats = 36 bytes stride. Drawn with round caps and joins.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct InkSegment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub width: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkSegment {
    pub const FLOATS: usize = 9;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(from: Vec2, to: Vec2, width: f32, color: Color) -> Self {
        Self {
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            width,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }

    pub fn from(&self) -> Vec2 {
        Vec2::new(self.x0, self.y0)
    }

    pub fn to(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }
}

/// The learner's ink. Only the stroke input writes here.
pub struct InkLayer {
    segments: Vec<InkSegment>,
    /// Bumped on every clear so hosts can tell a wipe from "no new ink".
    generation: u32,
}

impl InkLayer {
    pub fn new() -> Self {
        Self {
            segments: Vec::with_capacity(1024),
            generation: 0,
        }
    }

    pub fn push(&mut self, segment: InkSegment) {
        self.segments.push(segment);
    }

    /// Wipe all ink.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn segments(&self) -> &[InkSegment] {
        &self.segments
    }

    /// Segments painted after the first `cursor` ones.
    pub fn segments_since(&self, cursor: usize) -> &[InkSegment] {
        self.segments.get(cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Flat float view for hosts that upload ink to a GPU buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.segments)
    }
}

impl Default for InkLayer {
    fn default() -> Self {
        Self::new()
    }
}
