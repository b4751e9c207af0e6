//! Lyon tessellation of ink for GPU hosts.
//!
//! Consecutive segments that share an endpoint, color and width are merged
//! back into one polyline so joins come out round instead of as overlapping caps.
//!
//! # Usage
//!
//! ```ignore
//! let mut mesh = InkMesh::new();
//! mesh.rebuild(board.surface().ink.segments());
//! upload(mesh.buffer(), mesh.vertex_count());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, LineCap, LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex,
    StrokeVertexConstructor, VertexBuffers,
};

use crate::components::color::Color;
use crate::renderer::ink::InkSegment;

/// Per-vertex data for ink triangles.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct InkVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<InkVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> InkVertex {
        InkVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// A run of connected segments drawn with one color and width.
struct Polyline {
    points: Vec<Vec2>,
    width: f32,
    color: Color,
}

/// Split segments into polylines, merging each segment onto the previous one
/// when it continues from its end with the same style.
fn polylines(segments: &[InkSegment]) -> Vec<Polyline> {
    let mut runs: Vec<Polyline> = Vec::new();
    for seg in segments {
        if let Some(run) = runs.last_mut() {
            let continues = run.points.last() == Some(&seg.from())
                && run.width == seg.width
                && run.color == seg.color();
            if continues {
                run.points.push(seg.to());
                continue;
            }
        }
        runs.push(Polyline {
            points: vec![seg.from(), seg.to()],
            width: seg.width,
            color: seg.color(),
        });
    }
    runs
}

/// Triangle-list mesh of the ink layer.
pub struct InkMesh {
    tess: StrokeTessellator,
    geometry: VertexBuffers<InkVertex, u32>,
    buffer: Vec<f32>,
}

impl InkMesh {
    pub fn new() -> Self {
        Self {
            tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * InkVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / InkVertex::FLOATS
    }

    /// Flat float buffer, `InkVertex::FLOATS` per vertex.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Re-tessellate the whole ink layer.
    pub fn rebuild(&mut self, segments: &[InkSegment]) {
        self.clear();
        for run in polylines(segments) {
            self.stroke_polyline(&run);
        }
    }

    fn stroke_polyline(&mut self, run: &Polyline) {
        let mut builder = Path::builder();
        builder.begin(point(run.points[0].x, run.points[0].y));
        for p in &run.points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();

        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(run.width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);

        let result = self.tess.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color: run.color }),
        );

        if let Err(e) = result {
            log::warn!("ink tessellation failed: {e:?}");
        }
        self.flush_geometry();
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for InkMesh {
    fn default() -> Self {
        Self::new()
    }
}
