use glam::Vec2;
use lyon::{
    geom::Point,
    lyon_tessellation::{
        Count, FillGeometryBuilder, FillOptions, FillTessellator, FillVertex, GeometryBuilder,
        GeometryBuilderError, StrokeGeometryBuilder, StrokeOptions, StrokeTessellator,
        StrokeVertex, TessellationError, VertexId,
    },
};

/// A vector path composed of line segments and Bezier curves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// A path with no segments. Draws nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        self.segments.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns every point referenced by the path, including
    /// curve control points.
    ///
    /// The convex hull of these points bounds the path.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().flat_map(|segment| match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![p],
            PathSegment::QuadTo { control, end } => vec![control, end],
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => vec![control1, control2, end],
            PathSegment::Close => Vec::new(),
        })
    }

    /// Converts to a `lyon` path for tessellation.
    pub fn to_lyon(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder().with_svg();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    builder.move_to(point(p));
                }
                PathSegment::LineTo(p) => {
                    builder.line_to(point(p));
                }
                PathSegment::QuadTo { control, end } => {
                    builder.quadratic_bezier_to(point(control), point(end));
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    builder.cubic_bezier_to(point(control1), point(control2), point(end));
                }
                PathSegment::Close => builder.close(),
            }
        }
        builder.build()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo {
        control: Vec2,
        end: Vec2,
    },
    CubicTo {
        control1: Vec2,
        control2: Vec2,
        end: Vec2,
    },
    Close,
}

/// A builder for a [`Path`].
///
/// Maintains a current "pen position," which is initially
/// set to the origin.
#[derive(Debug, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the pen position to the given point without
    /// drawing a segment to it.
    pub fn move_to(mut self, point: Vec2) -> Self {
        self.push_segment(PathSegment::MoveTo(point));
        self
    }

    /// Adds a line segment from the pen position to the given
    /// point, then sets the pen position to `point`.
    pub fn line_to(mut self, point: Vec2) -> Self {
        self.push_segment(PathSegment::LineTo(point));
        self
    }

    /// Adds a quadratic Bezier curve from the pen position
    /// to `end` using the given control point.
    pub fn quad_to(mut self, control: Vec2, end: Vec2) -> Self {
        self.push_segment(PathSegment::QuadTo { control, end });
        self
    }

    /// Adds a cubic Bezier curve from the pen position
    /// to `end` using the given control points.
    pub fn cubic_to(mut self, control1: Vec2, control2: Vec2, end: Vec2) -> Self {
        self.push_segment(PathSegment::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Closes the path, then builds it.
    ///
    /// Closing a path adds a line segment to the initial point in the path.
    pub fn close(mut self) -> Path {
        self.push_segment(PathSegment::Close);
        self.build()
    }

    pub fn build(self) -> Path {
        self.path
    }

    fn push_segment(&mut self, segment: PathSegment) {
        self.path.segments.push(segment);
    }
}

fn point(v: Vec2) -> Point<f32> {
    Point::new(v.x, v.y)
}

#[derive(Debug, thiserror::Error)]
pub enum TessellateError {
    #[error("failed to fill path: {0:?}")]
    Fill(TessellationError),
    #[error("failed to stroke path: {0:?}")]
    Stroke(TessellationError),
}

/// Triangles produced by tessellating a [`Path`].
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The vertex positions as raw bytes, ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl GeometryBuilder for Mesh {
    fn begin_geometry(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: self.vertices.len() as u32,
            indices: self.indices.len() as u32,
        }
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        self.indices.push(a.0);
        self.indices.push(b.0);
        self.indices.push(c.0);
    }

    fn abort_geometry(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl FillGeometryBuilder for Mesh {
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        self.vertices
            .push(Vec2::new(vertex.position().x, vertex.position().y));
        Ok(VertexId::from_usize(self.vertices.len() - 1))
    }
}

impl StrokeGeometryBuilder for Mesh {
    fn add_stroke_vertex(
        &mut self,
        vertex: StrokeVertex,
    ) -> Result<VertexId, GeometryBuilderError> {
        self.vertices
            .push(Vec2::new(vertex.position().x, vertex.position().y));
        Ok(VertexId::from_usize(self.vertices.len() - 1))
    }
}

/// Converts paths into triangle meshes.
///
/// Reuses the `lyon` tessellators' internal buffers between calls.
pub struct Tessellator {
    fill_tessellator: FillTessellator,
    stroke_tessellator: StrokeTessellator,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            fill_tessellator: FillTessellator::new(),
            stroke_tessellator: StrokeTessellator::new(),
        }
    }

    pub fn fill(&mut self, path: &Path) -> Result<Mesh, TessellateError> {
        let mut mesh = Mesh::default();
        if path.is_empty() {
            return Ok(mesh);
        }
        self.fill_tessellator
            .tessellate_path(&path.to_lyon(), &FillOptions::default(), &mut mesh)
            .map_err(TessellateError::Fill)?;
        Ok(mesh)
    }

    pub fn stroke(&mut self, path: &Path, width: f32) -> Result<Mesh, TessellateError> {
        let mut mesh = Mesh::default();
        if path.is_empty() {
            return Ok(mesh);
        }
        self.stroke_tessellator
            .tessellate_path(
                &path.to_lyon(),
                &StrokeOptions::default().with_line_width(width),
                &mut mesh,
            )
            .map_err(TessellateError::Stroke)?;
        Ok(mesh)
    }
}
