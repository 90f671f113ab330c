//! The drag-resizable light beam.
//!
//! [`BeamDimensions`] holds the two clamped extents a drag gesture
//! manipulates. [`BeamGeometry::derive`] turns them, together with the
//! extents of the canvas the beam is drawn on, into the cone, the
//! bending guide line above it, and the placement of the brightness icon.

use glam::{vec2, Vec2};

use crate::{
    color,
    color::Tint,
    config::BeamConfig,
    path::{Mesh, Path, TessellateError, Tessellator},
    rect::Rect,
    GradientStop,
};

/// Height and width of the beam's cone.
///
/// Both extents always lie within `[min_extent, max_extent]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeamDimensions {
    height: f32,
    width: f32,
    min: f32,
    max: f32,
}

impl Default for BeamDimensions {
    fn default() -> Self {
        Self::new(&BeamConfig::default())
    }
}

impl BeamDimensions {
    /// Creates dimensions at the configured defaults.
    ///
    /// Non-finite bounds and defaults fall back to the stock values,
    /// and the defaults are clamped into bounds, so even an unvalidated
    /// configuration cannot break the invariant.
    pub fn new(config: &BeamConfig) -> Self {
        let stock = BeamConfig::default();
        let min = finite_or(config.min_extent, stock.min_extent);
        let max = finite_or(config.max_extent, stock.max_extent).max(min);
        Self {
            height: finite_or(config.default_height, stock.default_height).clamp(min, max),
            width: finite_or(config.default_width, stock.default_width).clamp(min, max),
            min,
            max,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Applies one drag-move event's delta.
    ///
    /// Dragging up grows the height; dragging right grows the width.
    /// The new candidate is clamped, never the delta. Non-finite
    /// deltas are ignored.
    ///
    /// Returns whether either extent changed.
    pub fn update_from_drag(&mut self, delta: Vec2) -> bool {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite drag delta {:?}", delta);
            return false;
        }

        let height = (self.height - delta.y).clamp(self.min, self.max);
        let width = (self.width + delta.x).clamp(self.min, self.max);
        let changed = height != self.height || width != self.width;
        self.height = height;
        self.width = width;

        if changed {
            log::trace!("Beam resized to {}x{}", self.width, self.height);
        }
        changed
    }

    /// Restores the configured defaults.
    pub fn reset(&mut self, config: &BeamConfig) {
        *self = Self::new(config);
    }
}

/// Where to draw the brightness icon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IconPlacement {
    pub center: Vec2,
    pub size: f32,
}

impl IconPlacement {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, Vec2::splat(self.size))
    }
}

/// The renderable parts of the beam for one set of dimensions
/// and canvas extents.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamGeometry {
    /// The filled cone outline
    pub cone: Path,
    /// Gradient start (top of the cone) and end (canvas bottom)
    pub gradient: (Vec2, Vec2),
    /// The stroked guide line above the cone
    pub guide_line: Path,
    pub guide_line_width: f32,
    /// How far the guide line's control point is raised
    pub bending_factor: f32,
    pub icon: Option<IconPlacement>,
    top_alpha: f32,
}

impl BeamGeometry {
    /// Derives the beam from scratch.
    ///
    /// `canvas_size` is the size of the surface the beam is drawn on; the
    /// cone's base sits at its bottom edge, horizontally centered. A
    /// canvas with a zero, negative or non-finite side yields an empty
    /// geometry.
    pub fn derive(canvas_size: Vec2, dimensions: &BeamDimensions, config: &BeamConfig) -> Self {
        if !is_drawable(canvas_size) {
            return Self::empty(config);
        }

        let BeamDimensions { height, width, .. } = *dimensions;
        let center_x = canvas_size.x / 2.;
        let bottom_y = canvas_size.y;
        let top_y = bottom_y - height;
        let half_width = width / 2.;

        let cone = Path::builder()
            .move_to(vec2(center_x - half_width, top_y))
            .cubic_to(
                vec2(center_x - width / 4., top_y),
                vec2(center_x + width / 4., top_y),
                vec2(center_x + half_width, top_y),
            )
            .line_to(vec2(center_x + config.base_half_width, bottom_y))
            .line_to(vec2(center_x - config.base_half_width, bottom_y))
            .close();

        let line_y = top_y - config.guide_line_offset;
        let line_start = vec2(center_x - half_width, line_y);
        let line_end = vec2(center_x + half_width, line_y);
        let bending_factor = bending_factor(width, config);
        let guide_line = if bending_factor > 0. {
            Path::builder()
                .move_to(line_start)
                .quad_to(vec2(center_x, line_y - bending_factor), line_end)
                .build()
        } else {
            Path::builder().move_to(line_start).line_to(line_end).build()
        };

        let icon = IconPlacement {
            center: vec2(line_end.x + config.icon_size / 2. + config.icon_gap, line_y),
            size: config.icon_size,
        };

        Self {
            cone,
            gradient: (vec2(center_x, top_y), vec2(center_x, bottom_y)),
            guide_line,
            guide_line_width: config.guide_line_width,
            bending_factor,
            icon: Some(icon),
            top_alpha: config.top_alpha,
        }
    }

    fn empty(config: &BeamConfig) -> Self {
        Self {
            cone: Path::empty(),
            gradient: (Vec2::ZERO, Vec2::ZERO),
            guide_line: Path::empty(),
            guide_line_width: config.guide_line_width,
            bending_factor: 0.,
            icon: None,
            top_alpha: config.top_alpha,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cone.is_empty()
    }

    /// Semi-transparent white at the top of the cone fading to
    /// nothing at its base.
    pub fn gradient_stops(&self) -> [GradientStop; 2] {
        [
            GradientStop::new(0., color::with_alpha(color::white(), self.top_alpha)),
            GradientStop::new(1., color::transparent()),
        ]
    }

    pub fn guide_line_tint(&self) -> Tint {
        color::white()
    }

    /// Tessellates the cone (filled) and the guide line (stroked).
    pub fn tessellate(&self, tessellator: &mut Tessellator) -> Result<BeamMeshes, TessellateError> {
        Ok(BeamMeshes {
            cone: tessellator.fill(&self.cone)?,
            guide_line: tessellator.stroke(&self.guide_line, self.guide_line_width)?,
        })
    }
}

/// Triangle meshes for the beam, in canvas coordinates.
#[derive(Debug, Clone, Default)]
pub struct BeamMeshes {
    pub cone: Mesh,
    pub guide_line: Mesh,
}

/// The guide line bows by half the width, capped at `max_bend`,
/// and is straight at (or below) the minimum width.
pub fn bending_factor(width: f32, config: &BeamConfig) -> f32 {
    if width > config.min_extent {
        (width / 2.).min(config.max_bend)
    } else {
        0.
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn is_drawable(canvas_size: Vec2) -> bool {
    canvas_size.is_finite() && canvas_size.x > 0. && canvas_size.y > 0.
}
