use glam::Vec2;

use crate::{
    color::{self, Tint},
    path::{Path, PathSegment},
    rect::Rect,
};

/// An opaque image the host draws from its own assets.
///
/// Only the size it is drawn at is known here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Torch,
    Brightness,
}

/// A "stop" in a gradient, consisting
/// of a position (0.0..=1.0) along the gradient
/// and the color value at that position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    position: f32,
    color: Tint,
}

impl GradientStop {
    pub fn new(position: f32, color: Tint) -> Self {
        Self { position, color }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn color(&self) -> Tint {
        self.color
    }
}

/// A low-level command given to the host renderer.
///
/// The stream is flat: each `Command` is one atomic unit
/// and carries no heap-allocated data. Paths are staged segment
/// by segment, then filled or stroked with the current paint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// Sets the current paint to a solid color.
    UseSolidPaint(Tint),
    /// Sets the current paint to a linear gradient.
    ///
    /// Always followed in the stream by two or more `PushGradientStop` commands.
    UseLinearGradientPaint { start: Vec2, end: Vec2 },
    /// Adds a stop to the current gradient.
    PushGradientStop(GradientStop),

    /// Sets the offset applied to everything drawn afterward.
    SetTranslation(Vec2),

    /// Clears the currently staged path
    ClearPath,
    /// Pushes a segment onto the current path
    PushPathSegment(PathSegment),

    /// Fills the staged path with the current paint.
    FillPath,
    /// Strokes the staged path with the current paint.
    StrokePath { width: f32 },
    /// Fills a rectangle with rounded corners with the current paint.
    FillRoundedRect { rect: Rect, radius: f32 },
    /// Draws an icon stretched over `rect`, optionally tinted.
    DrawIcon {
        icon: Icon,
        rect: Rect,
        tint: Option<Tint>,
    },
}

/// A canvas to draw to.
///
/// Records a sequence of draw commands for the host to replay.
/// Drawing is stateful through the current translation; use
/// [`Canvas::save`] and [`Canvas::restore`] (or [`Canvas::with_save`])
/// to keep changes local.
///
/// Many methods return `self` to enable method chaining.
#[derive(Debug, Default)]
pub struct Canvas {
    commands: Vec<Command>,
    translation_stack: Vec<Vec2>,
    translation: Vec2,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates the canvas.
    pub fn translate(&mut self, translation: Vec2) -> &mut Self {
        self.translation += translation;
        self.cmd(Command::SetTranslation(self.translation))
    }

    /// Pushes the current translation onto the stack,
    /// allowing it to be restored later.
    pub fn save(&mut self) -> &mut Self {
        self.translation_stack.push(self.translation);
        self
    }

    /// Restores the most recently saved translation.
    ///
    /// # Panics
    /// Panics if `restore()` is called more times than `save()`.
    pub fn restore(&mut self) -> &mut Self {
        let translation = self
            .translation_stack
            .pop()
            .expect("called Canvas::restore() at the top of the state stack");
        if translation != self.translation {
            self.translation = translation;
            self.cmd(Command::SetTranslation(translation));
        }
        self
    }

    /// Calls `save()`, executes the closure, and then calls `restore()`.
    pub fn with_save(&mut self, f: impl FnOnce(&mut Self)) {
        self.save();
        f(self);
        self.restore();
    }

    /// Creates a builder to fill the given path.
    pub fn fill_path(&mut self, path: &Path) -> Fill {
        self.set_path(path);
        Fill::new(self, None)
    }

    /// Creates a builder to fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32) -> Fill {
        Fill::new(self, Some((rect, radius)))
    }

    /// Creates a builder to stroke the given path.
    pub fn stroke_path(&mut self, path: &Path) -> Stroke {
        self.set_path(path);
        Stroke::new(self)
    }

    pub fn draw_icon(&mut self, icon: Icon, rect: Rect, tint: Option<Tint>) -> &mut Self {
        self.cmd(Command::DrawIcon { icon, rect, tint })
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Takes the recorded commands, leaving the canvas
    /// empty and ready to reuse.
    pub fn take_commands(&mut self) -> Vec<Command> {
        self.translation_stack.clear();
        self.translation = Vec2::ZERO;
        std::mem::take(&mut self.commands)
    }

    fn set_path(&mut self, path: &Path) {
        self.cmd(Command::ClearPath);
        for segment in path.segments() {
            self.cmd(Command::PushPathSegment(segment));
        }
    }

    fn set_solid_paint(&mut self, color: Tint) {
        self.cmd(Command::UseSolidPaint(color));
    }

    fn set_linear_gradient_paint(
        &mut self,
        start: Vec2,
        end: Vec2,
        stops: impl Iterator<Item = GradientStop>,
    ) {
        self.cmd(Command::UseLinearGradientPaint { start, end });
        for stop in stops {
            self.cmd(Command::PushGradientStop(stop));
        }
    }

    fn cmd(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }
}

macro_rules! set_paint_fns {
    () => {
        /// Uses a solid color.
        pub fn solid_color(mut self, color: Tint) -> Self {
            self.canvas.set_solid_paint(color);
            self.set_paint = true;
            self
        }

        /// Uses a linear gradient.
        pub fn linear_gradient(
            mut self,
            start: Vec2,
            end: Vec2,
            stops: impl IntoIterator<Item = GradientStop>,
        ) -> Self {
            self.canvas
                .set_linear_gradient_paint(start, end, stops.into_iter());
            self.set_paint = true;
            self
        }
    };
}

/// Builder-like API to fill a shape.
///
/// The paint defaults to solid white.
/// Call `draw()` to finish the draw operation.
#[must_use = "call Fill::draw() to finish the builder"]
pub struct Fill<'cv> {
    canvas: &'cv mut Canvas,
    rounded_rect: Option<(Rect, f32)>,
    set_paint: bool,
}

impl<'cv> Fill<'cv> {
    fn new(canvas: &'cv mut Canvas, rounded_rect: Option<(Rect, f32)>) -> Self {
        Self {
            canvas,
            rounded_rect,
            set_paint: false,
        }
    }

    set_paint_fns!();

    /// Emits the fill command.
    pub fn draw(mut self) {
        if !self.set_paint {
            self = self.solid_color(color::white());
        }

        let cmd = match self.rounded_rect {
            Some((rect, radius)) => Command::FillRoundedRect { rect, radius },
            None => Command::FillPath,
        };
        self.canvas.cmd(cmd);
    }
}

/// Builder-like API to stroke a path.
///
/// The paint defaults to solid white and the width to 1.0.
/// Call `draw()` to finish the draw operation.
#[must_use = "call Stroke::draw() to finish the builder"]
pub struct Stroke<'cv> {
    canvas: &'cv mut Canvas,
    width: f32,
    set_paint: bool,
}

impl<'cv> Stroke<'cv> {
    fn new(canvas: &'cv mut Canvas) -> Self {
        Self {
            canvas,
            width: 1.,
            set_paint: false,
        }
    }

    set_paint_fns!();

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Emits the stroke command.
    pub fn draw(mut self) {
        if !self.set_paint {
            self = self.solid_color(color::white());
        }
        let width = self.width;
        self.canvas.cmd(Command::StrokePath { width });
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    #[test]
    fn fill_path() {
        let mut canvas = Canvas::new();

        let path = Path::builder()
            .move_to(vec2(500., 500.))
            .line_to(vec2(1000., 1000.))
            .build();

        canvas.fill_path(&path).draw();

        assert_eq!(
            canvas.take_commands(),
            vec![
                Command::ClearPath,
                Command::PushPathSegment(PathSegment::MoveTo(vec2(500., 500.))),
                Command::PushPathSegment(PathSegment::LineTo(vec2(1000., 1000.))),
                Command::UseSolidPaint(color::white()),
                Command::FillPath,
            ]
        );
        assert!(canvas.is_empty());
    }

    #[test]
    fn gradient_stroke() {
        let mut canvas = Canvas::new();
        let path = Path::builder()
            .move_to(vec2(0., 0.))
            .line_to(vec2(10., 0.))
            .build();
        let stops = [
            GradientStop::new(0., color::white()),
            GradientStop::new(1., color::transparent()),
        ];

        canvas
            .stroke_path(&path)
            .linear_gradient(vec2(0., 0.), vec2(0., 10.), stops)
            .width(5.)
            .draw();

        let commands = canvas.take_commands();
        assert_eq!(
            &commands[3..],
            &[
                Command::UseLinearGradientPaint {
                    start: vec2(0., 0.),
                    end: vec2(0., 10.)
                },
                Command::PushGradientStop(stops[0]),
                Command::PushGradientStop(stops[1]),
                Command::StrokePath { width: 5. },
            ]
        );
    }

    #[test]
    fn save_restore_translation() {
        let mut canvas = Canvas::new();
        canvas.with_save(|canvas| {
            canvas.translate(vec2(10., 20.));
            canvas.translate(vec2(1., 1.));
        });
        canvas.draw_icon(Icon::Torch, Rect::default(), Some(color::white()));

        assert_eq!(
            canvas.take_commands(),
            vec![
                Command::SetTranslation(vec2(10., 20.)),
                Command::SetTranslation(vec2(11., 21.)),
                Command::SetTranslation(Vec2::ZERO),
                Command::DrawIcon {
                    icon: Icon::Torch,
                    rect: Rect::default(),
                    tint: Some(color::white())
                },
            ]
        );
    }

    #[test]
    #[should_panic]
    fn unbalanced_restore_panics() {
        Canvas::new().restore();
    }
}
