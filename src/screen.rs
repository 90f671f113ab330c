//! The flashlight screen: the toggle shell and the beam, laid out
//! in a viewport and driven by host input events.
//!
//! The host feeds every input through [`Flashlight::update`] and
//! re-renders with [`Flashlight::render`] whenever it reports
//! [`Changed::Yes`].

use std::time::Duration;

use glam::{vec2, Vec2};

use crate::{
    beam::{BeamDimensions, BeamGeometry},
    canvas::{Canvas, Icon},
    config::{Config, ConfigError},
    rect::Rect,
    toggle::ToggleShell,
};

/// An input event from the host.
///
/// Positions are in viewport coordinates. Only a single
/// pointer is tracked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    Tap { position: Vec2 },
    DragStart { position: Vec2 },
    /// Offset since the previous drag event.
    DragMove { delta: Vec2 },
    DragEnd,
    /// Time elapsed since the previous frame.
    Frame { dt: Duration },
    Resize { size: Vec2 },
}

/// Whether an event changed what the screen shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Changed {
    Yes,
    No,
}

impl Changed {
    pub fn is_yes(self) -> bool {
        self == Changed::Yes
    }
}

impl From<bool> for Changed {
    fn from(changed: bool) -> Self {
        if changed {
            Changed::Yes
        } else {
            Changed::No
        }
    }
}

/// Where each part of the screen sits, in viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    pub viewport: Rect,
    /// The rounded black panel
    pub container: Rect,
    /// The surface the beam is drawn on and dragged over.
    /// Empty while the light is off.
    pub beam_canvas: Rect,
    /// The tappable torch icon
    pub torch: Rect,
}

/// The complete state of the screen.
#[derive(Debug, Clone)]
pub struct Flashlight {
    config: Config,
    viewport: Vec2,
    shell: ToggleShell,
    beam: BeamDimensions,
    dragging: bool,
}

impl Flashlight {
    /// Creates the screen with the light off.
    pub fn new(config: Config, viewport: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            shell: ToggleShell::new(&config.shell, &config.animation),
            beam: BeamDimensions::new(&config.beam),
            viewport,
            dragging: false,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shell(&self) -> &ToggleShell {
        &self.shell
    }

    pub fn beam(&self) -> &BeamDimensions {
        &self.beam
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the host should keep delivering `Frame` events.
    pub fn needs_frames(&self) -> bool {
        self.shell.is_animating()
    }

    /// Applies one input event.
    pub fn update(&mut self, event: Event) -> Changed {
        match event {
            Event::Tap { position } => {
                if !self.layout().torch.contains(position) {
                    return Changed::No;
                }
                self.shell.toggle();
                if !self.shell.beam_visible() && self.dragging {
                    log::debug!("Releasing beam drag as the light turned off");
                    self.dragging = false;
                }
                Changed::Yes
            }
            Event::DragStart { position } => {
                // The beam canvas is empty while off, so this also
                // gates dragging on visibility.
                self.dragging =
                    self.shell.beam_visible() && self.layout().beam_canvas.contains(position);
                if self.dragging {
                    log::debug!("Beam drag started at {:?}", position);
                }
                Changed::No
            }
            Event::DragMove { delta } => {
                if !self.dragging {
                    return Changed::No;
                }
                self.beam.update_from_drag(delta).into()
            }
            Event::DragEnd => {
                self.dragging = false;
                Changed::No
            }
            Event::Frame { dt } => {
                let changed = self.shell.advance(dt);
                if changed {
                    log::trace!(
                        "Shell advanced to extent {}",
                        self.shell.container_extent()
                    );
                }
                changed.into()
            }
            Event::Resize { size } => {
                if size == self.viewport {
                    return Changed::No;
                }
                self.viewport = size;
                Changed::Yes
            }
        }
    }

    /// Computes the current layout.
    ///
    /// The container is centered in the viewport. Inside it, the beam
    /// canvas and the torch icon form a column that is centered both
    /// ways; it may overflow the container while it is still growing.
    pub fn layout(&self) -> Layout {
        let shell = &self.config.shell;
        let viewport = Rect::new(Vec2::ZERO, self.viewport);
        let container = Rect::centered(
            viewport.center(),
            vec2(shell.container_width, self.shell.container_extent()),
        );

        let beam_side = if self.shell.beam_visible() {
            shell.beam_canvas_size
        } else {
            0.
        };
        let torch_size = shell.torch_icon_size();
        let column_height = beam_side + torch_size.y;
        let column_top = container.center().y - column_height / 2.;
        let center_x = container.center().x;

        let beam_canvas = Rect::new(
            vec2(center_x - beam_side / 2., column_top),
            Vec2::splat(beam_side),
        );
        let torch = Rect::new(
            vec2(center_x - torch_size.x / 2., beam_canvas.bottom()),
            torch_size,
        );

        Layout {
            viewport,
            container,
            beam_canvas,
            torch,
        }
    }

    /// Derives the beam for the current state, or `None` while the
    /// light is off.
    pub fn beam_geometry(&self) -> Option<BeamGeometry> {
        if !self.shell.beam_visible() {
            return None;
        }
        let canvas = self.layout().beam_canvas;
        Some(BeamGeometry::derive(canvas.size, &self.beam, &self.config.beam))
    }

    /// Records the draw commands for the current state.
    pub fn render(&self) -> Canvas {
        let layout = self.layout();
        let shell = &self.config.shell;
        let mut canvas = Canvas::new();

        canvas
            .fill_rounded_rect(layout.viewport, 0.)
            .solid_color(shell.background_color())
            .draw();
        canvas
            .fill_rounded_rect(layout.container, shell.corner_radius)
            .solid_color(shell.container_color())
            .draw();

        if let Some(geometry) = self.beam_geometry() {
            if geometry.is_empty() {
                log::debug!(
                    "Beam canvas {:?} has no area; skipping the beam",
                    layout.beam_canvas.size
                );
            } else {
                canvas.with_save(|canvas| {
                    canvas.translate(layout.beam_canvas.pos);
                    draw_beam(canvas, &geometry);
                });
            }
        }

        canvas.draw_icon(Icon::Torch, layout.torch, Some(self.shell.icon_tint()));
        canvas
    }
}

fn draw_beam(canvas: &mut Canvas, geometry: &BeamGeometry) {
    let (gradient_start, gradient_end) = geometry.gradient;
    canvas
        .fill_path(&geometry.cone)
        .linear_gradient(gradient_start, gradient_end, geometry.gradient_stops())
        .draw();
    canvas
        .stroke_path(&geometry.guide_line)
        .solid_color(geometry.guide_line_tint())
        .width(geometry.guide_line_width)
        .draw();
    if let Some(icon) = geometry.icon {
        canvas.draw_icon(Icon::Brightness, icon.rect(), None);
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::Command;

    use super::*;

    fn viewport() -> Vec2 {
        vec2(400., 800.)
    }

    fn flashlight() -> Flashlight {
        Flashlight::new(Config::default(), viewport()).unwrap()
    }

    fn tap_torch(flashlight: &mut Flashlight) -> Changed {
        let position = flashlight.layout().torch.center();
        flashlight.update(Event::Tap { position })
    }

    fn settle(flashlight: &mut Flashlight) {
        while flashlight.needs_frames() {
            let _ = flashlight.update(Event::Frame {
                dt: Duration::from_millis(16),
            });
        }
    }

    #[test]
    fn off_layout() {
        let layout = flashlight().layout();
        assert_eq!(
            layout.container,
            Rect::new(vec2(100., 350.), vec2(200., 100.))
        );
        assert!(layout.beam_canvas.is_empty());
        assert_eq!(layout.torch, Rect::new(vec2(180., 370.), vec2(40., 60.)));
    }

    #[test]
    fn on_layout() {
        let mut flashlight = flashlight();
        assert_eq!(tap_torch(&mut flashlight), Changed::Yes);
        settle(&mut flashlight);

        let layout = flashlight.layout();
        assert_eq!(
            layout.container,
            Rect::new(vec2(100., 275.), vec2(200., 250.))
        );
        assert_eq!(
            layout.beam_canvas,
            Rect::new(vec2(125., 295.), vec2(150., 150.))
        );
        assert_eq!(layout.torch, Rect::new(vec2(180., 445.), vec2(40., 60.)));
    }

    #[test]
    fn toggle_scenario() {
        let mut flashlight = flashlight();
        assert!(!flashlight.shell().is_on());
        assert!(flashlight.beam_geometry().is_none());

        assert!(tap_torch(&mut flashlight).is_yes());
        assert!(flashlight.shell().is_on());
        assert_eq!(flashlight.shell().container_extent(), 100.);
        assert!(flashlight.needs_frames());

        let frame = Event::Frame {
            dt: Duration::from_millis(16),
        };
        assert!(flashlight.update(frame).is_yes());
        let extent = flashlight.shell().container_extent();
        assert!(extent > 100. && extent < 250.);

        settle(&mut flashlight);
        assert_eq!(flashlight.shell().container_extent(), 250.);
        assert_eq!(flashlight.update(frame), Changed::No);

        let geometry = flashlight.beam_geometry().unwrap();
        assert_eq!(
            (flashlight.beam().height(), flashlight.beam().width()),
            (300., 300.)
        );
        assert_eq!(geometry.bending_factor, 50.);
    }

    #[test]
    fn tap_outside_torch_is_ignored() {
        let mut flashlight = flashlight();
        assert_eq!(
            flashlight.update(Event::Tap {
                position: vec2(5., 5.)
            }),
            Changed::No
        );
        assert!(!flashlight.shell().is_on());
    }

    #[test]
    fn drag_resizes_beam() {
        let mut flashlight = flashlight();
        let _ = tap_torch(&mut flashlight);
        settle(&mut flashlight);

        let position = flashlight.layout().beam_canvas.center();
        assert_eq!(
            flashlight.update(Event::DragStart { position }),
            Changed::No
        );
        assert!(flashlight.is_dragging());

        let changed = flashlight.update(Event::DragMove {
            delta: vec2(-40., 60.),
        });
        assert_eq!(changed, Changed::Yes);
        assert_eq!(
            (flashlight.beam().height(), flashlight.beam().width()),
            (240., 260.)
        );

        assert_eq!(
            flashlight.update(Event::DragMove { delta: Vec2::ZERO }),
            Changed::No
        );

        let _ = flashlight.update(Event::DragEnd);
        assert!(!flashlight.is_dragging());
        assert_eq!(
            flashlight.update(Event::DragMove {
                delta: vec2(-40., 60.)
            }),
            Changed::No
        );
    }

    #[test]
    fn drag_unreachable_while_off() {
        let mut flashlight = flashlight();
        let center = flashlight.layout().container.center();
        let _ = flashlight.update(Event::DragStart { position: center });
        assert!(!flashlight.is_dragging());
        assert_eq!(
            flashlight.update(Event::DragMove {
                delta: vec2(-100., 100.)
            }),
            Changed::No
        );
        assert_eq!(flashlight.beam(), &BeamDimensions::default());
    }

    #[test]
    fn dimensions_survive_toggling() {
        let mut flashlight = flashlight();
        let _ = tap_torch(&mut flashlight);
        settle(&mut flashlight);
        let position = flashlight.layout().beam_canvas.center();
        let _ = flashlight.update(Event::DragStart { position });
        let _ = flashlight.update(Event::DragMove {
            delta: vec2(-100., 100.),
        });
        let _ = flashlight.update(Event::DragEnd);

        let _ = tap_torch(&mut flashlight);
        settle(&mut flashlight);
        let _ = tap_torch(&mut flashlight);
        assert_eq!(
            (flashlight.beam().height(), flashlight.beam().width()),
            (200., 200.)
        );
    }

    #[test]
    fn render_off_has_no_beam() {
        let commands = flashlight().render().take_commands();
        assert!(commands.iter().all(|c| !matches!(
            c,
            Command::FillPath | Command::StrokePath { .. }
        )));
        assert!(matches!(
            commands.last(),
            Some(Command::DrawIcon {
                icon: Icon::Torch,
                ..
            })
        ));
    }

    #[test]
    fn render_on_draws_beam_in_canvas_space() {
        let mut flashlight = flashlight();
        let _ = tap_torch(&mut flashlight);
        settle(&mut flashlight);

        let commands = flashlight.render().take_commands();
        let beam_origin = flashlight.layout().beam_canvas.pos;
        assert!(commands.contains(&Command::SetTranslation(beam_origin)));
        assert!(commands.contains(&Command::FillPath));
        assert!(commands.contains(&Command::StrokePath { width: 5. }));
        assert!(commands.contains(&Command::UseLinearGradientPaint {
            start: vec2(75., -150.),
            end: vec2(75., 150.),
        }));
        assert!(commands.contains(&Command::SetTranslation(Vec2::ZERO)));

        let brightness = commands.iter().find_map(|c| match c {
            Command::DrawIcon {
                icon: Icon::Brightness,
                rect,
                tint,
            } => Some((*rect, *tint)),
            _ => None,
        });
        // Line end at 75 + 150 = 225, line at -150 - 20 = -170.
        assert_eq!(
            brightness,
            Some((Rect::new(vec2(235., -177.5), vec2(15., 15.)), None))
        );
    }

    #[test]
    fn resize_relayouts() {
        let mut flashlight = flashlight();
        assert_eq!(
            flashlight.update(Event::Resize { size: viewport() }),
            Changed::No
        );
        assert_eq!(
            flashlight.update(Event::Resize {
                size: vec2(200., 200.)
            }),
            Changed::Yes
        );
        assert_eq!(flashlight.layout().container.center(), vec2(100., 100.));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = Config::default();
        config.beam.max_extent = 10.;
        assert!(Flashlight::new(config, viewport()).is_err());
    }
}
