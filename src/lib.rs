//! An animated flashlight toggle with a drag-resizable light beam.
//!
//! Everything here is host-agnostic: input arrives as [`Event`]s,
//! time as frame deltas, and output leaves as a flat stream of draw
//! [`Command`]s (or, for the beam, as tessellated [`Mesh`]es).

pub mod animation;
pub mod beam;
mod canvas;
pub mod color;
pub mod config;
mod path;
mod rect;
mod screen;
mod toggle;

pub use beam::{BeamDimensions, BeamGeometry, BeamMeshes, IconPlacement};
pub use canvas::{Canvas, Command, Fill, GradientStop, Icon, Stroke};
pub use color::Tint;
pub use config::{Config, ConfigError};
pub use path::{Mesh, Path, PathBuilder, PathSegment, TessellateError, Tessellator};
pub use rect::Rect;
pub use screen::{Changed, Event, Flashlight, Layout};
pub use toggle::ToggleShell;

pub extern crate glam;
