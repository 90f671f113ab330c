//! Tunable constants for the screen.
//!
//! Every field has a default matching the stock flashlight screen,
//! so a partial document (or none at all) is enough.

use std::time::Duration;

use glam::{vec2, Vec2};
use serde::Deserialize;

use crate::{animation::Easing, color, color::Tint};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("beam bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f32, max: f32 },
    #[error("default beam {field} {value} lies outside [{min}, {max}]")]
    DefaultOutOfBounds {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub beam: BeamConfig,
    pub shell: ShellConfig,
    pub animation: AnimationConfig,
}

impl Config {
    /// Checks that the configuration upholds the beam clamp invariant,
    /// that no dimension is negative or non-finite, and that the easing
    /// curve is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.beam.validate()?;
        self.shell.validate()?;
        self.animation.validate()?;
        Ok(())
    }
}

/// Beam geometry constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Lower clamp for both height and width
    pub min_extent: f32,
    /// Upper clamp for both height and width
    pub max_extent: f32,
    pub default_height: f32,
    pub default_width: f32,
    /// Half the width of the cone's base
    pub base_half_width: f32,
    /// Distance of the guide line above the top of the cone
    pub guide_line_offset: f32,
    /// Cap on how far the guide line bows upward
    pub max_bend: f32,
    pub guide_line_width: f32,
    /// Side of the brightness icon square
    pub icon_size: f32,
    /// Gap between the guide line's right end and the icon
    pub icon_gap: f32,
    /// Alpha of the gradient at the top of the cone
    pub top_alpha: f32,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            min_extent: 50.,
            max_extent: 300.,
            default_height: 300.,
            default_width: 300.,
            base_half_width: 25.,
            guide_line_offset: 20.,
            max_bend: 50.,
            guide_line_width: 5.,
            icon_size: 15.,
            icon_gap: 10.,
            top_alpha: 0.6,
        }
    }
}

impl BeamConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("beam.min_extent", self.min_extent),
            ("beam.max_extent", self.max_extent),
            ("beam.default_height", self.default_height),
            ("beam.default_width", self.default_width),
            ("beam.base_half_width", self.base_half_width),
            ("beam.guide_line_offset", self.guide_line_offset),
            ("beam.max_bend", self.max_bend),
            ("beam.guide_line_width", self.guide_line_width),
            ("beam.icon_size", self.icon_size),
            ("beam.icon_gap", self.icon_gap),
            ("beam.top_alpha", self.top_alpha),
        ] {
            check_dimension(field, value)?;
        }

        if self.min_extent > self.max_extent {
            return Err(ConfigError::InvertedBounds {
                min: self.min_extent,
                max: self.max_extent,
            });
        }

        for (field, value) in [("height", self.default_height), ("width", self.default_width)] {
            if value < self.min_extent || value > self.max_extent {
                return Err(ConfigError::DefaultOutOfBounds {
                    field,
                    value,
                    min: self.min_extent,
                    max: self.max_extent,
                });
            }
        }
        Ok(())
    }
}

/// Toggle shell and screen layout constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub container_width: f32,
    /// Container height while the light is off
    pub off_extent: f32,
    /// Container height while the light is on
    pub on_extent: f32,
    pub corner_radius: f32,
    /// Side of the square beam canvas while the light is on
    pub beam_canvas_size: f32,
    pub torch_icon_width: f32,
    pub torch_icon_height: f32,
    /// RGBA
    pub off_tint: [u8; 4],
    /// RGBA
    pub on_tint: [u8; 4],
    /// RGBA
    pub container_color: [u8; 4],
    /// RGBA
    pub background_color: [u8; 4],
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            container_width: 200.,
            off_extent: 100.,
            on_extent: 250.,
            corner_radius: 30.,
            beam_canvas_size: 150.,
            torch_icon_width: 40.,
            torch_icon_height: 60.,
            off_tint: [0x88, 0x88, 0x88, 0xff],
            on_tint: [0xff, 0xff, 0xff, 0xff],
            container_color: [0x00, 0x00, 0x00, 0xff],
            background_color: [0xff, 0xff, 0xff, 0xff],
        }
    }
}

impl ShellConfig {
    pub fn off_tint(&self) -> Tint {
        color::from_rgba8(self.off_tint)
    }

    pub fn on_tint(&self) -> Tint {
        color::from_rgba8(self.on_tint)
    }

    pub fn container_color(&self) -> Tint {
        color::from_rgba8(self.container_color)
    }

    pub fn background_color(&self) -> Tint {
        color::from_rgba8(self.background_color)
    }

    pub fn torch_icon_size(&self) -> Vec2 {
        vec2(self.torch_icon_width, self.torch_icon_height)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("shell.container_width", self.container_width),
            ("shell.off_extent", self.off_extent),
            ("shell.on_extent", self.on_extent),
            ("shell.corner_radius", self.corner_radius),
            ("shell.beam_canvas_size", self.beam_canvas_size),
            ("shell.torch_icon_width", self.torch_icon_width),
            ("shell.torch_icon_height", self.torch_icon_height),
        ] {
            check_dimension(field, value)?;
        }
        if self.beam_canvas_size == 0. {
            return Err(ConfigError::NotPositive {
                field: "shell.beam_canvas_size",
                value: self.beam_canvas_size,
            });
        }
        Ok(())
    }
}

/// Timing of the toggle transitions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::FastOutSlowIn,
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Easing::CubicBezier { x1, y1, x2, y2 } = self.easing {
            // y may overshoot below 0 or above 1; x may not go negative.
            check_dimension("animation.easing.x1", x1)?;
            check_dimension("animation.easing.x2", x2)?;
            check_finite("animation.easing.y1", y1)?;
            check_finite("animation.easing.y2", y2)?;
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn check_dimension(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0. {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(())
    }
}
