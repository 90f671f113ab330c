use std::time::Duration;

use crate::{
    animation::Animated,
    color::Tint,
    config::{AnimationConfig, ShellConfig},
};

/// The on/off switch of the flashlight.
///
/// Toggling retargets two animations: the height of the container
/// holding the beam and the torch icon, and the tint of the torch icon.
/// The host advances them with [`ToggleShell::advance`] each frame.
#[derive(Debug, Clone)]
pub struct ToggleShell {
    is_on: bool,
    container_extent: Animated<f32>,
    icon_tint: Animated<Tint>,
    off_extent: f32,
    on_extent: f32,
    off_tint: Tint,
    on_tint: Tint,
}

impl ToggleShell {
    /// Creates a shell in the off state, at rest.
    pub fn new(shell: &ShellConfig, animation: &AnimationConfig) -> Self {
        let duration = animation.duration();
        Self {
            is_on: false,
            container_extent: Animated::new(shell.off_extent, duration, animation.easing),
            icon_tint: Animated::new(shell.off_tint(), duration, animation.easing),
            off_extent: shell.off_extent,
            on_extent: shell.on_extent,
            off_tint: shell.off_tint(),
            on_tint: shell.on_tint(),
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Whether the beam is drawn and can be dragged.
    pub fn beam_visible(&self) -> bool {
        self.is_on
    }

    /// Flips the switch and starts both transitions.
    pub fn toggle(&mut self) {
        self.is_on = !self.is_on;
        log::debug!("Flashlight turned {}", if self.is_on { "on" } else { "off" });

        let (extent, tint) = if self.is_on {
            (self.on_extent, self.on_tint)
        } else {
            (self.off_extent, self.off_tint)
        };
        self.container_extent.animate_to(extent);
        self.icon_tint.animate_to(tint);
    }

    /// Advances both transitions. Returns whether either value changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let extent_changed = self.container_extent.advance(dt);
        let tint_changed = self.icon_tint.advance(dt);
        extent_changed || tint_changed
    }

    pub fn is_animating(&self) -> bool {
        self.container_extent.is_running() || self.icon_tint.is_running()
    }

    /// The container height currently shown.
    pub fn container_extent(&self) -> f32 {
        self.container_extent.value()
    }

    /// The torch icon tint currently shown.
    pub fn icon_tint(&self) -> Tint {
        self.icon_tint.value()
    }
}
