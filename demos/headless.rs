//! Runs a scripted session against the flashlight screen and prints
//! what a host would draw.
//!
//! Pass a JSON config path as the first argument to override defaults.

use std::{fs, time::Duration};

use anyhow::Context as _;
use glam::vec2;
use torchlight::{Changed, Command, Config, Event, Flashlight, Tessellator};

fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text =
                fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
            let config = serde_json::from_str(&text)
                .with_context(|| format!("malformed config in {}", path))?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn summarize(flashlight: &Flashlight) {
    let mut canvas = flashlight.render();
    let commands = canvas.take_commands();
    let fills = commands
        .iter()
        .filter(|c| matches!(c, Command::FillPath | Command::FillRoundedRect { .. }))
        .count();
    let strokes = commands
        .iter()
        .filter(|c| matches!(c, Command::StrokePath { .. }))
        .count();
    println!(
        "on={} extent={:.1} beam={}x{} commands={} fills={} strokes={}",
        flashlight.shell().is_on(),
        flashlight.shell().container_extent(),
        flashlight.beam().width(),
        flashlight.beam().height(),
        commands.len(),
        fills,
        strokes,
    );
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let mut flashlight = Flashlight::new(config, vec2(400., 800.))?;
    summarize(&flashlight);

    let torch = flashlight.layout().torch.center();
    if flashlight.update(Event::Tap { position: torch }) == Changed::Yes {
        summarize(&flashlight);
    }

    let frame = Event::Frame {
        dt: Duration::from_millis(16),
    };
    while flashlight.needs_frames() {
        if flashlight.update(frame).is_yes() {
            summarize(&flashlight);
        }
    }

    let grab = flashlight.layout().beam_canvas.center();
    let _ = flashlight.update(Event::DragStart { position: grab });
    for _ in 0..10 {
        if flashlight
            .update(Event::DragMove {
                delta: vec2(-15., 20.),
            })
            .is_yes()
        {
            summarize(&flashlight);
        }
    }
    let _ = flashlight.update(Event::DragEnd);

    if let Some(geometry) = flashlight.beam_geometry() {
        let meshes = geometry.tessellate(&mut Tessellator::new())?;
        println!(
            "cone: {} triangles, guide line: {} triangles, bend {}",
            meshes.cone.triangle_count(),
            meshes.guide_line.triangle_count(),
            geometry.bending_factor,
        );
    }

    Ok(())
}
