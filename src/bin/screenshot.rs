//! Screenshot generator
//!
//! Replays scripted pointer input from YAML scenario definitions through the
//! scene and renders the result headlessly to PNG.
//!
//! Usage:
//!   cargo run --bin screenshot -- --scenario scenarios/drag.yaml
//!   cargo run --bin screenshot -- --all
//!   cargo run --bin screenshot -- --all --out-dir screenshots

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use dialogs::config::AppConfig;
use dialogs::messages::Msg;
use dialogs::scene::Scene;
use dialogs::update::update;
use dialogs::view::Frame;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "screenshot", about = "Render scripted dialog scenes to PNG")]
struct Args {
    /// Path to a single scenario YAML file
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Run all scenarios in the scenarios directory
    #[arg(long)]
    all: bool,
    /// Directory containing scenario YAML files
    #[arg(long, default_value = "scenarios")]
    scenarios_dir: PathBuf,
    /// Directory for output PNG files
    #[arg(long, default_value = "screenshots")]
    out_dir: PathBuf,
    /// Read panel styling from this config file
    #[arg(long)]
    config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Scenario YAML schema
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct Scenario {
    name: String,
    /// Stage size in logical pixels
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    /// Device pixel ratio
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    panels: Option<usize>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    /// Advance the animation by `count` frames
    Frames { count: usize },
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_scale() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_scenario(scenario: &Scenario, base: &AppConfig) -> Result<(Vec<u32>, u32, u32)> {
    let config = AppConfig {
        seed: Some(scenario.seed),
        panel_count: scenario.panels.unwrap_or(base.panel_count),
        ..base.clone()
    }
    .sanitized();

    let mut scene = Scene::from_config(&config)?;
    update(
        &mut scene,
        Msg::Resize {
            width: scenario.width as f64,
            height: scenario.height as f64,
        },
    );

    let scale = if scenario.scale > 0.0 { scenario.scale } else { 1.0 };
    let width = ((scenario.width as f64) * scale).round().max(1.0) as u32;
    let height = ((scenario.height as f64) * scale).round().max(1.0) as u32;
    let mut buffer = vec![0u32; (width as usize) * (height as usize)];

    let draw_frame = |scene: &mut Scene, buffer: &mut [u32]| {
        let mut frame = Frame::new(buffer, width as usize, height as usize)
            .with_scale(scale)
            .with_background(config.background);
        scene.apply_canvas_defaults(&mut frame);
        scene.frame(&mut frame);
    };

    for step in &scenario.steps {
        match *step {
            Step::Down { x, y } => update(&mut scene, Msg::PointerDown { x, y }),
            Step::Move { x, y } => update(&mut scene, Msg::PointerMove { x, y }),
            Step::Up => update(&mut scene, Msg::PointerUp),
            Step::Frames { count } => {
                for _ in 0..count {
                    draw_frame(&mut scene, buffer.as_mut_slice());
                }
            }
        }
    }
    // Always finish with a frame reflecting the final state
    draw_frame(&mut scene, buffer.as_mut_slice());

    Ok((buffer, width, height))
}

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

fn save_png(buffer: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    // Convert ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width, height, rgba)
        .context("failed to create image buffer")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Scenario loading
// ---------------------------------------------------------------------------

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(scenario)
}

fn collect_scenarios(args: &Args) -> Result<Vec<(PathBuf, Scenario)>> {
    let mut scenarios = Vec::new();

    if let Some(ref path) = args.scenario {
        let scenario = load_scenario(path)?;
        scenarios.push((path.clone(), scenario));
    } else if args.all {
        if !args.scenarios_dir.exists() {
            anyhow::bail!(
                "scenarios directory does not exist: {}",
                args.scenarios_dir.display()
            );
        }
        let mut entries: Vec<_> = std::fs::read_dir(&args.scenarios_dir)
            .with_context(|| format!("reading scenarios dir {}", args.scenarios_dir.display()))?
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let path = entry.path();
            match load_scenario(&path) {
                Ok(scenario) => scenarios.push((path, scenario)),
                Err(e) => tracing::warn!("Skipping {}: {:#}", path.display(), e),
            }
        }

        if scenarios.is_empty() {
            anyhow::bail!(
                "no scenario files found in {}",
                args.scenarios_dir.display()
            );
        }
    } else {
        anyhow::bail!("specify --scenario <file> or --all");
    }

    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let scenarios = collect_scenarios(&args)?;
    let base = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::default(),
    };

    tracing::info!(
        "Rendering {} scenario(s) → {}",
        scenarios.len(),
        args.out_dir.display()
    );

    for (path, scenario) in scenarios {
        let (buffer, width, height) = render_scenario(&scenario, &base)
            .with_context(|| format!("rendering {}", path.display()))?;

        let out_path = args
            .out_dir
            .join(format!("screenshot-{}.png", scenario.name));
        save_png(&buffer, width, height, &out_path)?;
        tracing::info!("  {} saved {}", scenario.name, out_path.display());
    }

    Ok(())
}
