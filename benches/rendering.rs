//! Benchmarks for rasterising scenes into the software frame buffer
//!
//! Run with: cargo bench rendering

use dialogs::canvas::{rotated_rect, Canvas, Shadow};
use dialogs::color::Color;
use dialogs::config::AppConfig;
use dialogs::point::Point;
use dialogs::scene::Scene;
use dialogs::view::{blend_colors, Frame};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const ACCENT: Color = Color::rgb(0xFF, 0x43, 0x38);

// ============================================================================
// Primitives
// ============================================================================

#[divan::bench(args = [800, 1280, 1920, 2560])]
fn clear_stage(bencher: divan::Bencher, width: usize) {
    let height = width * 9 / 16;
    let mut buffer = vec![0u32; width * height];
    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, width, height);
        frame.clear_rect(0.0, 0.0, width as f64, height as f64);
    });
}

#[divan::bench]
fn blend_colors_half() {
    divan::black_box(blend_colors(
        divan::black_box(0xFFFFFFFF),
        divan::black_box(0xFFFF4338),
        divan::black_box(0.5),
    ));
}

#[divan::bench(args = [false, true])]
fn fill_circle(bencher: divan::Bencher, shadow: bool) {
    let mut buffer = vec![0xFFFFFFFF_u32; 200 * 200];
    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, 200, 200);
        frame.set_shadow(shadow.then(Shadow::default));
        frame.fill_circle(Point::new(100.0, 100.0), 8.0, ACCENT);
    });
}

#[divan::bench(args = [0.0, 15.0, 30.0])]
fn fill_rotated_card(bencher: divan::Bencher, degrees: f64) {
    let mut buffer = vec![0xFFFFFFFF_u32; 800 * 600];
    let corners = rotated_rect(
        Point::new(400.0, 300.0),
        Point::new(130.0, 130.0),
        260.0,
        260.0,
        degrees,
    );
    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, 800, 600);
        frame.set_shadow(Some(Shadow::default()));
        frame.fill_quad(corners, Color::rgb(0xF4, 0xE5, 0x5A));
    });
}

// ============================================================================
// Full frame
// ============================================================================

#[divan::bench(args = [1.0, 2.0])]
fn full_frame_dragging(bencher: divan::Bencher, scale: f64) {
    let config = AppConfig {
        seed: Some(5),
        ..AppConfig::default()
    };
    let mut scene = Scene::from_config(&config).expect("scene");
    scene.resize(800.0, 600.0);
    let start = scene.frontmost().map(|p| p.center_pos()).unwrap_or_default();
    scene.pointer_down(start.x, start.y);
    scene.pointer_move(start.x + 120.0, start.y + 40.0);

    let width = (800.0 * scale) as usize;
    let height = (600.0 * scale) as usize;
    let mut buffer = vec![0u32; width * height];
    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, width, height)
            .with_scale(scale)
            .with_background(config.background);
        scene.apply_canvas_defaults(&mut frame);
        scene.frame(&mut frame);
    });
}
