//! Integration tests for the reference renderer.
//!
//! The ignored test writes PNG frames for visual inspection:
//!
//! ```text
//! cargo test --test render_tests -- --ignored
//! ```

use wrapped_cube::config::CubeConfig;
use wrapped_cube::renderer::{self, frame_triangles};
use wrapped_cube::Simulation;

/// Helper to save RGBA pixels as PNG for visual inspection
fn save_test_png(pixels: &[u8], width: u32, height: u32, filename: &str) {
    use image::{ImageBuffer, Rgba};

    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(width, height, pixels.to_vec())
        .expect("Failed to create image buffer");
    img.save(std::env::temp_dir().join(filename))
        .expect("Failed to save test PNG");
}

fn coverage(pixels: &[u8]) -> usize {
    pixels.chunks(4).filter(|p| p[3] > 0).count()
}

#[test]
fn test_render_every_phase() {
    let mut sim = Simulation::new(CubeConfig::default()).unwrap();
    for clock in [0, 113, 140, 251, 300, 460, 601] {
        sim.run_until(clock).unwrap();
        let pixels = renderer::render_frame(&sim.frame(), 48, 32).unwrap();
        assert_eq!(pixels.len(), 48 * 32 * 4);
        assert!(coverage(&pixels) > 0, "nothing drawn at clock {clock}");
    }
}

#[test]
fn test_triangle_count_is_constant() {
    let mut sim = Simulation::new(CubeConfig::default()).unwrap();
    for clock in [0, 200, 900] {
        sim.run_until(clock).unwrap();
        assert_eq!(frame_triangles(&sim.frame()).len(), 36);
    }
}

#[test]
fn test_folded_cube_is_more_compact_than_net() {
    let mut sim = Simulation::new(CubeConfig::default()).unwrap();
    sim.run_until(1).unwrap();
    let net = coverage(&renderer::render_frame(&sim.frame(), 96, 96).unwrap());
    sim.run_until(251).unwrap();
    let folded = coverage(&renderer::render_frame(&sim.frame(), 96, 96).unwrap());
    assert!(folded < net, "folded {folded} >= net {net}");
}

#[test]
#[ignore]
fn test_save_cycle_pngs() {
    let mut sim = Simulation::new(CubeConfig::default()).unwrap();
    let period = sim.timeline().period();
    for clock in (0..period).step_by(50) {
        sim.run_until(clock).unwrap();
        let pixels = renderer::render_frame(&sim.frame(), 256, 256).unwrap();
        save_test_png(&pixels, 256, 256, &format!("wrapped_cube_{clock:04}.png"));
    }
}
