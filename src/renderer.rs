//! Provides a software rasterizer that draws simulation frames.
//!
//! This is a reference sink for [`Frame`]s: it never feeds anything back
//! into the simulation. The scene is the solid volume plus two coincident
//! double-sided quads per tile (a translucent yellow inner layer and a
//! translucent white outer layer), seen through a fixed perspective camera
//! with flat shading and a z-buffer.
//!
//! No GPU is required; it runs entirely on the CPU.
//!
//! # Examples
//! ```
//! use wrapped_cube::config::CubeConfig;
//! use wrapped_cube::renderer;
//! use wrapped_cube::simulation::Simulation;
//!
//! let sim = Simulation::new(CubeConfig::default()).unwrap();
//! let pixels = renderer::render_frame(&sim.frame(), 64, 48).unwrap();
//! assert_eq!(pixels.len(), 64 * 48 * 4);
//! ```

use glam::{Mat4, Vec3, Vec4};

use crate::simulation::Frame;

/// Uniform scale applied to the whole assembly.
pub const SCENE_SCALE: f32 = 5.0;

/// Visible tile edge as a fraction of the lattice tile size.
pub const TILE_SHRINK: f32 = 0.99;

/// Distance between the inner and outer layer of a tile.
pub const TILE_THICKNESS: f32 = 0.01;

const INNER_COLOR: [f32; 3] = [1.0, 1.0, 0.0];
const INNER_ALPHA: f32 = 0.5;
const OUTER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const OUTER_ALPHA: f32 = 0.8;

/// A world-space triangle with a flat colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub verts: [Vec3; 3],
    pub color: [f32; 3],
    pub alpha: f32,
}

impl Triangle {
    fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    fn centroid(&self) -> Vec3 {
        (self.verts[0] + self.verts[1] + self.verts[2]) / 3.0
    }
}

/// Orders translucent triangles farthest-first as seen from `eye`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use wrapped_cube::renderer::{sort_back_to_front, Triangle};
///
/// let at = |z: f32| Triangle {
///     verts: [Vec3::new(0.0, 0.0, z), Vec3::new(1.0, 0.0, z), Vec3::new(0.0, 1.0, z)],
///     color: [1.0; 3],
///     alpha: 0.5,
/// };
/// let mut tris = vec![at(1.0), at(-3.0)];
/// sort_back_to_front(&mut tris, Vec3::new(0.0, 0.0, 10.0));
/// assert_eq!(tris[0].verts[0].z, -3.0);
/// ```
pub fn sort_back_to_front(triangles: &mut [Triangle], eye: Vec3) {
    triangles.sort_by(|a, b| {
        eye.distance_squared(b.centroid())
            .total_cmp(&eye.distance_squared(a.centroid()))
    });
}

/// Builds the world-space triangles of a frame.
///
/// # Examples
/// ```
/// use wrapped_cube::config::CubeConfig;
/// use wrapped_cube::renderer::frame_triangles;
/// use wrapped_cube::simulation::Simulation;
///
/// let sim = Simulation::new(CubeConfig::default()).unwrap();
/// // 6 volume faces + 6 tiles × 2 layers, two triangles each
/// assert_eq!(frame_triangles(&sim.frame()).len(), 36);
/// ```
pub fn frame_triangles(frame: &Frame) -> Vec<Triangle> {
    let whole = Mat4::from_scale_rotation_translation(
        Vec3::splat(SCENE_SCALE),
        frame.assembly,
        Vec3::ZERO,
    );
    let mut triangles = Vec::with_capacity(36);

    // ---- Solid volume ----
    let half = frame.tile_size * TILE_SHRINK * 0.5;
    for axis in 0..3 {
        for sign in [-1.0_f32, 1.0] {
            let mut normal = Vec3::ZERO;
            normal[axis] = sign;
            let mut u = Vec3::ZERO;
            u[(axis + 1) % 3] = 1.0;
            let v = normal.cross(u);
            let center = normal * half;
            let corners = [
                center - u * half - v * half,
                center + u * half - v * half,
                center + u * half + v * half,
                center - u * half + v * half,
            ];
            let world_normal = frame.assembly * normal;
            let color = (world_normal * 0.5 + Vec3::splat(0.5)).to_array();
            push_quad(&mut triangles, &whole, corners, color, 1.0);
        }
    }

    // ---- Wrapper tiles ----
    let wrapper = whole * Mat4::from_translation(frame.wrapper_offset);
    let h = frame.tile_size * TILE_SHRINK * 0.5;
    for tile in &frame.tiles {
        let model = wrapper
            * Mat4::from_rotation_translation(tile.pose.orientation, tile.pose.position);
        for (z, color, alpha) in [
            (TILE_THICKNESS * 0.5, INNER_COLOR, INNER_ALPHA),
            (-TILE_THICKNESS * 0.5, OUTER_COLOR, OUTER_ALPHA),
        ] {
            let corners = [
                Vec3::new(-h, -h, z),
                Vec3::new(h, -h, z),
                Vec3::new(h, h, z),
                Vec3::new(-h, h, z),
            ];
            push_quad(&mut triangles, &model, corners, color, alpha);
        }
    }

    triangles
}

fn push_quad(
    triangles: &mut Vec<Triangle>,
    model: &Mat4,
    corners: [Vec3; 4],
    color: [f32; 3],
    alpha: f32,
) {
    let c = corners.map(|p| model.transform_point3(p));
    triangles.push(Triangle {
        verts: [c[0], c[1], c[2]],
        color,
        alpha,
    });
    triangles.push(Triangle {
        verts: [c[0], c[2], c[3]],
        color,
        alpha,
    });
}

/// Renders a frame into a row-major RGBA pixel buffer.
///
/// Returns `None` for a zero-sized target.
pub fn render_frame(frame: &Frame, width: u32, height: u32) -> Option<Vec<u8>> {
    if width == 0 || height == 0 {
        return None;
    }
    let triangles = frame_triangles(frame);

    // ---- Camera ----
    let eye = Vec3::new(0.0, 0.0, 70.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let aspect = width as f32 / height as f32;
    let proj = Mat4::perspective_rh_gl(70.0_f32.to_radians(), aspect, 0.1, 100.0);
    let view_proj = proj * view;

    // ---- Framebuffer ----
    let w = width as usize;
    let h = height as usize;
    let mut target = Target {
        width: w,
        height: h,
        color: vec![[0.0_f32; 4]; w * h],
        depth: vec![f32::INFINITY; w * h],
    };

    // Opaque geometry first so translucent layers blend over it.
    let (opaque, mut translucent): (Vec<Triangle>, Vec<Triangle>) =
        triangles.into_iter().partition(Triangle::is_opaque);
    for tri in &opaque {
        rasterize(&mut target, &view_proj, tri);
    }
    sort_back_to_front(&mut translucent, eye);
    for tri in &translucent {
        rasterize(&mut target, &view_proj, tri);
    }

    // ---- Convert f32 → u8 RGBA ----
    let mut pixels = vec![0u8; w * h * 4];
    for (i, c) in target.color.iter().enumerate() {
        for k in 0..4 {
            pixels[i * 4 + k] = (c[k].clamp(0.0, 1.0) * 255.0) as u8;
        }
    }

    Some(pixels)
}

struct Target {
    width: usize,
    height: usize,
    color: Vec<[f32; 4]>,
    depth: Vec<f32>,
}

fn rasterize(target: &mut Target, view_proj: &Mat4, tri: &Triangle) {
    let width = target.width as f32;
    let height = target.height as f32;
    let mut screen = [Vec3::ZERO; 3];

    for i in 0..3 {
        let clip: Vec4 = *view_proj * tri.verts[i].extend(1.0);
        if clip.w <= 0.0 {
            return;
        }
        let inv_w = 1.0 / clip.w;
        screen[i] = Vec3::new(
            (clip.x * inv_w * 0.5 + 0.5) * width,
            (0.5 - clip.y * inv_w * 0.5) * height,
            clip.z * inv_w,
        );
    }

    // Flat shading, double-sided
    let light_dir = Vec3::new(0.5, 0.8, 0.3).normalize();
    let light2_dir = Vec3::new(-0.3, 0.2, -0.5).normalize();
    let normal = (tri.verts[1] - tri.verts[0])
        .cross(tri.verts[2] - tri.verts[0])
        .normalize_or_zero();
    let ndl_main = normal.dot(light_dir).abs();
    let ndl_fill = normal.dot(light2_dir).abs();
    let shade = (0.35 + ndl_main * 0.50 + ndl_fill * 0.15).min(1.0);
    let shaded = tri.color.map(|c| (c * shade).min(1.0));

    // Screen-space bounding box
    let min_x = screen[0].x.min(screen[1].x).min(screen[2].x).max(0.0) as usize;
    let max_x = (screen[0].x.max(screen[1].x).max(screen[2].x).ceil().max(0.0) as usize)
        .min(target.width);
    let min_y = screen[0].y.min(screen[1].y).min(screen[2].y).max(0.0) as usize;
    let max_y = (screen[0].y.max(screen[1].y).max(screen[2].y).ceil().max(0.0) as usize)
        .min(target.height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let (u, v, w) = barycentric(screen, x as f32 + 0.5, y as f32 + 0.5);
            if u < 0.0 || v < 0.0 || w < 0.0 {
                continue;
            }
            let z = u * screen[0].z + v * screen[1].z + w * screen[2].z;
            let idx = y * target.width + x;
            if z >= target.depth[idx] {
                continue;
            }

            if tri.is_opaque() {
                target.depth[idx] = z;
                target.color[idx] = [shaded[0], shaded[1], shaded[2], 1.0];
            } else {
                let dst = target.color[idx];
                let a = tri.alpha;
                target.color[idx] = [
                    shaded[0] * a + dst[0] * (1.0 - a),
                    shaded[1] * a + dst[1] * (1.0 - a),
                    shaded[2] * a + dst[2] * (1.0 - a),
                    a + dst[3] * (1.0 - a),
                ];
            }
        }
    }
}

// ===========================================================================
// Rasterization helpers
// ===========================================================================

fn barycentric(tri: [Vec3; 3], px: f32, py: f32) -> (f32, f32, f32) {
    let v0x = tri[1].x - tri[0].x;
    let v0y = tri[1].y - tri[0].y;
    let v1x = tri[2].x - tri[0].x;
    let v1y = tri[2].y - tri[0].y;
    let v2x = px - tri[0].x;
    let v2y = py - tri[0].y;

    let d00 = v0x * v0x + v0y * v0y;
    let d01 = v0x * v1x + v0y * v1y;
    let d11 = v1x * v1x + v1y * v1y;
    let d20 = v2x * v0x + v2y * v0y;
    let d21 = v2x * v1x + v2y * v1y;

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-10 {
        return (-1.0, -1.0, -1.0);
    }

    let inv = 1.0 / denom;
    let v = (d11 * d20 - d01 * d21) * inv;
    let w = (d00 * d21 - d01 * d20) * inv;
    let u = 1.0 - v - w;

    (u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CubeConfig;
    use crate::simulation::Simulation;

    fn first_frame() -> Frame {
        Simulation::new(CubeConfig::default()).unwrap().frame()
    }

    #[test]
    fn test_zero_size_target() {
        assert!(render_frame(&first_frame(), 0, 64).is_none());
        assert!(render_frame(&first_frame(), 64, 0).is_none());
    }

    #[test]
    fn test_output_dimensions() {
        let pixels = render_frame(&first_frame(), 40, 30).unwrap();
        assert_eq!(pixels.len(), 40 * 30 * 4);
    }

    #[test]
    fn test_scene_is_visible_and_centred() {
        let size = 64usize;
        let pixels = render_frame(&first_frame(), size as u32, size as u32).unwrap();
        let covered = pixels.chunks(4).filter(|p| p[3] > 0).count();
        assert!(covered > 0);
        assert!(covered < size * size);
        // The solid volume sits at the origin, straight in front of the camera.
        let centre = (size / 2 * size + size / 2) * 4;
        assert_eq!(pixels[centre + 3], 255);
    }

    #[test]
    fn test_translucent_layers_sorted_by_distance() {
        let mut sim = Simulation::new(CubeConfig::default()).unwrap();
        sim.run_until(300).unwrap();
        let eye = Vec3::new(0.0, 0.0, 70.0);
        let mut translucent: Vec<Triangle> = frame_triangles(&sim.frame())
            .into_iter()
            .filter(|t| !t.is_opaque())
            .collect();
        assert_eq!(translucent.len(), 24);
        sort_back_to_front(&mut translucent, eye);
        for pair in translucent.windows(2) {
            assert!(eye.distance(pair[0].centroid()) >= eye.distance(pair[1].centroid()));
        }
    }

    #[test]
    fn test_nearer_layer_blends_last() {
        let quad = |z: f32, color: [f32; 3]| Triangle {
            verts: [
                Vec3::new(-20.0, -20.0, z),
                Vec3::new(20.0, -20.0, z),
                Vec3::new(0.0, 20.0, z),
            ],
            color,
            alpha: 0.9,
        };
        let near = quad(1.0, [1.0, 0.0, 0.0]);
        let far = quad(-1.0, [0.0, 0.0, 1.0]);
        let mut a = vec![near, far];
        let mut b = vec![far, near];
        let eye = Vec3::new(0.0, 0.0, 70.0);
        sort_back_to_front(&mut a, eye);
        sort_back_to_front(&mut b, eye);
        assert_eq!(a, b);
        assert_eq!(a[1], near);
    }

    #[test]
    fn test_barycentric_degenerate() {
        let tri = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        assert_eq!(barycentric(tri, 0.5, 0.0), (-1.0, -1.0, -1.0));
    }
}
