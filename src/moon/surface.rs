//! Moon surface: crater detail baked once, shaded per frame on the CPU.

use std::f32::consts::PI;

use glam::{Mat3, Vec2, Vec3};
use raylib::prelude::*;

use crate::constants::*;
use crate::draw::{unit_to_byte, DrawCommand};
use crate::moon::camera::{Camera, Projected};
use crate::moon::noise::Simplex;

pub const MOON_CENTER: Vec3 = Vec3::new(4.0, 3.0, -8.0);

const BASE: Vec3 = Vec3::new(0xd4 as f32 / 255.0, 0xd0 as f32 / 255.0, 0xc8 as f32 / 255.0);
const GLOW: Vec3 = Vec3::new(0x60 as f32 / 255.0, 0xa5 as f32 / 255.0, 0xfa as f32 / 255.0);
const SHADOW: Vec3 = Vec3::new(0x1e as f32 / 255.0, 0x29 as f32 / 255.0, 0x3b as f32 / 255.0);

/// Equirectangular map of crater detail over the unit sphere.
pub struct CraterMap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl CraterMap {
    pub fn bake(noise: &Simplex, width: usize, height: usize) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            let lat = PI * 0.5 - (row as f32 + 0.5) / height as f32 * PI;
            for col in 0..width {
                let lon = (col as f32 + 0.5) / width as f32 * 2.0 * PI - PI;
                let dir = Vec3::new(lat.cos() * lon.sin(), lat.sin(), lat.cos() * lon.cos());
                data.push(noise.craters(dir * MOON_RADIUS * 1.5));
            }
        }
        Self { width, height, data }
    }

    /// Detail in the direction of a unit vector in moon-local space.
    pub fn sample(&self, dir: Vec3) -> f32 {
        let lon = dir.x.atan2(dir.z);
        let lat = dir.y.clamp(-1.0, 1.0).asin();
        let u = (lon / (2.0 * PI) + 0.5) * self.width as f32;
        let v = (0.5 - lat / PI) * self.height as f32;
        let col = (u.floor() as isize).rem_euclid(self.width as isize) as usize;
        let row = (v.floor() as isize).clamp(0, self.height as isize - 1) as usize;
        self.data[row * self.width + col]
    }
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear RGB for a view-space surface normal and its crater detail.
pub fn shade(normal: Vec3, detail: f32) -> Vec3 {
    let light = Vec3::new(1.0, 0.3, 0.5).normalize();
    let n_dot_l = normal.dot(light);
    let diffuse = n_dot_l.max(0.0);
    let terminator = smoothstep(-0.1, 0.3, n_dot_l);
    let rim = (1.0 - normal.z.max(0.0)).powi(4);

    let lit = BASE * (0.6 + detail * 0.4) * (0.08 + diffuse * 0.92);
    let surface = (SHADOW * 0.3).lerp(lit, terminator);
    surface + GLOW * rim * 2.0
}

/// Where the moon lands on screen this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonDisc {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
}

impl MoonDisc {
    pub fn locate(camera: &Camera) -> Option<Self> {
        let p = camera.project(MOON_CENTER)?;
        Some(Self { center: p.screen, radius: camera.pixels(MOON_RADIUS, p.depth), depth: p.depth })
    }

    /// True when a point further away than the moon falls inside its disc.
    pub fn hides(&self, point: &Projected) -> bool {
        point.depth > self.depth && point.screen.distance(self.center) < self.radius
    }
}

/// Shades the visible hemisphere into an RGBA raster covering the disc.
pub fn rasterize(map: &CraterMap, disc: &MoonDisc, rotation: f32) -> Option<DrawCommand> {
    if disc.radius < 0.5 {
        return None;
    }
    let side = (disc.radius * 2.0).ceil().min(MOON_RASTER_MAX as f32).max(1.0) as u32;
    let unspin = Mat3::from_rotation_y(-rotation);
    let half = side as f32 * 0.5;
    let mut pixels = vec![0u8; (side * side * 4) as usize];

    for py in 0..side {
        let ny = 1.0 - (py as f32 + 0.5) / half;
        for px in 0..side {
            let nx = (px as f32 + 0.5) / half - 1.0;
            let d2 = nx * nx + ny * ny;
            let coverage = ((1.0 - d2.sqrt()) * half + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let normal = Vec3::new(nx, ny, (1.0 - d2).max(0.0).sqrt()).normalize_or_zero();
            let color = shade(normal, map.sample(unspin * normal));
            let i = ((py * side + px) * 4) as usize;
            pixels[i] = unit_to_byte(color.x);
            pixels[i + 1] = unit_to_byte(color.y);
            pixels[i + 2] = unit_to_byte(color.z);
            pixels[i + 3] = unit_to_byte(coverage);
        }
    }

    Some(DrawCommand::Raster {
        slot: MOON_RASTER_SLOT,
        width: side,
        height: side,
        pixels,
        dest: Rectangle::new(
            disc.center.x - disc.radius,
            disc.center.y - disc.radius,
            disc.radius * 2.0,
            disc.radius * 2.0,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Viewport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_map() -> CraterMap {
        CraterMap::bake(&Simplex::new(&mut StdRng::seed_from_u64(1)), 32, 16)
    }

    #[test]
    fn test_lit_side_is_brighter() {
        let toward = Vec3::new(1.0, 0.3, 0.5).normalize();
        let away = Vec3::new(-toward.x, -toward.y, toward.z);
        assert!(shade(toward, 0.0).length() > shade(away, 0.0).length());
    }

    #[test]
    fn test_dark_side_takes_shadow_tone() {
        let away = -Vec3::new(1.0, 0.3, 0.5).normalize();
        let c = shade(Vec3::new(away.x, away.y, away.z.abs()), 0.0);
        assert!(c.z >= c.x);
    }

    #[test]
    fn test_limb_glows_blue() {
        let c = shade(Vec3::new(0.0, -1.0, 0.0), 0.0);
        assert!(c.z > c.x);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(-0.1, 0.3, -1.0), 0.0);
        assert_eq!(smoothstep(-0.1, 0.3, 1.0), 1.0);
        assert!((smoothstep(-0.1, 0.3, 0.1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_wraps_longitude() {
        let map = small_map();
        let a = map.sample(Vec3::new(-1e-4, 0.0, -1.0).normalize());
        let b = map.sample(Vec3::new(1e-4, 0.0, -1.0).normalize());
        assert!(a.is_finite() && b.is_finite());
        assert!(map.sample(Vec3::Y).is_finite());
        assert!(map.sample(-Vec3::Y).is_finite());
    }

    #[test]
    fn test_raster_is_bounded_and_round() {
        let cam = Camera::at(0.0, Viewport::new(1600.0, 900.0));
        let disc = MoonDisc::locate(&cam).unwrap();
        let Some(DrawCommand::Raster { width, height, pixels, .. }) = rasterize(&small_map(), &disc, 0.3) else {
            panic!("expected a raster");
        };
        assert_eq!(width, height);
        assert!(width <= MOON_RASTER_MAX);
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        // Corners sit outside the disc.
        assert_eq!(pixels[3], 0);
        let center = (((height / 2) * width + width / 2) * 4 + 3) as usize;
        assert_eq!(pixels[center], 255);
    }

    #[test]
    fn test_moon_hides_only_what_is_behind_it() {
        let disc = MoonDisc { center: Vec2::new(100.0, 100.0), radius: 50.0, depth: 20.0 };
        let behind = Projected { screen: Vec2::new(110.0, 90.0), depth: 60.0 };
        let in_front = Projected { screen: Vec2::new(110.0, 90.0), depth: 10.0 };
        let beside = Projected { screen: Vec2::new(300.0, 90.0), depth: 60.0 };
        assert!(disc.hides(&behind));
        assert!(!disc.hides(&in_front));
        assert!(!disc.hides(&beside));
    }
}
