use std::f32::consts::{PI, TAU};

use glam::{Mat3, Vec2, Vec3};
use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::draw::{rgba, rgbf, DrawCommand};
use crate::moon::camera::Camera;
use crate::moon::surface::MoonDisc;

const DUST_PALETTE: [(u8, u8, u8); 4] = [(0x3b, 0x82, 0xf6), (0x60, 0xa5, 0xfa), (0x93, 0xc5, 0xfd), (0x1d, 0x4e, 0xd8)];

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dust {
    pub position: Vec3,
    pub size: f32,
    pub color: (u8, u8, u8),
    pub phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Offset into the 12 s cycle, in seconds.
    pub start_time: f32,
    pub origin: Vec3,
}

impl ShootingStar {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Self {
            start_time: rng.random_range(0.0..120.0),
            origin: Vec3::new(
                (rng.random::<f32>() - 0.3) * 25.0,
                12.0 + rng.random::<f32>() * 8.0,
                -15.0 - rng.random::<f32>() * 15.0,
            ),
        }
    }

    /// Position and opacity at `t`, or `None` outside the visible window.
    pub fn at(&self, t: f32) -> Option<(Vec3, f32)> {
        let cycle = (t + self.start_time).rem_euclid(SHOOTING_STAR_PERIOD);
        if cycle >= SHOOTING_STAR_VISIBLE {
            return None;
        }
        let progress = cycle / SHOOTING_STAR_VISIBLE;
        let position = self.origin + Vec3::new(progress * 25.0, -progress * 20.0, 0.0);
        Some((position, (progress * PI).sin()))
    }
}

pub fn twinkle(brightness: f32, t: f32) -> f32 {
    (t * (1.5 + brightness * 2.0) + brightness * 50.0).sin() * 0.2 + 0.8
}

/// Point buffers generated once per mount.
#[derive(Debug, Clone)]
pub struct Sky {
    pub stars: Vec<Star>,
    pub dust: Vec<Dust>,
    pub shooting: Vec<ShootingStar>,
}

impl Sky {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| {
                // Uniform on a thick spherical shell.
                let theta = rng.random::<f32>() * TAU;
                let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
                let radius = 40.0 + rng.random::<f32>() * 60.0;
                Star {
                    position: Vec3::new(
                        radius * phi.sin() * theta.cos(),
                        radius * phi.sin() * theta.sin(),
                        radius * phi.cos(),
                    ),
                    size: rng.random::<f32>() * 1.5 + 0.3,
                    brightness: rng.random::<f32>() * 0.4 + 0.3,
                }
            })
            .collect();

        let dust = (0..DUST_COUNT)
            .map(|_| Dust {
                position: Vec3::new(
                    (rng.random::<f32>() - 0.5) * 50.0,
                    (rng.random::<f32>() - 0.5) * 35.0,
                    (rng.random::<f32>() - 0.5) * 25.0 - 15.0,
                ),
                size: rng.random::<f32>() * 2.5 + 0.8,
                phase: rng.random::<f32>() * TAU,
                color: DUST_PALETTE[rng.random_range(0..DUST_PALETTE.len())],
            })
            .collect();

        let shooting = (0..SHOOTING_STAR_COUNT).map(|_| ShootingStar::spawn(rng)).collect();
        Self { stars, dust, shooting }
    }

    pub fn stars(&self, t: f32, camera: &Camera, moon: Option<&MoonDisc>) -> Vec<DrawCommand> {
        let spin = Mat3::from_rotation_y(t * STAR_SPIN);
        self.stars
            .iter()
            .filter_map(|star| {
                let p = camera.project(spin * star.position)?;
                if moon.is_some_and(|m| m.hides(&p)) {
                    return None;
                }
                let glow = star.brightness * twinkle(star.brightness, t);
                Some(sprite(
                    p.screen,
                    star.size * 250.0 / p.depth,
                    rgbf(0.85 * glow, 0.9 * glow, glow, glow * 0.8),
                ))
            })
            .collect()
    }

    pub fn dust(&self, t: f32, camera: &Camera, moon: Option<&MoonDisc>) -> Vec<DrawCommand> {
        self.dust
            .iter()
            .filter_map(|mote| {
                let drift = Vec3::new(
                    (t * 0.1 + mote.phase * 1.5).cos() * 0.5,
                    (t * 0.15 + mote.phase).sin() * 0.8,
                    0.0,
                );
                let p = camera.project(mote.position + drift)?;
                if moon.is_some_and(|m| m.hides(&p)) {
                    return None;
                }
                let alpha = ((t * 0.3 + mote.phase).sin() * 0.25 + 0.75) * 0.4;
                let (r, g, b) = mote.color;
                Some(sprite(p.screen, mote.size * 180.0 / p.depth, rgba(r, g, b, alpha)))
            })
            .collect()
    }

    pub fn shooting_stars(&self, t: f32, camera: &Camera, moon: Option<&MoonDisc>) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        for star in &self.shooting {
            let Some((position, opacity)) = star.at(t) else { continue };
            let Some(head) = camera.project(position) else { continue };
            if moon.is_some_and(|m| m.hides(&head)) {
                continue;
            }
            // Short tail back along the direction of travel.
            if let Some(tail) = camera.project(position - Vec3::new(25.0, -20.0, 0.0).normalize() * 1.5) {
                out.push(DrawCommand::Line {
                    from: to_screen(tail.screen),
                    to: to_screen(head.screen),
                    width: 1.0,
                    color: Color::new(255, 255, 255, (opacity * 0.4 * 255.0) as u8),
                });
            }
            out.push(DrawCommand::Circle {
                center: to_screen(head.screen),
                radius: camera.pixels(0.04, head.depth).max(1.0),
                color: Color::new(255, 255, 255, (opacity * 255.0) as u8),
            });
        }
        out
    }
}

fn to_screen(v: Vec2) -> Vector2 {
    Vector2::new(v.x, v.y)
}

fn sprite(center: Vec2, diameter: f32, color: Color) -> DrawCommand {
    DrawCommand::Sprite { center: to_screen(center), radius: (diameter * 0.5).max(0.5), color }
}
