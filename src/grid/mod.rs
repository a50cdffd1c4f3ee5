//! Synthwave-style perspective grid with drifting particles.

pub mod particle;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use raylib::prelude::*;
use tracing::debug;

use crate::constants::*;
use crate::draw::{background, rgba, DrawCommand, Layer};
use crate::engine::Component;
use crate::host::{ComponentId, FrameClock, Host, HostEvent, Listen, Viewport};

use self::particle::ParticlePool;

const CYAN: (u8, u8, u8) = (6, 182, 212);
const BLUE: (u8, u8, u8) = (59, 130, 246);
const PURPLE: (u8, u8, u8) = (139, 92, 246);

pub struct CyberGrid {
    id: Option<ComponentId>,
    seed: u64,
    rng: StdRng,
    particles: ParticlePool,
    /// Paint the solid background first. Off when layered over another scene.
    opaque: bool,
    viewport: Viewport,
}

impl CyberGrid {
    pub fn new(seed: u64, opaque: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = ParticlePool::new(GRID_PARTICLES, &mut rng);
        Self { id: None, seed, rng, particles, opaque, viewport: Viewport::new(0.0, 0.0) }
    }

    #[cfg(test)]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}

impl Component for CyberGrid {
    fn id(&self) -> Option<ComponentId> {
        self.id
    }

    fn mount(&mut self, host: &mut Host, viewport: Viewport) {
        let id = host.register();
        host.request_frame(id);
        host.listen(id, Listen::Resize);
        self.id = Some(id);
        self.viewport = viewport;
        self.rng = StdRng::seed_from_u64(self.seed);
        self.particles = ParticlePool::new(GRID_PARTICLES, &mut self.rng);
        debug!(particles = self.particles.len(), "grid mounted");
    }

    fn event(&mut self, event: &HostEvent, _now: Duration, _host: &mut Host) {
        if let HostEvent::Resize(viewport) = *event {
            self.viewport = viewport;
        }
    }

    fn frame(&mut self, clock: FrameClock, _viewport: Viewport) -> Vec<Layer> {
        self.particles.advance(clock.dt / FRAME_TIME, &mut self.rng);
        let t = clock.elapsed / FRAME_TIME * GRID_TIME_STEP;
        render(&self.particles, t, self.viewport, self.opaque)
    }

    fn unmount(&mut self, host: &mut Host) {
        if let Some(id) = self.id.take() {
            host.release(id);
        }
    }
}

fn rgb(c: (u8, u8, u8), a: f32) -> Color {
    rgba(c.0, c.1, c.2, a)
}

/// One frame of the grid at grid time `t`.
pub fn render(particles: &ParticlePool, t: f32, viewport: Viewport, opaque: bool) -> Vec<Layer> {
    if viewport.is_empty() {
        return Vec::new();
    }
    let (w, h) = (viewport.width, viewport.height);
    let center_x = w / 2.0;
    let center_y = h * 0.65;
    let horizon = h * 0.4;
    let mut out = Vec::new();

    if opaque {
        out.push(DrawCommand::Clear(background()));
    }

    out.push(DrawCommand::RadialGradient {
        center: Vector2::new(center_x, horizon),
        radius: w * 0.8,
        stops: vec![
            (0.0, rgb(BLUE, 0.15)),
            (0.3, rgb(PURPLE, 0.08)),
            (0.6, rgb(CYAN, 0.04)),
            (1.0, rgb(CYAN, 0.0)),
        ],
    });

    // Horizontal lines scroll toward the viewer as t advances.
    let spacing = GRID_DEPTH / GRID_LINES as f32;
    for i in 0..GRID_LINES {
        let progress = i as f32 / GRID_LINES as f32;
        let z = 50.0 + progress * GRID_DEPTH + (t * 100.0) % spacing;
        let y = center_y - (center_y - horizon) * (GRID_FOV / z);
        if y > horizon - 10.0 {
            let alpha = ((y - horizon) / (center_y - horizon)).clamp(0.0, 1.0);
            out.push(DrawCommand::Line {
                from: Vector2::new(0.0, y),
                to: Vector2::new(w, y),
                width: 1.0,
                color: rgb(BLUE, 0.1 + alpha * 0.4),
            });
        }
    }

    let half = GRID_VERTICAL_LINES / 2;
    for i in -half..=half {
        let x_offset = i as f32 * 80.0;
        let points = (0..=50)
            .map(|j| {
                let z = 50.0 + (j as f32 / 50.0) * GRID_DEPTH;
                let scale = GRID_FOV / z;
                Vector2::new(center_x + x_offset * scale * 3.0, center_y - (center_y - horizon) * scale)
            })
            .collect();
        out.push(DrawCommand::Polyline { points, width: 1.0, color: rgb(PURPLE, 0.2) });
    }

    out.push(DrawCommand::GradientV {
        x: 0.0,
        y: horizon - 2.0,
        w,
        h: 4.0,
        stops: vec![(0.0, rgb(CYAN, 0.0)), (0.5, rgb(CYAN, 0.8)), (1.0, rgb(CYAN, 0.0))],
    });
    out.push(DrawCommand::GradientV {
        x: 0.0,
        y: horizon,
        w,
        h: 100.0,
        stops: vec![(0.0, rgb(CYAN, 0.3)), (1.0, rgb(CYAN, 0.0))],
    });

    for p in particles.depth_sorted() {
        let scale = GRID_FOV / p.z;
        let x = center_x + p.x * scale;
        let y = center_y - p.y * scale;
        if !(x > 0.0 && x < w && y > 0.0 && y < h) {
            continue;
        }
        let size = p.size * scale * 2.0;
        let alpha = p.brightness * (1.0 - p.z / GRID_DEPTH) * 0.8;
        let tint = match ((p.x + p.y).floor().abs() as i64) % 3 {
            0 => CYAN,
            1 => BLUE,
            _ => PURPLE,
        };
        let center = Vector2::new(x, y);
        out.push(DrawCommand::Circle { center, radius: size.max(0.5), color: rgb(tint, alpha) });
        if size > 1.0 {
            out.push(DrawCommand::Sprite { center, radius: size * 3.0, color: rgb(tint, alpha * 0.5) });
        }
    }

    let scan_y = ((t * 0.5).sin() * 0.5 + 0.5) * (h - horizon) + horizon;
    out.push(DrawCommand::GradientV {
        x: 0.0,
        y: scan_y - 20.0,
        w,
        h: 40.0,
        stops: vec![(0.0, rgb(CYAN, 0.0)), (0.5, rgb(CYAN, 0.1)), (1.0, rgb(CYAN, 0.0))],
    });

    out.extend(corners(w, h));
    vec![Layer::alpha(out)]
}

fn corners(w: f32, h: f32) -> Vec<DrawCommand> {
    const ARM: f32 = 100.0;
    const INSET: f32 = 20.0;
    let color = rgb(CYAN, 0.3);
    let v = Vector2::new;
    [
        [v(INSET, INSET + ARM), v(INSET, INSET), v(INSET + ARM, INSET)],
        [v(w - INSET - ARM, INSET), v(w - INSET, INSET), v(w - INSET, INSET + ARM)],
        [v(INSET, h - INSET - ARM), v(INSET, h - INSET), v(INSET + ARM, h - INSET)],
        [v(w - INSET - ARM, h - INSET), v(w - INSET, h - INSET), v(w - INSET, h - INSET - ARM)],
    ]
    .into_iter()
    .map(|points| DrawCommand::Polyline { points: points.to_vec(), width: 2.0, color })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    const VIEW: Viewport = Viewport { width: 1600.0, height: 900.0 };

    fn pool() -> ParticlePool {
        ParticlePool::new(GRID_PARTICLES, &mut StdRng::seed_from_u64(11))
    }

    fn commands(t: f32) -> Vec<DrawCommand> {
        render(&pool(), t, VIEW, true).remove(0).commands
    }

    #[test]
    fn test_line_counts() {
        for t in [0.0, 0.37, 5.0, 123.4] {
            let cmds = commands(t);
            let horizontal = cmds.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count();
            assert!(horizontal <= GRID_LINES);
            let vertical = cmds
                .iter()
                .filter(|c| matches!(c, DrawCommand::Polyline { points, .. } if points.len() == 51))
                .count();
            assert_eq!(vertical, 31);
            let accents = cmds
                .iter()
                .filter(|c| matches!(c, DrawCommand::Polyline { points, .. } if points.len() == 3))
                .count();
            assert_eq!(accents, 4);
        }
    }

    #[test]
    fn test_horizontal_lines_stay_below_horizon() {
        for step in 0..100 {
            for c in commands(step as f32 * 0.13) {
                if let DrawCommand::Line { from, .. } = c {
                    assert!(from.y > VIEW.height * 0.4 - 10.0);
                }
            }
        }
    }

    #[test]
    fn test_line_motion_is_periodic() {
        let spacing = GRID_DEPTH / GRID_LINES as f32;
        let period = spacing / 100.0;
        let ys = |t: f32| -> Vec<f32> {
            commands(t)
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Line { from, .. } => Some(from.y),
                    _ => None,
                })
                .collect()
        };
        let a = ys(0.1);
        let b = ys(0.1 + period);
        assert_eq!(a.len(), b.len());
        for (ya, yb) in a.iter().zip(&b) {
            assert!((ya - yb).abs() < 0.05);
        }
    }

    #[test]
    fn test_layered_mode_skips_clear() {
        let layered = render(&pool(), 0.0, VIEW, false).remove(0).commands;
        assert!(!layered.iter().any(|c| matches!(c, DrawCommand::Clear(_))));
        assert!(matches!(commands(0.0)[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn test_empty_viewport_draws_nothing() {
        assert!(render(&pool(), 1.0, Viewport::new(0.0, 0.0), true).is_empty());
    }

    #[test]
    fn test_particle_count_survives_frames() {
        let mut host = Host::new();
        let mut grid = CyberGrid::new(5, true);
        grid.mount(&mut host, VIEW);
        for frame in 0..600 {
            grid.frame(FrameClock { elapsed: frame as f32 / 60.0, dt: 1.0 / 60.0 }, VIEW);
        }
        assert_eq!(grid.particle_count(), GRID_PARTICLES);
        let id = grid.id().unwrap();
        grid.unmount(&mut host);
        assert!(!host.holds_anything(id));
    }
}
