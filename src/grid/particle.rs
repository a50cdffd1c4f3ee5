use rand::Rng;

use crate::constants::GRID_DEPTH;

#[derive(Debug, Clone, PartialEq)]
pub struct GridParticle {
    pub x: f32,
    pub y: f32,
    /// Distance from the camera; 0 is at the lens, `GRID_DEPTH` at the far plane.
    pub z: f32,
    pub speed: f32,
    pub size: f32,
    pub brightness: f32,
}

impl GridParticle {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random_range(-1000.0..1000.0),
            y: rng.random_range(-1000.0..1000.0),
            z: rng.random_range(0.0..GRID_DEPTH),
            speed: rng.random_range(0.5..2.5),
            size: rng.random_range(1.0..4.0),
            brightness: rng.random_range(0.3..1.0),
        }
    }

    /// Moves toward the camera by `frames` worth of travel, recycling at the lens.
    pub fn advance(&mut self, frames: f32, rng: &mut impl Rng) {
        self.z -= self.speed * frames;
        if self.z <= 0.0 {
            self.z = GRID_DEPTH;
            self.x = rng.random_range(-1000.0..1000.0);
            self.y = rng.random_range(-1000.0..1000.0);
        }
    }
}

/// Fixed-size pool; particles are recycled, never created or dropped.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<GridParticle>,
}

impl ParticlePool {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        Self { particles: (0..count).map(|_| GridParticle::spawn(rng)).collect() }
    }

    pub fn advance(&mut self, frames: f32, rng: &mut impl Rng) {
        for particle in self.particles.iter_mut() {
            particle.advance(frames, rng);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Far to near, so nearer particles paint over farther ones.
    pub fn depth_sorted(&self) -> Vec<&GridParticle> {
        let mut sorted: Vec<&GridParticle> = self.particles.iter().collect();
        sorted.sort_by(|a, b| b.z.total_cmp(&a.z));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = GridParticle::spawn(&mut rng);
            assert!((-1000.0..1000.0).contains(&p.x));
            assert!((0.0..GRID_DEPTH).contains(&p.z));
            assert!((0.5..2.5).contains(&p.speed));
            assert!((0.3..1.0).contains(&p.brightness));
        }
    }

    #[test]
    fn test_recycle_at_lens() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = GridParticle { x: 5.0, y: 5.0, z: 1.0, speed: 2.0, size: 1.0, brightness: 0.5 };
        p.advance(1.0, &mut rng);
        assert_eq!(p.z, GRID_DEPTH);
    }

    #[test]
    fn test_pool_size_is_stable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(150, &mut rng);
        for _ in 0..2_000 {
            pool.advance(1.0, &mut rng);
            assert_eq!(pool.len(), 150);
        }
    }

    #[test]
    fn test_depth_sorted_far_first() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = ParticlePool::new(50, &mut rng);
        let sorted = pool.depth_sorted();
        assert!(sorted.windows(2).all(|w| w[0].z >= w[1].z));
    }
}
