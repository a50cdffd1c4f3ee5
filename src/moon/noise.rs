//! 3D simplex noise and the crater fBm built on it.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

const GRAD3: [[f32; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;

pub struct Simplex {
    perm: [u8; 512],
}

impl Simplex {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(rng);
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    fn hash(&self, i: usize, j: usize, k: usize) -> usize {
        let p = &self.perm;
        p[i + p[j + p[k] as usize] as usize] as usize % 12
    }

    /// Noise in roughly [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let s = (p.x + p.y + p.z) * F3;
        let i = (p.x + s).floor();
        let j = (p.y + s).floor();
        let k = (p.z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = p.x - (i - t);
        let y0 = p.y - (j - t);
        let z0 = p.z - (k - t);

        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let corners = [
            (x0, y0, z0),
            (x0 - i1 as f32 + G3, y0 - j1 as f32 + G3, z0 - k1 as f32 + G3),
            (x0 - i2 as f32 + 2.0 * G3, y0 - j2 as f32 + 2.0 * G3, z0 - k2 as f32 + 2.0 * G3),
            (x0 - 1.0 + 3.0 * G3, y0 - 1.0 + 3.0 * G3, z0 - 1.0 + 3.0 * G3),
        ];

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let kk = (k as i32 & 255) as usize;
        let gradients = [
            self.hash(ii, jj, kk),
            self.hash(ii + i1, jj + j1, kk + k1),
            self.hash(ii + i2, jj + j2, kk + k2),
            self.hash(ii + 1, jj + 1, kk + 1),
        ];

        let mut total = 0.0;
        for ((x, y, z), g) in corners.into_iter().zip(gradients) {
            let falloff = 0.6 - x * x - y * y - z * z;
            if falloff > 0.0 {
                let grad = GRAD3[g];
                total += falloff.powi(4) * (grad[0] * x + grad[1] * y + grad[2] * z);
            }
        }
        32.0 * total
    }

    /// Four octaves starting at frequency 2.
    pub fn fbm(&self, p: Vec3) -> f32 {
        let mut value = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 2.0;
        for _ in 0..4 {
            value += amplitude * self.noise(p * frequency);
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        value
    }

    /// Large, medium and small crater layers blended 0.5 / 0.3 / 0.2.
    pub fn craters(&self, p: Vec3) -> f32 {
        let large = self.fbm(p * 0.8);
        let medium = self.fbm(p * 2.0 + Vec3::splat(100.0));
        let small = self.fbm(p * 5.0 + Vec3::splat(200.0));
        large * 0.5 + medium * 0.3 + small * 0.2
    }
}
