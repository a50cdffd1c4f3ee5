//! Starfield, cosmic dust and a shaded moon seen through a swaying camera.

pub mod camera;
pub mod noise;
pub mod sky;
pub mod surface;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::constants::*;
use crate::draw::{background, rgba, DrawCommand, Layer};
use crate::engine::Component;
use crate::host::{ComponentId, FrameClock, Host, HostEvent, Listen, Viewport};

use self::camera::Camera;
use self::noise::Simplex;
use self::sky::Sky;
use self::surface::{rasterize, CraterMap, MoonDisc};

pub struct MoonScene {
    id: Option<ComponentId>,
    seed: u64,
    sky: Sky,
    craters: Option<CraterMap>,
    /// Radians, accumulated frame by frame.
    rotation: f32,
    viewport: Viewport,
}

impl MoonScene {
    pub fn new(seed: u64) -> Self {
        Self {
            id: None,
            seed,
            sky: Sky::generate(&mut StdRng::seed_from_u64(seed)),
            craters: None,
            rotation: 0.0,
            viewport: Viewport::new(0.0, 0.0),
        }
    }

    #[cfg(test)]
    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    #[cfg(test)]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn scene(&self, t: f32) -> Vec<Layer> {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let camera = Camera::at(t, self.viewport);
        let disc = MoonDisc::locate(&camera);

        let mut layers = vec![
            Layer::alpha(vec![DrawCommand::Clear(background())]),
            Layer::additive(self.sky.stars(t, &camera, disc.as_ref())),
        ];

        if let (Some(map), Some(disc)) = (&self.craters, &disc) {
            if let Some(raster) = rasterize(map, disc, self.rotation) {
                layers.push(Layer::alpha(vec![raster]));
            }
        }

        let mut near = self.sky.dust(t, &camera, disc.as_ref());
        near.extend(self.sky.shooting_stars(t, &camera, disc.as_ref()));
        layers.push(Layer::additive(near));

        let (r, g, b) = BACKGROUND;
        layers.push(Layer::alpha(vec![
            DrawCommand::GradientV {
                x: 0.0,
                y: 0.0,
                w,
                h,
                stops: vec![(0.0, rgba(r, g, b, 0.0)), (0.5, rgba(r, g, b, 0.0)), (1.0, rgba(r, g, b, 0.7))],
            },
            DrawCommand::GradientH {
                x: 0.0,
                y: 0.0,
                w,
                h,
                stops: vec![(0.0, rgba(r, g, b, 0.5)), (0.5, rgba(r, g, b, 0.0)), (1.0, rgba(r, g, b, 0.0))],
            },
        ]));
        layers
    }
}

impl Component for MoonScene {
    fn id(&self) -> Option<ComponentId> {
        self.id
    }

    fn mount(&mut self, host: &mut Host, viewport: Viewport) {
        let id = host.register();
        host.request_frame(id);
        host.listen(id, Listen::Resize);
        self.id = Some(id);
        self.viewport = viewport;
        self.rotation = 0.0;

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.sky = Sky::generate(&mut rng);
        let noise = Simplex::new(&mut rng);
        self.craters = Some(CraterMap::bake(&noise, CRATER_MAP_WIDTH, CRATER_MAP_HEIGHT));
        debug!(stars = self.sky.stars.len(), dust = self.sky.dust.len(), "moon scene mounted");
    }

    fn event(&mut self, event: &HostEvent, _now: Duration, _host: &mut Host) {
        if let HostEvent::Resize(viewport) = *event {
            self.viewport = viewport;
        }
    }

    fn frame(&mut self, clock: FrameClock, _viewport: Viewport) -> Vec<Layer> {
        self.rotation += MOON_SPIN * clock.dt;
        if self.viewport.is_empty() {
            return Vec::new();
        }
        self.scene(clock.elapsed)
    }

    fn unmount(&mut self, host: &mut Host) {
        if let Some(id) = self.id.take() {
            host.release(id);
        }
        self.craters = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport { width: 1280.0, height: 720.0 };

    fn tick(scene: &mut MoonScene, frame: u32) -> Vec<Layer> {
        scene.frame(FrameClock { elapsed: frame as f32 / 60.0, dt: 1.0 / 60.0 }, VIEW)
    }

    #[test]
    fn test_counts_are_invariant() {
        let mut host = Host::new();
        let mut scene = MoonScene::new(3);
        scene.mount(&mut host, VIEW);
        for frame in 0..20 {
            tick(&mut scene, frame * 997);
            assert_eq!(scene.sky().stars.len(), STAR_COUNT);
            assert_eq!(scene.sky().dust.len(), DUST_COUNT);
            assert_eq!(scene.sky().shooting.len(), SHOOTING_STAR_COUNT);
        }
        scene.unmount(&mut host);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut host = Host::new();
        let mut scene = MoonScene::new(3);
        scene.mount(&mut host, VIEW);
        for frame in 0..60 {
            tick(&mut scene, frame);
        }
        assert!((scene.rotation() - MOON_SPIN).abs() < 1e-4);
        scene.unmount(&mut host);
    }

    #[test]
    fn test_frame_layers() {
        let mut host = Host::new();
        let mut scene = MoonScene::new(9);
        scene.mount(&mut host, VIEW);
        let layers = tick(&mut scene, 30);
        assert!(matches!(layers[0].commands[0], DrawCommand::Clear(_)));
        assert!(layers.iter().any(|l| l.commands.iter().any(|c| matches!(c, DrawCommand::Raster { .. }))));
        assert!(layers.iter().any(|l| l.blend == crate::draw::Blend::Additive && !l.commands.is_empty()));
        scene.unmount(&mut host);
    }

    #[test]
    fn test_unmount_releases_host() {
        let mut host = Host::new();
        let mut scene = MoonScene::new(1);
        scene.mount(&mut host, VIEW);
        let id = scene.id().unwrap();
        assert!(host.has_frame(id));
        assert!(host.is_listening(id, Listen::Resize));
        scene.unmount(&mut host);
        assert!(!host.holds_anything(id));
        assert!(scene.id().is_none());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut host = Host::new();
        let mut scene = MoonScene::new(1);
        scene.mount(&mut host, Viewport::new(0.0, 0.0));
        assert!(tick(&mut scene, 1).is_empty());
        crate::engine::dispatch(&mut scene, &mut host, &HostEvent::Resize(VIEW), Duration::ZERO);
        assert!(!tick(&mut scene, 2).is_empty());
        scene.unmount(&mut host);
    }
}
