//! Turns [`Layer`]s into raylib draw calls.

use std::collections::{HashMap, HashSet};

use anyhow::{ensure, Context, Result};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::draw::{sample_stops, text_width, transparent, Align, Blend, DrawCommand, Layer};

const RADIAL_BANDS: usize = 48;
const RING_SEGMENTS: i32 = 72;

struct RasterTexture {
    width: u32,
    height: u32,
    texture: Texture2D,
}

/// Widths of centred strings, measured with the backend font before drawing.
#[derive(Debug, Default)]
struct TextMetrics {
    widths: HashMap<i32, HashMap<String, f32>>,
}

impl TextMetrics {
    fn clear(&mut self) {
        self.widths.clear();
    }

    fn contains(&self, text: &str, size: i32) -> bool {
        self.widths.get(&size).is_some_and(|by_text| by_text.contains_key(text))
    }

    fn record(&mut self, text: &str, size: i32, width: f32) {
        self.widths.entry(size).or_default().insert(text.to_string(), width);
    }

    /// Measured width, or the glyph estimate for strings never measured.
    fn width(&self, text: &str, size: f32) -> f32 {
        self.widths
            .get(&(size as i32))
            .and_then(|by_text| by_text.get(text))
            .copied()
            .unwrap_or_else(|| text_width(text, size))
    }
}

fn check_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    ensure!(pixels.len() == expected, "raster holds {} bytes, {width}x{height} needs {expected}", pixels.len());
    Ok(())
}

#[derive(Default)]
pub struct Painter {
    rasters: HashMap<usize, RasterTexture>,
    images: HashMap<&'static str, Texture2D>,
    metrics: TextMetrics,
    /// Slots whose last upload failed, so the warning is logged once.
    failing: HashSet<usize>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_image(&mut self, key: &'static str, texture: Texture2D) {
        self.images.insert(key, texture);
    }

    pub fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Uploads raster pixels and measures centred text. Runs before `begin_drawing`.
    ///
    /// A raster that fails to upload is dropped for the frame and logged once
    /// per failure streak.
    pub fn prepare(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, layers: &[Layer]) {
        self.metrics.clear();
        for command in layers.iter().flat_map(|layer| &layer.commands) {
            match command {
                DrawCommand::Raster { slot, width, height, pixels, .. } => {
                    match self.upload(rl, thread, *slot, *width, *height, pixels) {
                        Ok(()) => {
                            self.failing.remove(slot);
                        }
                        Err(err) => {
                            self.rasters.remove(slot);
                            if self.failing.insert(*slot) {
                                warn!(slot, "skipping raster: {err:#}");
                            }
                        }
                    }
                }
                DrawCommand::Text { text, size, align: Align::Center, .. } => {
                    let size = *size as i32;
                    if !self.metrics.contains(text, size) {
                        self.metrics.record(text, size, rl.measure_text(text, size) as f32);
                    }
                }
                _ => {}
            }
        }
    }

    fn upload(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        slot: usize,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        check_pixels(width, height, pixels)?;
        let stale = self.rasters.get(&slot).is_none_or(|r| r.width != width || r.height != height);
        if stale {
            let image = Image::gen_image_color(width as i32, height as i32, Color::BLANK);
            let texture = rl
                .load_texture_from_image(thread, &image)
                .with_context(|| format!("Failed to create {width}x{height} raster texture"))?;
            debug!(slot, width, height, "raster texture created");
            self.rasters.insert(slot, RasterTexture { width, height, texture });
        }
        if let Some(raster) = self.rasters.get_mut(&slot) {
            raster
                .texture
                .update_texture(pixels)
                .with_context(|| format!("Failed to update {width}x{height} raster texture"))?;
        }
        Ok(())
    }

    pub fn paint<D: RaylibDraw>(&self, d: &mut D, layers: &[Layer]) {
        for layer in layers {
            match layer.blend {
                Blend::Alpha => self.commands(d, &layer.commands),
                Blend::Additive => {
                    let mut additive = d.begin_blend_mode(BlendMode::BLEND_ADDITIVE);
                    self.commands(&mut additive, &layer.commands);
                }
            }
        }
    }

    fn commands<D: RaylibDraw>(&self, d: &mut D, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => d.clear_background(*color),
                DrawCommand::Rect { x, y, w, h, color } => {
                    d.draw_rectangle_rec(Rectangle::new(*x, *y, *w, *h), *color);
                }
                DrawCommand::RoundedRect { x, y, w, h, color } => {
                    d.draw_rectangle_rounded(Rectangle::new(*x, *y, *w, *h), 0.2, 8, *color);
                }
                DrawCommand::RectOutline { x, y, w, h, width, color } => {
                    d.draw_rectangle_lines_ex(Rectangle::new(*x, *y, *w, *h), *width, *color);
                }
                DrawCommand::GradientV { x, y, w, h, stops } => gradient_v(d, *x, *y, *w, *h, stops),
                DrawCommand::GradientH { x, y, w, h, stops } => gradient_h(d, *x, *y, *w, *h, stops),
                DrawCommand::RadialGradient { center, radius, stops } => radial(d, *center, *radius, stops),
                DrawCommand::Line { from, to, width, color } => d.draw_line_ex(*from, *to, *width, *color),
                DrawCommand::Polyline { points, width, color } => {
                    for pair in points.windows(2) {
                        d.draw_line_ex(pair[0], pair[1], *width, *color);
                    }
                }
                DrawCommand::Circle { center, radius, color } => d.draw_circle_v(*center, *radius, *color),
                DrawCommand::Sprite { center, radius, color } => {
                    if *radius < 1.5 {
                        let dim = Color::new(color.r, color.g, color.b, (color.a as f32 * 0.6) as u8);
                        d.draw_circle_v(*center, *radius, dim);
                    } else {
                        d.draw_circle_gradient(center.x as i32, center.y as i32, *radius, *color, transparent(*color));
                    }
                }
                DrawCommand::Raster { slot, dest, .. } => {
                    if let Some(raster) = self.rasters.get(slot) {
                        let source = Rectangle::new(0.0, 0.0, raster.width as f32, raster.height as f32);
                        d.draw_texture_pro(&raster.texture, source, *dest, Vector2::zero(), 0.0, Color::WHITE);
                    }
                }
                DrawCommand::Image { key, dest } => {
                    if let Some(texture) = self.images.get(key) {
                        draw_fitted(d, texture, *dest);
                    }
                }
                DrawCommand::Text { text, x, y, size, color, align } => {
                    let left = match align {
                        Align::Left => *x,
                        Align::Center => *x - self.metrics.width(text, *size) * 0.5,
                    };
                    d.draw_text(text, left as i32, *y as i32, *size as i32, *color);
                }
            }
        }
    }
}

fn gradient_v<D: RaylibDraw>(d: &mut D, x: f32, y: f32, w: f32, h: f32, stops: &[(f32, Color)]) {
    for pair in stops.windows(2) {
        let ((a_at, a), (b_at, b)) = (pair[0], pair[1]);
        let top = (y + h * a_at).round() as i32;
        let bottom = (y + h * b_at).round() as i32;
        if bottom > top {
            d.draw_rectangle_gradient_v(x as i32, top, w.ceil() as i32, bottom - top, a, b);
        }
    }
}

fn gradient_h<D: RaylibDraw>(d: &mut D, x: f32, y: f32, w: f32, h: f32, stops: &[(f32, Color)]) {
    for pair in stops.windows(2) {
        let ((a_at, a), (b_at, b)) = (pair[0], pair[1]);
        let left = (x + w * a_at).round() as i32;
        let right = (x + w * b_at).round() as i32;
        if right > left {
            d.draw_rectangle_gradient_h(left, y as i32, right - left, h.ceil() as i32, a, b);
        }
    }
}

/// Concentric rings, each filled with the gradient colour at its mid radius.
fn radial<D: RaylibDraw>(d: &mut D, center: Vector2, radius: f32, stops: &[(f32, Color)]) {
    if radius <= 0.0 {
        return;
    }
    let band = radius / RADIAL_BANDS as f32;
    for i in 0..RADIAL_BANDS {
        let color = sample_stops(stops, (i as f32 + 0.5) / RADIAL_BANDS as f32);
        if color.a == 0 {
            continue;
        }
        let inner = band * i as f32;
        d.draw_ring(center, inner, inner + band, 0.0, 360.0, RING_SEGMENTS, color);
    }
}

/// Scales the texture to fit inside `dest`, keeping its aspect ratio.
fn draw_fitted<D: RaylibDraw>(d: &mut D, texture: &Texture2D, dest: Rectangle) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return;
    }
    let scale = (dest.width / tex_width).min(dest.height / tex_height);
    let scaled_width = tex_width * scale;
    let scaled_height = tex_height * scale;
    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            dest.x + (dest.width - scaled_width) * 0.5,
            dest.y + (dest.height - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        ),
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_width_wins_over_estimate() {
        let mut metrics = TextMetrics::default();
        assert_eq!(metrics.width("1 / 11", 16.0), text_width("1 / 11", 16.0));

        metrics.record("1 / 11", 16, 41.0);
        assert!(metrics.contains("1 / 11", 16));
        assert!(!metrics.contains("1 / 11", 18));
        assert_eq!(metrics.width("1 / 11", 16.0), 41.0);

        metrics.clear();
        assert!(!metrics.contains("1 / 11", 16));
    }

    #[test]
    fn test_raster_size_is_checked() {
        assert!(check_pixels(2, 3, &[0; 24]).is_ok());
        let err = check_pixels(2, 3, &[0; 20]).unwrap_err();
        assert!(err.to_string().contains("needs 24"));
    }
}
