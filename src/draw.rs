//! Backend-neutral draw commands.
//!
//! Animation code describes a frame as a list of [`Layer`]s; the painter in
//! `render.rs` is the only place that talks to raylib's drawing API.

use raylib::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Alpha,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear(Color),
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    RoundedRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    RectOutline { x: f32, y: f32, w: f32, h: f32, width: f32, color: Color },
    /// Vertical gradient band; stops are (offset 0..1 from the top, colour).
    GradientV { x: f32, y: f32, w: f32, h: f32, stops: Vec<(f32, Color)> },
    /// Horizontal gradient band; stops run from the left edge.
    GradientH { x: f32, y: f32, w: f32, h: f32, stops: Vec<(f32, Color)> },
    /// Radial gradient; stops are (offset 0..1 from the centre, colour).
    RadialGradient { center: Vector2, radius: f32, stops: Vec<(f32, Color)> },
    Line { from: Vector2, to: Vector2, width: f32, color: Color },
    Polyline { points: Vec<Vector2>, width: f32, color: Color },
    Circle { center: Vector2, radius: f32, color: Color },
    /// Camera-facing point sprite with a soft radial falloff.
    Sprite { center: Vector2, radius: f32, color: Color },
    /// RGBA8 pixels uploaded into a cached texture and stretched over `dest`.
    Raster { slot: usize, width: u32, height: u32, pixels: Vec<u8>, dest: Rectangle },
    /// A texture registered with the painter under `key`.
    Image { key: &'static str, dest: Rectangle },
    Text { text: String, x: f32, y: f32, size: f32, color: Color, align: Align },
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub blend: Blend,
    pub commands: Vec<DrawCommand>,
}

impl Layer {
    pub fn alpha(commands: Vec<DrawCommand>) -> Self {
        Self { blend: Blend::Alpha, commands }
    }

    pub fn additive(commands: Vec<DrawCommand>) -> Self {
        Self { blend: Blend::Additive, commands }
    }
}

/// Colour from 8-bit channels and a 0..1 alpha.
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    Color::new(r, g, b, unit_to_byte(a))
}

/// Colour from 0..1 float channels.
pub fn rgbf(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::new(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b), unit_to_byte(a))
}

pub fn transparent(color: Color) -> Color {
    Color::new(color.r, color.g, color.b, 0)
}

pub fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn background() -> Color {
    let (r, g, b) = crate::constants::BACKGROUND;
    Color::new(r, g, b, 255)
}

pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Colour of a multi-stop gradient at `offset`. Stops must be sorted by offset.
pub fn sample_stops(stops: &[(f32, Color)], offset: f32) -> Color {
    let Some(&(first_at, first)) = stops.first() else {
        return Color::BLANK;
    };
    if offset <= first_at {
        return first;
    }
    for pair in stops.windows(2) {
        let ((a_at, a), (b_at, b)) = (pair[0], pair[1]);
        if offset <= b_at {
            let span = b_at - a_at;
            return if span <= f32::EPSILON { b } else { lerp_color(a, b, (offset - a_at) / span) };
        }
    }
    stops[stops.len() - 1].1
}

/// Rough width of `text` in raylib's default font at `size` pixels.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.55
}

/// Greedy word wrap against the approximate glyph width.
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if !line.is_empty() && text_width(&candidate, size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
