use raylib::prelude::*;

use crate::deck::content::{Card, SlideContent};
use crate::deck::layout::LayoutMode;
use crate::draw::{rgba, text_width, wrap, Align, DrawCommand};
use crate::host::Viewport;

const TITLE_SIZE: f32 = 44.0;
const KICKER_SIZE: f32 = 18.0;
const LEAD_SIZE: f32 = 20.0;
const CARD_TITLE_SIZE: f32 = 20.0;
const CARD_TEXT_SIZE: f32 = 15.0;
const CARD_PADDING: f32 = 18.0;
const GAP: f32 = 16.0;

pub struct Slide {
    content: &'static SlideContent,
    show_image: bool,
}

impl Slide {
    pub fn new(content: &'static SlideContent, show_image: bool) -> Self {
        Self { content, show_image }
    }

    /// Lays the slide out with its top edge at `top`.
    /// Returns the commands and the height the slide occupies.
    pub fn compose(&self, top: f32, viewport: Viewport, mode: LayoutMode) -> (Vec<DrawCommand>, f32) {
        let column = (viewport.width - 96.0).clamp(240.0, 1200.0);
        let left = (viewport.width - column) * 0.5;
        let cx = viewport.width * 0.5;

        // Build relative to y = 0, then centre vertically.
        let mut body = Vec::new();
        let mut y = 0.0;

        if let (Some(key), true) = (self.content.image, self.show_image) {
            let w = column.min(384.0);
            body.push(DrawCommand::Image { key, dest: Rectangle::new(cx - w * 0.5, y, w, w * 0.4) });
            y += w * 0.4 + GAP * 2.0;
        }

        for line in wrap(self.content.title, TITLE_SIZE, column) {
            body.push(text(line, cx, y, TITLE_SIZE, Color::WHITE, Align::Center));
            y += TITLE_SIZE + 8.0;
        }
        y += 8.0;

        if let Some(kicker) = self.content.kicker {
            body.push(text(kicker.to_string(), cx, y, KICKER_SIZE, rgba(34, 211, 238, 1.0), Align::Center));
            y += KICKER_SIZE + 10.0;
        }

        if let Some(lead) = self.content.lead {
            for line in wrap(lead, LEAD_SIZE, column.min(900.0)) {
                body.push(text(line, cx, y, LEAD_SIZE, rgba(207, 250, 254, 0.8), Align::Center));
                y += LEAD_SIZE + 6.0;
            }
            y += GAP;
        }

        if !self.content.cards.is_empty() {
            y += GAP;
            y += self.cards(&mut body, left, y, column, mode);
        }

        if let Some(footer) = self.content.footer {
            y += GAP;
            for line in wrap(footer, KICKER_SIZE + 4.0, column) {
                body.push(text(line, cx, y, KICKER_SIZE + 4.0, Color::WHITE, Align::Center));
                y += KICKER_SIZE + 10.0;
            }
        }

        if !self.content.chips.is_empty() {
            y += GAP;
            y += chips(&mut body, self.content.chips, cx, y, column);
        }

        let content_height = y;
        let height = match mode {
            LayoutMode::Paged => viewport.height,
            LayoutMode::Stacked => viewport.height.max(content_height + 96.0),
        };
        let shift = top + ((height - content_height) * 0.5).max(48.0);
        (body.into_iter().map(|c| translate(c, shift)).collect(), height)
    }

    fn cards(&self, out: &mut Vec<DrawCommand>, left: f32, top: f32, column: f32, mode: LayoutMode) -> f32 {
        let cards = self.content.cards;
        let columns = match mode {
            LayoutMode::Stacked => 1,
            LayoutMode::Paged if column < 900.0 => 2.min(cards.len()),
            LayoutMode::Paged => 3.min(cards.len()),
        };
        let width = (column - GAP * (columns as f32 - 1.0)) / columns as f32;

        let mut y = top;
        for row in cards.chunks(columns) {
            let row_height = row.iter().map(|c| card_height(c, width)).fold(0.0, f32::max);
            // Centre short rows.
            let row_width = row.len() as f32 * width + (row.len() as f32 - 1.0) * GAP;
            let mut x = left + (column - row_width) * 0.5;
            for card in row {
                draw_card(out, card, x, y, width, row_height);
                x += width + GAP;
            }
            y += row_height + GAP;
        }
        y - top
    }
}

fn card_height(card: &Card, width: f32) -> f32 {
    let inner = width - CARD_PADDING * 2.0;
    let mut h = CARD_PADDING * 2.0 + wrap(card.title, CARD_TITLE_SIZE, inner).len() as f32 * (CARD_TITLE_SIZE + 6.0);
    if let Some(highlight) = card.highlight {
        h += wrap(highlight, CARD_TEXT_SIZE + 2.0, inner).len() as f32 * (CARD_TEXT_SIZE + 8.0);
    }
    for line in card.lines {
        h += wrap(line, CARD_TEXT_SIZE, inner).len() as f32 * (CARD_TEXT_SIZE + 5.0);
    }
    h
}

fn draw_card(out: &mut Vec<DrawCommand>, card: &Card, x: f32, y: f32, w: f32, h: f32) {
    out.push(DrawCommand::RoundedRect { x, y, w, h, color: rgba(15, 23, 42, 0.6) });
    out.push(DrawCommand::RectOutline { x, y, w, h, width: 1.0, color: rgba(6, 182, 212, 0.2) });

    let inner = w - CARD_PADDING * 2.0;
    let tx = x + CARD_PADDING;
    let mut ty = y + CARD_PADDING;
    for line in wrap(card.title, CARD_TITLE_SIZE, inner) {
        out.push(text(line, tx, ty, CARD_TITLE_SIZE, Color::WHITE, Align::Left));
        ty += CARD_TITLE_SIZE + 6.0;
    }
    if let Some(highlight) = card.highlight {
        for line in wrap(highlight, CARD_TEXT_SIZE + 2.0, inner) {
            out.push(text(line, tx, ty, CARD_TEXT_SIZE + 2.0, rgba(34, 211, 238, 1.0), Align::Left));
            ty += CARD_TEXT_SIZE + 8.0;
        }
    }
    for entry in card.lines {
        for line in wrap(entry, CARD_TEXT_SIZE, inner) {
            out.push(text(line, tx, ty, CARD_TEXT_SIZE, rgba(207, 250, 254, 0.7), Align::Left));
            ty += CARD_TEXT_SIZE + 5.0;
        }
    }
}

/// Pill row, wrapping onto further rows when wider than the column.
fn chips(out: &mut Vec<DrawCommand>, chips: &[&str], cx: f32, top: f32, column: f32) -> f32 {
    const SIZE: f32 = 18.0;
    const PAD: f32 = 16.0;
    let widths: Vec<f32> = chips.iter().map(|c| text_width(c, SIZE) + PAD * 2.0).collect();

    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let mut used = 0.0;
    for (i, w) in widths.iter().enumerate() {
        if used + w > column && !rows.last().is_some_and(Vec::is_empty) {
            rows.push(Vec::new());
            used = 0.0;
        }
        used += w + GAP;
        if let Some(row) = rows.last_mut() {
            row.push(i);
        }
    }

    let mut y = top;
    for row in rows {
        let row_width: f32 = row.iter().map(|&i| widths[i]).sum::<f32>() + GAP * (row.len() as f32 - 1.0);
        let mut x = cx - row_width * 0.5;
        for i in row {
            out.push(DrawCommand::RoundedRect { x, y, w: widths[i], h: SIZE + PAD, color: rgba(6, 182, 212, 0.9) });
            out.push(text(chips[i].to_string(), x + widths[i] * 0.5, y + PAD * 0.5, SIZE, Color::WHITE, Align::Center));
            x += widths[i] + GAP;
        }
        y += SIZE + PAD + GAP;
    }
    y - top
}

fn text(text: String, x: f32, y: f32, size: f32, color: Color, align: Align) -> DrawCommand {
    DrawCommand::Text { text, x, y, size, color, align }
}

/// Moves a command down by `dy`.
pub fn translate(command: DrawCommand, dy: f32) -> DrawCommand {
    match command {
        DrawCommand::Rect { x, y, w, h, color } => DrawCommand::Rect { x, y: y + dy, w, h, color },
        DrawCommand::RoundedRect { x, y, w, h, color } => DrawCommand::RoundedRect { x, y: y + dy, w, h, color },
        DrawCommand::RectOutline { x, y, w, h, width, color } => DrawCommand::RectOutline { x, y: y + dy, w, h, width, color },
        DrawCommand::Text { text, x, y, size, color, align } => DrawCommand::Text { text, x, y: y + dy, size, color, align },
        DrawCommand::Image { key, dest } => {
            DrawCommand::Image { key, dest: Rectangle::new(dest.x, dest.y + dy, dest.width, dest.height) }
        }
        other => other,
    }
}

/// Vertical extent of a command, for culling.
pub fn span(command: &DrawCommand) -> Option<(f32, f32)> {
    match command {
        DrawCommand::Rect { y, h, .. } | DrawCommand::RoundedRect { y, h, .. } | DrawCommand::RectOutline { y, h, .. } => {
            Some((*y, *y + *h))
        }
        DrawCommand::Text { y, size, .. } => Some((*y, *y + *size)),
        DrawCommand::Image { dest, .. } => Some((dest.y, dest.y + dest.height)),
        _ => None,
    }
}
