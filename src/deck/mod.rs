//! The pitch deck: slides, page navigation and the narrow-viewport fallback.

pub mod content;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod slide;

use std::time::Duration;

use raylib::prelude::*;
use tracing::{debug, info};

use crate::draw::{rgba, Align, DrawCommand, Layer};
use crate::engine::Component;
use crate::host::{ComponentId, FrameClock, Host, HostEvent, Listen, Viewport};

use self::content::SLIDES;
use self::input::GestureReader;
use self::layout::{Advisory, LayoutMode, SmoothScroll};
use self::navigation::{Direction, Navigator};
use self::slide::{span, translate, Slide};

const NAV_LISTENERS: [Listen; 4] = [Listen::KeyDown, Listen::Wheel, Listen::TouchStart, Listen::TouchEnd];
const BUTTON_RADIUS: f32 = 20.0;

pub struct PitchDeck {
    id: Option<ComponentId>,
    slides: Vec<Slide>,
    navigator: Navigator,
    reader: GestureReader,
    mode: LayoutMode,
    advisory: Advisory,
    scroll: SmoothScroll,
    viewport: Viewport,
    content_height: f32,
}

impl PitchDeck {
    pub fn new(debounce: Duration, show_logo: bool) -> Self {
        let slides: Vec<Slide> = SLIDES.iter().map(|content| Slide::new(content, show_logo)).collect();
        Self {
            id: None,
            navigator: Navigator::new(slides.len(), debounce),
            slides,
            reader: GestureReader::new(),
            mode: LayoutMode::Paged,
            advisory: Advisory::default(),
            scroll: SmoothScroll::default(),
            viewport: Viewport::new(0.0, 0.0),
            content_height: 0.0,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    #[cfg(test)]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[cfg(test)]
    pub fn advisory(&self) -> &Advisory {
        &self.advisory
    }

    #[cfg(test)]
    pub fn scroll_target(&self) -> f32 {
        self.scroll.target()
    }

    fn enter_mode(&mut self, host: &mut Host, mode: LayoutMode) {
        let Some(id) = self.id else { return };
        self.mode = mode;
        match mode {
            LayoutMode::Paged => {
                for kind in NAV_LISTENERS {
                    host.listen(id, kind);
                }
                host.unlisten(id, Listen::Scroll);
                self.scroll.jump_to(self.page_offset());
            }
            LayoutMode::Stacked => {
                for kind in NAV_LISTENERS {
                    host.unlisten(id, kind);
                }
                host.listen(id, Listen::Scroll);
                let top = self.restack();
                self.scroll.jump_to(top.min(self.max_scroll()));
            }
        }
        if self.advisory.observe(mode) {
            info!(width = self.viewport.width, "narrow viewport, showing desktop advisory");
        }
        debug!(?mode, "deck layout");
    }

    /// Re-measures the stacked column. Returns the current slide's top.
    fn restack(&mut self) -> f32 {
        let mut top = 0.0;
        let mut current_top = 0.0;
        for (index, slide) in self.slides.iter().enumerate() {
            if index == self.navigator.current() {
                current_top = top;
            }
            top += slide.compose(top, self.viewport, LayoutMode::Stacked).1;
        }
        self.content_height = top;
        current_top
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.height).max(0.0)
    }

    fn page_offset(&self) -> f32 {
        self.navigator.current() as f32 * self.viewport.height
    }

    fn turned(&mut self) {
        debug!(slide = self.navigator.current(), "slide changed");
        if self.mode == LayoutMode::Paged {
            self.scroll.scroll_to(self.page_offset());
        }
    }

    fn buttons(&self) -> (Vector2, Vector2) {
        let cx = self.viewport.width * 0.5;
        let cy = self.viewport.height - 52.0;
        (Vector2::new(cx - 70.0, cy), Vector2::new(cx + 70.0, cy))
    }

    fn click(&mut self, x: f32, y: f32) {
        if self.advisory.is_open() {
            self.advisory.dismiss();
            return;
        }
        if self.mode != LayoutMode::Paged {
            return;
        }
        let (prev, next) = self.buttons();
        let hit = |c: Vector2| (c.x - x).powi(2) + (c.y - y).powi(2) <= BUTTON_RADIUS * BUTTON_RADIUS;
        let direction = if hit(prev) {
            Direction::Prev
        } else if hit(next) {
            Direction::Next
        } else {
            return;
        };
        if self.navigator.go(direction) {
            self.turned();
        }
    }

    fn controls(&self) -> Vec<DrawCommand> {
        let (prev, next) = self.buttons();
        let mut out = Vec::new();
        for (center, label, disabled) in [(prev, "^", self.navigator.is_first()), (next, "v", self.navigator.is_last())] {
            let alpha = if disabled { 0.3 } else { 0.9 };
            out.push(DrawCommand::Circle { center, radius: BUTTON_RADIUS, color: rgba(15, 23, 42, 0.8 * alpha) });
            out.push(DrawCommand::Text {
                text: label.to_string(),
                x: center.x,
                y: center.y - 9.0,
                size: 18.0,
                color: rgba(255, 255, 255, alpha),
                align: Align::Center,
            });
        }
        let cx = self.viewport.width * 0.5;
        out.push(DrawCommand::RoundedRect { x: cx - 36.0, y: prev.y - 14.0, w: 72.0, h: 28.0, color: rgba(15, 23, 42, 0.8) });
        out.push(DrawCommand::Text {
            text: format!("{} / {}", self.navigator.current() + 1, self.navigator.total()),
            x: cx,
            y: prev.y - 8.0,
            size: 16.0,
            color: rgba(148, 163, 184, 1.0),
            align: Align::Center,
        });
        out
    }

    fn dialog(&self) -> Vec<DrawCommand> {
        let v = self.viewport;
        let w = (v.width - 32.0).min(420.0);
        let h = 190.0;
        let x = (v.width - w) * 0.5;
        let y = (v.height - h) * 0.5;
        let cx = v.width * 0.5;
        let mut out = vec![
            DrawCommand::Rect { x: 0.0, y: 0.0, w: v.width, h: v.height, color: rgba(0, 0, 0, 0.6) },
            DrawCommand::RoundedRect { x, y, w, h, color: rgba(15, 23, 42, 0.95) },
            DrawCommand::RectOutline { x, y, w, h, width: 1.0, color: rgba(6, 182, 212, 0.3) },
            DrawCommand::Text { text: "Desktop Recommended".into(), x: cx, y: y + 36.0, size: 22.0, color: Color::WHITE, align: Align::Center },
        ];
        let mut ty = y + 80.0;
        for line in crate::draw::wrap("For best viewing experience, please view from your desktop browser.", 16.0, w - 40.0) {
            out.push(DrawCommand::Text { text: line, x: cx, y: ty, size: 16.0, color: rgba(203, 213, 225, 1.0), align: Align::Center });
            ty += 22.0;
        }
        out.push(DrawCommand::Text { text: "Tap to continue".into(), x: cx, y: y + h - 32.0, size: 13.0, color: rgba(34, 211, 238, 0.8), align: Align::Center });
        out
    }
}

impl Component for PitchDeck {
    fn id(&self) -> Option<ComponentId> {
        self.id
    }

    fn mount(&mut self, host: &mut Host, viewport: Viewport) {
        let id = host.register();
        host.request_frame(id);
        host.listen(id, Listen::Resize);
        host.listen(id, Listen::Click);
        self.id = Some(id);
        self.viewport = viewport;
        self.advisory = Advisory::default();
        self.enter_mode(host, LayoutMode::for_viewport(viewport));
        info!(slides = self.slides.len(), mode = ?self.mode, "deck mounted");
    }

    fn event(&mut self, event: &HostEvent, now: Duration, host: &mut Host) {
        match *event {
            HostEvent::Resize(viewport) => {
                self.viewport = viewport;
                let mode = LayoutMode::for_viewport(viewport);
                if mode != self.mode {
                    self.enter_mode(host, mode);
                } else if mode == LayoutMode::Paged {
                    self.scroll.jump_to(self.page_offset());
                } else {
                    self.restack();
                    self.scroll.scroll_by(0.0, self.max_scroll());
                }
            }
            HostEvent::Click { x, y } => self.click(x, y),
            HostEvent::Scroll { delta_y } => self.scroll.scroll_by(delta_y, self.max_scroll()),
            _ => {
                let turned = match self.reader.read(event) {
                    Some(Direction::Next) => self.navigator.next(now),
                    Some(Direction::Prev) => self.navigator.prev(now),
                    None => false,
                };
                if turned {
                    self.turned();
                }
            }
        }
    }

    fn frame(&mut self, clock: FrameClock, viewport: Viewport) -> Vec<Layer> {
        if viewport.is_empty() {
            return Vec::new();
        }
        self.scroll.step(clock.dt);
        let offset = self.scroll.offset();

        let mut commands = Vec::new();
        let mut top = 0.0;
        for slide in &self.slides {
            let (slide_commands, height) = slide.compose(top, viewport, self.mode);
            if top + height > offset && top < offset + viewport.height {
                commands.extend(
                    slide_commands
                        .into_iter()
                        .map(|c| translate(c, -offset))
                        .filter(|c| span(c).is_none_or(|(a, b)| b >= 0.0 && a <= viewport.height)),
                );
            }
            top += height;
        }
        self.content_height = top;

        if self.mode == LayoutMode::Paged {
            commands.extend(self.controls());
        }
        if self.advisory.is_open() {
            commands.extend(self.dialog());
        }
        vec![Layer::alpha(commands)]
    }

    fn unmount(&mut self, host: &mut Host) {
        if let Some(id) = self.id.take() {
            host.release(id);
            debug!("deck unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SLIDE_COUNT;
    use crate::engine::dispatch;
    use crate::host::Key;
    use crate::input::{key_scroll, TouchTracker};

    const WIDE: Viewport = Viewport { width: 1600.0, height: 900.0 };
    const NARROW: Viewport = Viewport { width: 500.0, height: 900.0 };

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn mounted(viewport: Viewport) -> (Host, PitchDeck) {
        let mut host = Host::new();
        let mut deck = PitchDeck::new(ms(800), false);
        deck.mount(&mut host, viewport);
        (host, deck)
    }

    fn send(host: &mut Host, deck: &mut PitchDeck, event: HostEvent, at: u64) {
        dispatch(deck, host, &event, ms(at));
    }

    #[test]
    fn test_mixed_modalities_share_debounce() {
        let (mut host, mut deck) = mounted(WIDE);
        send(&mut host, &mut deck, HostEvent::KeyDown(Key::ArrowDown), 1_000);
        send(&mut host, &mut deck, HostEvent::Wheel { delta_y: 120.0 }, 1_300);
        send(&mut host, &mut deck, HostEvent::TouchStart { y: 500.0 }, 1_400);
        send(&mut host, &mut deck, HostEvent::TouchEnd { y: 300.0 }, 1_500);
        assert_eq!(deck.current(), 1);

        send(&mut host, &mut deck, HostEvent::Wheel { delta_y: 120.0 }, 1_900);
        assert_eq!(deck.current(), 2);
    }

    #[test]
    fn test_turning_page_targets_slide_offset() {
        let (mut host, mut deck) = mounted(WIDE);
        send(&mut host, &mut deck, HostEvent::KeyDown(Key::PageDown), 1_000);
        assert_eq!(deck.scroll_target(), 900.0);
    }

    #[test]
    fn test_narrow_viewport_never_attaches_navigation() {
        let (mut host, mut deck) = mounted(NARROW);
        let id = deck.id().unwrap();
        assert_eq!(deck.mode(), LayoutMode::Stacked);
        for kind in NAV_LISTENERS {
            assert!(!host.is_listening(id, kind));
        }
        send(&mut host, &mut deck, HostEvent::KeyDown(Key::ArrowDown), 1_000);
        send(&mut host, &mut deck, HostEvent::Wheel { delta_y: 200.0 }, 3_000);
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn test_stacked_column_follows_drag_and_keys() {
        let (mut host, mut deck) = mounted(NARROW);
        let mut touch = TouchTracker::default();
        for (touching, y) in [(true, 800.0), (true, 500.0), (true, 200.0), (false, 0.0)] {
            if let Some(event) = touch.update(touching, y) {
                send(&mut host, &mut deck, event, 1_000);
            }
        }
        assert_eq!(deck.scroll_target(), 600.0);
        assert_eq!(deck.current(), 0);

        let step = key_scroll(Key::PageDown, NARROW).unwrap();
        send(&mut host, &mut deck, HostEvent::KeyDown(Key::PageDown), 2_000);
        send(&mut host, &mut deck, HostEvent::Scroll { delta_y: step }, 2_000);
        assert_eq!(deck.scroll_target(), 600.0 + step);
        assert_eq!(deck.current(), 0);

        send(&mut host, &mut deck, HostEvent::Scroll { delta_y: -1.0e6 }, 3_000);
        assert_eq!(deck.scroll_target(), 0.0);
    }

    #[test]
    fn test_entering_stacked_lands_on_current_slide() {
        let (mut host, mut deck) = mounted(WIDE);
        let (_, next) = deck.buttons();
        for _ in 0..3 {
            send(&mut host, &mut deck, HostEvent::Click { x: next.x, y: next.y }, 0);
        }
        assert_eq!(deck.scroll_target(), 2_700.0);

        send(&mut host, &mut deck, HostEvent::Resize(NARROW), 0);
        let expected: f32 = deck.slides[..3].iter().map(|s| s.compose(0.0, NARROW, LayoutMode::Stacked).1).sum();
        assert_eq!(deck.scroll_target(), expected);
        assert!(deck.scroll_target() <= deck.content_height - NARROW.height);
        assert_eq!(deck.current(), 3);
    }

    #[test]
    fn test_advisory_once_per_mount() {
        let (mut host, mut deck) = mounted(NARROW);
        assert!(deck.advisory().is_open());
        send(&mut host, &mut deck, HostEvent::Click { x: 10.0, y: 10.0 }, 0);
        assert!(!deck.advisory().is_open());

        send(&mut host, &mut deck, HostEvent::Resize(WIDE), 0);
        send(&mut host, &mut deck, HostEvent::Resize(NARROW), 0);
        assert!(!deck.advisory().is_open());

        deck.unmount(&mut host);
        deck.mount(&mut host, NARROW);
        assert!(deck.advisory().is_open());
    }

    #[test]
    fn test_resize_toggles_navigation_listeners() {
        let (mut host, mut deck) = mounted(WIDE);
        let id = deck.id().unwrap();
        assert!(host.is_listening(id, Listen::Wheel));

        send(&mut host, &mut deck, HostEvent::Resize(NARROW), 0);
        assert!(!host.is_listening(id, Listen::Wheel));
        assert!(host.is_listening(id, Listen::Scroll));

        send(&mut host, &mut deck, HostEvent::Resize(WIDE), 0);
        assert!(host.is_listening(id, Listen::Wheel));
        assert!(!host.is_listening(id, Listen::Scroll));
    }

    #[test]
    fn test_buttons_step_and_clamp() {
        let (mut host, mut deck) = mounted(WIDE);
        let (prev, next) = deck.buttons();
        send(&mut host, &mut deck, HostEvent::Click { x: prev.x, y: prev.y }, 0);
        assert_eq!(deck.current(), 0);
        for _ in 0..SLIDE_COUNT + 3 {
            send(&mut host, &mut deck, HostEvent::Click { x: next.x, y: next.y }, 0);
        }
        assert_eq!(deck.current(), SLIDE_COUNT - 1);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let (mut host, mut deck) = mounted(WIDE);
        let id = deck.id().unwrap();
        deck.unmount(&mut host);
        assert!(!host.holds_anything(id));
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.frame_count(), 0);
    }

    #[test]
    fn test_frame_culls_offscreen_slides() {
        let (_host, mut deck) = mounted(WIDE);
        let layers = deck.frame(FrameClock { elapsed: 0.0, dt: 0.016 }, WIDE);
        let texts: Vec<&str> = layers[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Owners Network"));
        assert!(!texts.contains(&"The Problem"));
        assert!(texts.contains(&"1 / 11"));
    }
}
