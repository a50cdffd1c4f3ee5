//! Raylib input polled once per frame and turned into [`HostEvent`]s.

use raylib::prelude::*;

use crate::constants::{KEY_SCROLL_STEP, PAGE_SCROLL_FRACTION, WHEEL_PIXELS_PER_NOTCH};
use crate::host::{HostEvent, Key, Viewport};

const KEYS: [(KeyboardKey, Key); 7] = [
    (KeyboardKey::KEY_DOWN, Key::ArrowDown),
    (KeyboardKey::KEY_UP, Key::ArrowUp),
    (KeyboardKey::KEY_PAGE_DOWN, Key::PageDown),
    (KeyboardKey::KEY_PAGE_UP, Key::PageUp),
    (KeyboardKey::KEY_ENTER, Key::Enter),
    (KeyboardKey::KEY_KP_ENTER, Key::Enter),
    (KeyboardKey::KEY_BACKSPACE, Key::Backspace),
];

/// Turns the touch point count into start and end edges, and drags into
/// native scrolling.
#[derive(Debug, Default)]
pub struct TouchTracker {
    touching: bool,
    last_y: f32,
}

impl TouchTracker {
    pub fn update(&mut self, touching: bool, y: f32) -> Option<HostEvent> {
        match (self.touching, touching) {
            (false, true) => {
                self.touching = true;
                self.last_y = y;
                Some(HostEvent::TouchStart { y })
            }
            (true, true) => {
                let delta_y = self.last_y - y;
                self.last_y = y;
                (delta_y != 0.0).then_some(HostEvent::Scroll { delta_y })
            }
            (true, false) => {
                self.touching = false;
                Some(HostEvent::TouchEnd { y: self.last_y })
            }
            (false, false) => None,
        }
    }
}

/// Wheel notches to a browser-style pixel delta; positive scrolls down.
pub fn wheel_delta(notches: f32) -> f32 {
    -notches * WHEEL_PIXELS_PER_NOTCH
}

/// Native scroll distance for a navigation key.
pub fn key_scroll(key: Key, viewport: Viewport) -> Option<f32> {
    match key {
        Key::ArrowDown => Some(KEY_SCROLL_STEP),
        Key::ArrowUp => Some(-KEY_SCROLL_STEP),
        Key::PageDown => Some(viewport.height * PAGE_SCROLL_FRACTION),
        Key::PageUp => Some(-viewport.height * PAGE_SCROLL_FRACTION),
        Key::Enter | Key::Backspace => None,
    }
}

pub fn viewport(rl: &RaylibHandle) -> Viewport {
    Viewport::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32)
}

#[derive(Debug, Default)]
pub struct InputCollector {
    touch: TouchTracker,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, rl: &mut RaylibHandle) -> Vec<HostEvent> {
        let mut events = Vec::new();

        if rl.is_window_resized() {
            events.push(HostEvent::Resize(viewport(rl)));
        }

        let view = viewport(rl);
        for (raw, key) in KEYS {
            if rl.is_key_pressed(raw) {
                events.push(HostEvent::KeyDown(key));
                if let Some(delta_y) = key_scroll(key, view) {
                    events.push(HostEvent::Scroll { delta_y });
                }
            }
        }
        while let Some(c) = rl.get_char_pressed() {
            events.push(HostEvent::Char(c));
        }

        let notches = rl.get_mouse_wheel_move();
        if notches != 0.0 {
            let delta_y = wheel_delta(notches);
            events.push(HostEvent::Wheel { delta_y });
            events.push(HostEvent::Scroll { delta_y });
        }

        // Desktop builds report the left mouse button as a single touch point.
        let touching = rl.get_touch_point_count() > 0;
        let y = if touching { rl.get_touch_position(0).y } else { 0.0 };
        if let Some(event) = self.touch.update(touching, y) {
            events.push(event);
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let p = rl.get_mouse_position();
            events.push(HostEvent::Click { x: p.x, y: p.y });
        }

        events
    }
}
