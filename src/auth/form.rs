use std::time::Duration;

use raylib::prelude::*;

use crate::constants::WRONG_PASSWORD;
use crate::draw::{rgba, Align, DrawCommand, Layer};
use crate::engine::Component;
use crate::host::{ComponentId, FrameClock, Host, HostEvent, Key, Listen, Viewport};

const MAX_INPUT: usize = 128;

/// Password prompt shown while no valid session marker exists.
pub struct PasswordForm {
    id: Option<ComponentId>,
    viewport: Viewport,
    input: String,
    error: Option<&'static str>,
    submission: Option<String>,
}

struct FormLayout {
    card: Rectangle,
    input: Rectangle,
    button: Rectangle,
}

fn layout(viewport: Viewport) -> FormLayout {
    let width = (viewport.width - 48.0).clamp(200.0, 448.0);
    let height = 330.0;
    let x = (viewport.width - width) * 0.5;
    let y = (viewport.height - height) * 0.5;
    FormLayout {
        card: Rectangle::new(x, y, width, height),
        input: Rectangle::new(x + 32.0, y + 170.0, width - 64.0, 40.0),
        button: Rectangle::new(x + 32.0, y + 254.0, width - 64.0, 42.0),
    }
}

fn contains(rect: &Rectangle, x: f32, y: f32) -> bool {
    x >= rect.x && x <= rect.x + rect.width && y >= rect.y && y <= rect.y + rect.height
}

impl PasswordForm {
    pub fn new() -> Self {
        Self {
            id: None,
            viewport: Viewport::new(0.0, 0.0),
            input: String::new(),
            error: None,
            submission: None,
        }
    }

    /// Password handed over by the last Enter or button press, if any.
    pub fn take_submission(&mut self) -> Option<String> {
        self.submission.take()
    }

    /// Clears the field and shows the static error message.
    pub fn reject(&mut self) {
        self.input.clear();
        self.error = Some(WRONG_PASSWORD);
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    fn submit(&mut self) {
        self.error = None;
        self.submission = Some(self.input.clone());
    }
}

impl Default for PasswordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PasswordForm {
    fn id(&self) -> Option<ComponentId> {
        self.id
    }

    fn mount(&mut self, host: &mut Host, viewport: Viewport) {
        let id = host.register();
        host.request_frame(id);
        host.listen(id, Listen::Resize);
        host.listen(id, Listen::KeyDown);
        host.listen(id, Listen::Click);
        self.id = Some(id);
        self.viewport = viewport;
    }

    fn event(&mut self, event: &HostEvent, _now: Duration, _host: &mut Host) {
        match *event {
            HostEvent::Resize(viewport) => self.viewport = viewport,
            HostEvent::Char(c) if !c.is_control() && self.input.chars().count() < MAX_INPUT => {
                self.input.push(c);
            }
            HostEvent::KeyDown(Key::Backspace) => {
                self.input.pop();
            }
            HostEvent::KeyDown(Key::Enter) => self.submit(),
            HostEvent::Click { x, y } if contains(&layout(self.viewport).button, x, y) => self.submit(),
            _ => {}
        }
    }

    fn frame(&mut self, clock: FrameClock, viewport: Viewport) -> Vec<Layer> {
        if viewport.is_empty() {
            return Vec::new();
        }
        let l = layout(viewport);
        let cx = l.card.x + l.card.width * 0.5;
        let cyan = rgba(34, 211, 238, 1.0);
        let mut commands = vec![
            DrawCommand::RoundedRect { x: l.card.x, y: l.card.y, w: l.card.width, h: l.card.height, color: rgba(15, 23, 42, 0.8) },
            DrawCommand::RectOutline { x: l.card.x, y: l.card.y, w: l.card.width, h: l.card.height, width: 1.0, color: rgba(6, 182, 212, 0.2) },
            DrawCommand::Circle { center: Vector2::new(cx, l.card.y + 64.0), radius: 32.0, color: rgba(6, 182, 212, 0.2) },
            DrawCommand::Circle { center: Vector2::new(cx, l.card.y + 64.0), radius: 9.0, color: cyan },
            DrawCommand::Text { text: "Protected Content".into(), x: cx, y: l.card.y + 110.0, size: 24.0, color: Color::WHITE, align: Align::Center },
            DrawCommand::Text {
                text: "Enter the password to view this pitch deck".into(),
                x: cx,
                y: l.card.y + 142.0,
                size: 14.0,
                color: rgba(255, 255, 255, 0.6),
                align: Align::Center,
            },
            DrawCommand::Rect { x: l.input.x, y: l.input.y, w: l.input.width, h: l.input.height, color: rgba(30, 41, 59, 0.5) },
            DrawCommand::RectOutline { x: l.input.x, y: l.input.y, w: l.input.width, h: l.input.height, width: 1.0, color: rgba(6, 182, 212, 0.3) },
        ];

        let caret = if (clock.elapsed * 2.0) as i32 % 2 == 0 { "_" } else { "" };
        let (field, field_color) = if self.input.is_empty() {
            (format!("Enter password{caret}"), rgba(255, 255, 255, 0.4))
        } else {
            (format!("{}{caret}", "*".repeat(self.input.chars().count())), Color::WHITE)
        };
        commands.push(DrawCommand::Text {
            text: field,
            x: l.input.x + 12.0,
            y: l.input.y + 11.0,
            size: 18.0,
            color: field_color,
            align: Align::Left,
        });

        if let Some(error) = self.error {
            commands.push(DrawCommand::Text {
                text: error.to_string(),
                x: l.input.x,
                y: l.input.y + 52.0,
                size: 14.0,
                color: rgba(248, 113, 113, 1.0),
                align: Align::Left,
            });
        }

        commands.push(DrawCommand::RoundedRect { x: l.button.x, y: l.button.y, w: l.button.width, h: l.button.height, color: rgba(6, 182, 212, 1.0) });
        commands.push(DrawCommand::Text {
            text: "View".into(),
            x: l.button.x + l.button.width * 0.5,
            y: l.button.y + 12.0,
            size: 18.0,
            color: rgba(15, 23, 42, 1.0),
            align: Align::Center,
        });

        vec![Layer::alpha(commands)]
    }

    fn unmount(&mut self, host: &mut Host) {
        if let Some(id) = self.id.take() {
            host.release(id);
        }
    }
}
