//! Frame scheduling and listener bookkeeping.
//!
//! Components ask the host for a frame callback and for the window events they
//! care about when they mount, and hand everything back when they unmount. The
//! main loop only delivers events and frames that are currently registered.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u32);

/// Event kinds a component can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Listen {
    Resize,
    KeyDown,
    Wheel,
    TouchStart,
    TouchEnd,
    Click,
    /// Native document scrolling, as opposed to a wheel gesture.
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Enter,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Resize(Viewport),
    KeyDown(Key),
    Char(char),
    /// Positive values scroll content down, like a browser wheel delta.
    Wheel { delta_y: f32 },
    TouchStart { y: f32 },
    TouchEnd { y: f32 },
    Click { x: f32, y: f32 },
    Scroll { delta_y: f32 },
}

impl HostEvent {
    pub fn kind(&self) -> Listen {
        match self {
            HostEvent::Resize(_) => Listen::Resize,
            HostEvent::KeyDown(_) | HostEvent::Char(_) => Listen::KeyDown,
            HostEvent::Wheel { .. } => Listen::Wheel,
            HostEvent::TouchStart { .. } => Listen::TouchStart,
            HostEvent::TouchEnd { .. } => Listen::TouchEnd,
            HostEvent::Click { .. } => Listen::Click,
            HostEvent::Scroll { .. } => Listen::Scroll,
        }
    }
}

/// Time handed to a frame callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Seconds since the component was mounted.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

#[derive(Debug, Default)]
pub struct Host {
    next_id: u32,
    frames: BTreeSet<ComponentId>,
    listeners: BTreeMap<Listen, BTreeSet<ComponentId>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn request_frame(&mut self, id: ComponentId) {
        self.frames.insert(id);
    }

    pub fn has_frame(&self, id: ComponentId) -> bool {
        self.frames.contains(&id)
    }

    pub fn listen(&mut self, id: ComponentId, kind: Listen) {
        self.listeners.entry(kind).or_default().insert(id);
    }

    pub fn unlisten(&mut self, id: ComponentId, kind: Listen) {
        if let Some(set) = self.listeners.get_mut(&kind) {
            set.remove(&id);
        }
    }

    pub fn is_listening(&self, id: ComponentId, kind: Listen) -> bool {
        self.listeners.get(&kind).is_some_and(|set| set.contains(&id))
    }

    /// Drops every frame callback and listener owned by `id`.
    pub fn release(&mut self, id: ComponentId) {
        self.frames.remove(&id);
        for set in self.listeners.values_mut() {
            set.remove(&id);
        }
    }

    #[cfg(test)]
    pub fn holds_anything(&self, id: ComponentId) -> bool {
        self.has_frame(id) || self.listeners.values().any(|set| set.contains(&id))
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(BTreeSet::len).sum()
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut host = Host::new();
        let a = host.register();
        let b = host.register();
        assert_ne!(a, b);
    }

    #[test]
    fn test_listen_and_unlisten() {
        let mut host = Host::new();
        let id = host.register();
        host.listen(id, Listen::Wheel);
        assert!(host.is_listening(id, Listen::Wheel));
        assert!(!host.is_listening(id, Listen::KeyDown));

        host.unlisten(id, Listen::Wheel);
        assert!(!host.is_listening(id, Listen::Wheel));
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_release_drops_everything() {
        let mut host = Host::new();
        let id = host.register();
        let other = host.register();
        host.request_frame(id);
        host.listen(id, Listen::Resize);
        host.listen(id, Listen::TouchEnd);
        host.listen(other, Listen::Resize);

        host.release(id);

        assert!(!host.holds_anything(id));
        assert!(host.is_listening(other, Listen::Resize));
        assert_eq!(host.frame_count(), 0);
    }

    #[test]
    fn test_char_events_ride_on_keydown() {
        assert_eq!(HostEvent::Char('a').kind(), Listen::KeyDown);
        assert_eq!(HostEvent::Wheel { delta_y: 1.0 }.kind(), Listen::Wheel);
    }
}
