use std::time::Duration;

use crate::draw::Layer;
use crate::host::{ComponentId, FrameClock, Host, HostEvent, Viewport};

/// Something the main loop mounts, feeds events and asks for frames.
pub trait Component {
    /// Id handed out by the host on mount, `None` while unmounted.
    fn id(&self) -> Option<ComponentId>;
    fn mount(&mut self, host: &mut Host, viewport: Viewport);
    fn event(&mut self, event: &HostEvent, now: Duration, host: &mut Host);
    fn frame(&mut self, clock: FrameClock, viewport: Viewport) -> Vec<Layer>;
    fn unmount(&mut self, host: &mut Host);
}

/// Delivers `event` only if the component currently listens for its kind.
pub fn dispatch(component: &mut dyn Component, host: &mut Host, event: &HostEvent, now: Duration) {
    if let Some(id) = component.id() {
        if host.is_listening(id, event.kind()) {
            component.event(event, now, host);
        }
    }
}

/// Runs the component's frame callback if one is registered.
pub fn render(component: &mut dyn Component, host: &Host, clock: FrameClock, viewport: Viewport) -> Vec<Layer> {
    match component.id() {
        Some(id) if host.has_frame(id) => component.frame(clock, viewport),
        _ => Vec::new(),
    }
}

/// An ordered set of components drawn back to front.
pub struct Stage {
    components: Vec<Box<dyn Component>>,
}

impl Stage {
    pub fn new(components: Vec<Box<dyn Component>>) -> Self {
        Self { components }
    }

    pub fn mount(&mut self, host: &mut Host, viewport: Viewport) {
        for component in self.components.iter_mut() {
            component.mount(host, viewport);
        }
    }

    pub fn dispatch(&mut self, host: &mut Host, event: &HostEvent, now: Duration) {
        for component in self.components.iter_mut() {
            dispatch(component.as_mut(), host, event, now);
        }
    }

    pub fn render(&mut self, host: &Host, clock: FrameClock, viewport: Viewport) -> Vec<Layer> {
        let mut layers = Vec::new();
        for component in self.components.iter_mut() {
            layers.extend(render(component.as_mut(), host, clock, viewport));
        }
        layers
    }

    pub fn unmount(&mut self, host: &mut Host) {
        for component in self.components.iter_mut() {
            component.unmount(host);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.components.len()
    }
}
