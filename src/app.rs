//! Screen flow: gate first, then the deck once a session marker exists.

use std::time::Duration;

use tracing::{info, warn};

use crate::auth::{AccessGate, CookieJar, PasswordForm, PasswordVerifier};
use crate::config::Backdrop;
use crate::deck::PitchDeck;
use crate::draw::Layer;
use crate::engine::{self, Component};
use crate::host::{FrameClock, Host, HostEvent, Viewport};
use crate::state::{backdrop_stage, Screen};

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub backdrop: Backdrop,
    pub seed: u64,
    pub debounce: Duration,
    pub show_logo: bool,
}

pub struct App<V, J> {
    host: Host,
    gate: AccessGate<V, J>,
    settings: Settings,
    screen: Screen,
    viewport: Viewport,
    /// When the current screen was mounted.
    mounted_at: Duration,
}

impl<V: PasswordVerifier, J: CookieJar> App<V, J> {
    /// Shows the deck straight away when the gate already holds a valid marker.
    pub fn new(gate: AccessGate<V, J>, settings: Settings, viewport: Viewport, now: Duration) -> Self {
        let mut host = Host::new();
        let screen = if gate.check() {
            info!("valid session marker found");
            deck_screen(&mut host, settings, viewport)
        } else {
            gate_screen(&mut host, settings, viewport)
        };
        Self { host, gate, settings, screen, viewport, mounted_at: now }
    }

    pub fn is_unlocked(&self) -> bool {
        self.screen.is_deck()
    }

    #[cfg(test)]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[cfg(test)]
    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn handle(&mut self, event: &HostEvent, now: Duration) {
        if let HostEvent::Resize(viewport) = *event {
            self.viewport = viewport;
        }
        match &mut self.screen {
            Screen::Gate { backdrop, form } => {
                backdrop.dispatch(&mut self.host, event, now);
                engine::dispatch(form, &mut self.host, event, now);
            }
            Screen::Deck { backdrop, deck } => {
                backdrop.dispatch(&mut self.host, event, now);
                engine::dispatch(deck, &mut self.host, event, now);
            }
        }
        self.poll_submission(now);
    }

    fn poll_submission(&mut self, now: Duration) {
        let Screen::Gate { form, .. } = &mut self.screen else { return };
        let Some(password) = form.take_submission() else { return };

        if !self.gate.verify(&password).success {
            form.reject();
            return;
        }
        // Re-read the marker so the deck only appears once it is really stored.
        if !self.gate.check() {
            warn!("session marker missing right after issue");
            form.reject();
            return;
        }
        self.screen.unmount(&mut self.host);
        self.screen = deck_screen(&mut self.host, self.settings, self.viewport);
        self.mounted_at = now;
        info!("deck unlocked");
    }

    pub fn frame(&mut self, now: Duration, dt: f32) -> Vec<Layer> {
        let clock = FrameClock { elapsed: now.saturating_sub(self.mounted_at).as_secs_f32(), dt };
        let mut layers = Vec::new();
        match &mut self.screen {
            Screen::Gate { backdrop, form } => {
                layers.extend(backdrop.render(&self.host, clock, self.viewport));
                layers.extend(engine::render(form, &self.host, clock, self.viewport));
            }
            Screen::Deck { backdrop, deck } => {
                layers.extend(backdrop.render(&self.host, clock, self.viewport));
                layers.extend(engine::render(deck, &self.host, clock, self.viewport));
            }
        }
        layers
    }

    pub fn shutdown(&mut self) {
        self.screen.unmount(&mut self.host);
    }
}

fn gate_screen(host: &mut Host, settings: Settings, viewport: Viewport) -> Screen {
    let mut backdrop = backdrop_stage(settings.backdrop, settings.seed);
    backdrop.mount(host, viewport);
    let mut form = PasswordForm::new();
    form.mount(host, viewport);
    Screen::Gate { backdrop, form }
}

fn deck_screen(host: &mut Host, settings: Settings, viewport: Viewport) -> Screen {
    let mut backdrop = backdrop_stage(settings.backdrop, settings.seed);
    backdrop.mount(host, viewport);
    let mut deck = PitchDeck::new(settings.debounce, settings.show_logo);
    deck.mount(host, viewport);
    Screen::Deck { backdrop, deck }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MarkerPolicy, MemoryJar, SharedSecret};
    use crate::constants::ACCESS_PASSWORD;
    use crate::host::Key;

    const VIEW: Viewport = Viewport { width: 1280.0, height: 800.0 };

    fn settings() -> Settings {
        Settings { backdrop: Backdrop::Grid, seed: 1, debounce: Duration::from_millis(800), show_logo: false }
    }

    fn app() -> App<SharedSecret, MemoryJar> {
        let gate = AccessGate::new(SharedSecret::default(), MemoryJar::new(), MarkerPolicy::new("localhost", false));
        App::new(gate, settings(), VIEW, Duration::ZERO)
    }

    fn submit(app: &mut App<SharedSecret, MemoryJar>, password: &str) {
        for c in password.chars() {
            app.handle(&HostEvent::Char(c), Duration::ZERO);
        }
        app.handle(&HostEvent::KeyDown(Key::Enter), Duration::ZERO);
    }

    #[test]
    fn test_starts_locked() {
        assert!(!app().is_unlocked());
    }

    #[test]
    fn test_wrong_password_stays_on_gate() {
        let mut app = app();
        submit(&mut app, "nope");
        assert!(!app.is_unlocked());
        let Screen::Gate { form, .. } = app.screen() else { panic!("expected gate") };
        assert!(form.error().is_some());
        assert!(form.input().is_empty());
    }

    #[test]
    fn test_correct_password_reveals_deck() {
        let mut app = app();
        submit(&mut app, ACCESS_PASSWORD);
        assert!(app.is_unlocked());
        assert!(!app.frame(Duration::from_millis(16), 0.016).is_empty());
    }

    #[test]
    fn test_existing_marker_skips_gate() {
        let mut jar = MemoryJar::new();
        let mut gate = AccessGate::new(SharedSecret::default(), MemoryJar::new(), MarkerPolicy::new("localhost", false));
        gate.verify(ACCESS_PASSWORD);
        let issued = gate.jar().get(crate::constants::SESSION_COOKIE, std::time::SystemTime::now());
        jar.set(issued.unwrap());

        let gate = AccessGate::new(SharedSecret::default(), jar, MarkerPolicy::new("localhost", false));
        let app = App::new(gate, settings(), VIEW, Duration::ZERO);
        assert!(app.is_unlocked());
    }

    #[test]
    fn test_unlock_releases_gate_components() {
        let mut app = app();
        let before = app.host().listener_count();
        submit(&mut app, ACCESS_PASSWORD);
        // Grid: resize. Deck: resize, click and four navigation listeners.
        assert_eq!(app.host().frame_count(), 2);
        assert_eq!(app.host().listener_count(), 1 + 6);
        assert!(before > 0);

        app.shutdown();
        assert_eq!(app.host().frame_count(), 0);
        assert_eq!(app.host().listener_count(), 0);
    }
}
