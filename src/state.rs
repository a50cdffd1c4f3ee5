use crate::auth::PasswordForm;
use crate::config::Backdrop;
use crate::deck::PitchDeck;
use crate::engine::{Component, Stage};
use crate::grid::CyberGrid;
use crate::host::Host;
use crate::moon::MoonScene;

/// What the window currently shows.
pub enum Screen {
    /// Password prompt; the deck is not built yet.
    Gate { backdrop: Stage, form: PasswordForm },
    /// The unlocked deck.
    Deck { backdrop: Stage, deck: PitchDeck },
}

impl Screen {
    pub fn is_deck(&self) -> bool {
        matches!(self, Screen::Deck { .. })
    }

    pub fn unmount(&mut self, host: &mut Host) {
        match self {
            Screen::Gate { backdrop, form } => {
                form.unmount(host);
                backdrop.unmount(host);
            }
            Screen::Deck { backdrop, deck } => {
                deck.unmount(host);
                backdrop.unmount(host);
            }
        }
    }
}

/// Background components, back to front.
pub fn backdrop_stage(kind: Backdrop, seed: u64) -> Stage {
    let components: Vec<Box<dyn Component>> = match kind {
        Backdrop::Grid => vec![Box::new(CyberGrid::new(seed, true))],
        Backdrop::Moon => vec![Box::new(MoonScene::new(seed))],
        Backdrop::Layered => vec![Box::new(MoonScene::new(seed)), Box::new(CyberGrid::new(seed, false))],
    };
    Stage::new(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_layers() {
        assert_eq!(backdrop_stage(Backdrop::Grid, 1).len(), 1);
        assert_eq!(backdrop_stage(Backdrop::Moon, 1).len(), 1);
        assert_eq!(backdrop_stage(Backdrop::Layered, 1).len(), 2);
    }
}
