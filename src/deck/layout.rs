use crate::constants::{NARROW_VIEWPORT, SCROLL_RATE};
use crate::host::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One slide per screen, driven by the navigator.
    Paged,
    /// Narrow viewport: slides stack and scroll freely, navigation is off.
    Stacked,
}

impl LayoutMode {
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.width < NARROW_VIEWPORT {
            LayoutMode::Stacked
        } else {
            LayoutMode::Paged
        }
    }
}

/// The "Desktop Recommended" dialog. Opens at most once per mount.
#[derive(Debug, Default)]
pub struct Advisory {
    shown: bool,
    open: bool,
}

impl Advisory {
    /// Opens the dialog the first time a stacked layout is seen.
    pub fn observe(&mut self, mode: LayoutMode) -> bool {
        if mode == LayoutMode::Stacked && !self.shown {
            self.shown = true;
            self.open = true;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(test)]
    pub fn was_shown(&self) -> bool {
        self.shown
    }
}

/// Vertical offset of the slide column with an ease-out approach.
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    offset: f32,
    target: f32,
}

impl SmoothScroll {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[cfg(test)]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn scroll_to(&mut self, target: f32) {
        self.target = target;
    }

    /// Moves both offset and target, clamped to `[0, max]` (native scrolling).
    pub fn scroll_by(&mut self, delta: f32, max: f32) {
        self.target = (self.target + delta).clamp(0.0, max.max(0.0));
        self.offset = self.target;
    }

    pub fn jump_to(&mut self, target: f32) {
        self.target = target;
        self.offset = target;
    }

    pub fn step(&mut self, dt: f32) {
        let blend = 1.0 - (-SCROLL_RATE * dt).exp();
        self.offset += (self.target - self.offset) * blend;
        if (self.target - self.offset).abs() < 0.5 {
            self.offset = self.target;
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.offset == self.target
    }
}
