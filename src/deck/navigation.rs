use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Linear slide index with clamped bounds and a shared debounce clock.
#[derive(Debug, Clone)]
pub struct Navigator {
    index: usize,
    total: usize,
    debounce: Duration,
    last_transition: Option<Duration>,
}

impl Navigator {
    pub fn new(total: usize, debounce: Duration) -> Self {
        Self {
            index: 0,
            total: total.max(1),
            debounce,
            last_transition: None,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    pub fn next(&mut self, now: Duration) -> bool {
        self.gesture(Direction::Next, now)
    }

    pub fn prev(&mut self, now: Duration) -> bool {
        self.gesture(Direction::Prev, now)
    }

    /// Applies a debounced gesture. Returns true if the index changed.
    ///
    /// A gesture that arrives outside the window always stamps the clock,
    /// even when the step is clamped at a bound.
    fn gesture(&mut self, direction: Direction, now: Duration) -> bool {
        if let Some(last) = self.last_transition {
            if now.saturating_sub(last) < self.debounce {
                debug!(?direction, "navigation debounced");
                return false;
            }
        }
        self.last_transition = Some(now);
        self.go(direction)
    }

    /// Steps without consulting the debounce clock (on-screen buttons).
    pub fn go(&mut self, direction: Direction) -> bool {
        let before = self.index;
        self.index = match direction {
            Direction::Next => (self.index + 1).min(self.total - 1),
            Direction::Prev => self.index.saturating_sub(1),
        };
        self.index != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEBOUNCE_MS, SLIDE_COUNT};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn navigator_at(index: usize) -> Navigator {
        let mut nav = Navigator::new(SLIDE_COUNT, ms(DEBOUNCE_MS));
        for _ in 0..index {
            nav.go(Direction::Next);
        }
        nav
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(navigator_at(0).current(), 0);
    }

    #[test]
    fn test_rapid_next_only_first_applies() {
        let mut nav = navigator_at(5);
        assert!(nav.next(ms(10_000)));
        assert!(!nav.next(ms(10_200)));
        assert!(!nav.next(ms(10_700)));
        assert_eq!(nav.current(), 6);
    }

    #[test]
    fn test_window_reopens_after_debounce() {
        let mut nav = navigator_at(5);
        nav.next(ms(1_000));
        assert!(!nav.prev(ms(1_799)));
        assert!(nav.prev(ms(1_800)));
        assert_eq!(nav.current(), 5);
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let mut nav = navigator_at(0);
        assert!(!nav.prev(ms(5_000)));
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut nav = navigator_at(SLIDE_COUNT - 1);
        assert!(nav.is_last());
        assert!(!nav.next(ms(5_000)));
        assert_eq!(nav.current(), SLIDE_COUNT - 1);
        assert!(!nav.go(Direction::Next));
    }

    #[test]
    fn test_clamped_gesture_still_consumes_window() {
        let mut nav = navigator_at(0);
        nav.prev(ms(1_000));
        assert!(!nav.next(ms(1_500)));
        assert_eq!(nav.current(), 0);
        assert!(nav.next(ms(1_800)));
    }

    #[test]
    fn test_index_always_in_bounds() {
        let mut nav = Navigator::new(SLIDE_COUNT, Duration::ZERO);
        for step in 0..50u64 {
            let direction = if step % 7 < 5 { Direction::Next } else { Direction::Prev };
            nav.gesture(direction, ms(step));
            assert!(nav.current() < SLIDE_COUNT);
        }
    }

    #[test]
    fn test_configurable_window() {
        let mut nav = Navigator::new(SLIDE_COUNT, ms(100));
        nav.next(ms(0));
        assert!(nav.next(ms(100)));
        assert_eq!(nav.current(), 2);
    }
}
