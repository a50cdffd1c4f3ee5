use crate::constants::{SWIPE_THRESHOLD, WHEEL_THRESHOLD};
use crate::deck::navigation::Direction;
use crate::host::{HostEvent, Key};

/// Turns keyboard, wheel and touch events into page directions.
#[derive(Debug, Default)]
pub struct GestureReader {
    touch_start_y: f32,
}

impl GestureReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, event: &HostEvent) -> Option<Direction> {
        match *event {
            HostEvent::KeyDown(Key::ArrowDown | Key::PageDown) => Some(Direction::Next),
            HostEvent::KeyDown(Key::ArrowUp | Key::PageUp) => Some(Direction::Prev),
            HostEvent::Wheel { delta_y } => threshold(delta_y, WHEEL_THRESHOLD),
            HostEvent::TouchStart { y } => {
                self.touch_start_y = y;
                None
            }
            HostEvent::TouchEnd { y } => threshold(self.touch_start_y - y, SWIPE_THRESHOLD),
            _ => None,
        }
    }
}

fn threshold(delta: f32, limit: f32) -> Option<Direction> {
    if delta > limit {
        Some(Direction::Next)
    } else if delta < -limit {
        Some(Direction::Prev)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direction(reader: &mut GestureReader, event: HostEvent) -> Option<Direction> {
        reader.read(&event)
    }

    #[test]
    fn test_keys() {
        let mut reader = GestureReader::new();
        assert_eq!(direction(&mut reader, HostEvent::KeyDown(Key::ArrowDown)), Some(Direction::Next));
        assert_eq!(direction(&mut reader, HostEvent::KeyDown(Key::PageDown)), Some(Direction::Next));
        assert_eq!(direction(&mut reader, HostEvent::KeyDown(Key::ArrowUp)), Some(Direction::Prev));
        assert_eq!(direction(&mut reader, HostEvent::KeyDown(Key::PageUp)), Some(Direction::Prev));
        assert_eq!(direction(&mut reader, HostEvent::KeyDown(Key::Enter)), None);
    }

    #[test]
    fn test_wheel_dead_zone() {
        let mut reader = GestureReader::new();
        assert_eq!(direction(&mut reader, HostEvent::Wheel { delta_y: 31.0 }), Some(Direction::Next));
        assert_eq!(direction(&mut reader, HostEvent::Wheel { delta_y: -31.0 }), Some(Direction::Prev));
        assert_eq!(direction(&mut reader, HostEvent::Wheel { delta_y: 30.0 }), None);
        assert_eq!(direction(&mut reader, HostEvent::Wheel { delta_y: -30.0 }), None);
        assert_eq!(direction(&mut reader, HostEvent::Wheel { delta_y: 0.0 }), None);
    }

    #[test]
    fn test_swipe_uses_recorded_start() {
        let mut reader = GestureReader::new();
        reader.read(&HostEvent::TouchStart { y: 400.0 });
        assert_eq!(direction(&mut reader, HostEvent::TouchEnd { y: 340.0 }), Some(Direction::Next));

        reader.read(&HostEvent::TouchStart { y: 400.0 });
        assert_eq!(direction(&mut reader, HostEvent::TouchEnd { y: 460.0 }), Some(Direction::Prev));

        reader.read(&HostEvent::TouchStart { y: 400.0 });
        assert_eq!(direction(&mut reader, HostEvent::TouchEnd { y: 360.0 }), None);
    }
}
