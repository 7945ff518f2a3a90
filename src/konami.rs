use std::collections::VecDeque;

/// Keys the page cares about. Everything else collapses into `Other`, which
/// still counts as a key press and breaks a partial sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Escape,
    Other,
}

pub const KONAMI: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::B,
    Key::A,
];

/// Watches the most recent key presses for the Konami code.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<Key>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press; returns `true` when it completes the sequence.
    pub fn push(&mut self, key: Key) -> bool {
        self.recent.push_back(key);
        if self.recent.len() > KONAMI.len() {
            self.recent.pop_front();
        }

        if self.recent.iter().eq(KONAMI.iter()) {
            tracing::info!("konami code entered");
            self.recent.clear();
            true
        } else {
            false
        }
    }
}
