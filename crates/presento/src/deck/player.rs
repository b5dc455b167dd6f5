//! Playback state machine. Reads the deck length, never the deck itself.

use super::navigation::ordinal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Editing,
    Presenting {
        index: usize,
    },
}

/// Keys the presenter reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Moved(usize),
    Unchanged,
    /// Playback ended at this index.
    Exited(usize),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    state: PlayerState,
}

impl Player {
    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self.state, PlayerState::Presenting { .. })
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            PlayerState::Presenting { index } => Some(index),
            PlayerState::Editing => None,
        }
    }

    /// Start playback at `index`, clamped into the deck.
    pub fn present(&mut self, index: usize, len: usize) -> usize {
        let index = index.min(len.saturating_sub(1));
        self.state = PlayerState::Presenting { index };
        index
    }

    pub fn exit(&mut self) -> PlayerEvent {
        match self.state {
            PlayerState::Presenting { index } => {
                self.state = PlayerState::Editing;
                PlayerEvent::Exited(index)
            }
            PlayerState::Editing => PlayerEvent::Unchanged,
        }
    }

    /// No-op at the last slide.
    pub fn advance(&mut self, len: usize) -> PlayerEvent {
        match self.state {
            PlayerState::Presenting { index } if index + 1 < len => {
                self.state = PlayerState::Presenting { index: index + 1 };
                PlayerEvent::Moved(index + 1)
            }
            _ => PlayerEvent::Unchanged,
        }
    }

    /// No-op at the first slide.
    pub fn retreat(&mut self) -> PlayerEvent {
        match self.state {
            PlayerState::Presenting { index } if index > 0 => {
                self.state = PlayerState::Presenting { index: index - 1 };
                PlayerEvent::Moved(index - 1)
            }
            _ => PlayerEvent::Unchanged,
        }
    }

    pub fn handle_key(&mut self, key: Key, len: usize) -> PlayerEvent {
        match key {
            Key::ArrowRight | Key::Space => self.advance(len),
            Key::ArrowLeft => self.retreat(),
            Key::Escape => self.exit(),
            Key::Other => PlayerEvent::Unchanged,
        }
    }

    /// Fraction of the deck viewed, in `(0, 1]`. Zero while editing.
    pub fn progress(&self, len: usize) -> f32 {
        match self.state {
            PlayerState::Presenting { index } if len > 0 => {
                ordinal(index.min(len - 1)) as f32 / len as f32
            }
            _ => 0.0,
        }
    }

    /// Counter text like `SLIDE 2 / 5`.
    pub fn counter(&self, len: usize) -> Option<String> {
        self.current()
            .map(|index| format!("SLIDE {} / {}", ordinal(index), len))
    }
}
