//! Presentation state model: slides, the deck, the current position and the
//! mutations that keep them consistent.

pub mod gateway;
pub mod id;
pub mod model;
pub mod navigation;
pub mod player;
pub mod reducer;
pub mod slide;

#[cfg(test)]
mod tests;

pub use id::SlideId;
pub use model::{DEFAULT_NAME, Deck, DeckState};
pub use navigation::{Position, Route};
pub use reducer::{DeckAction, DeckEffect, ReducerError, reduce_deck};
pub use slide::{ImageFit, Layout, Slide, SlideBody};
