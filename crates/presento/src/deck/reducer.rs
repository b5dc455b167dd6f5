//! Deck actions, side-effect intents, and the transition logic that keeps the
//! deck and the current position consistent.

use std::collections::HashSet;

use thiserror::Error;

use super::id::SlideId;
use super::model::{DeckState, commit_name};
use super::navigation::{self, Position};
use super::slide::{Layout, Slide};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_deck`].
pub enum DeckAction {
    /// Append a blank title slide and move the position to it.
    AddSlide,
    /// Replace the slide carrying the same id. Unknown ids are ignored.
    UpdateSlide(Slide),
    /// Switch a slide's layout, converting its content.
    SetLayout {
        /// Slide to convert.
        id: SlideId,
        /// Target layout.
        layout: Layout,
    },
    /// Remove a slide. Refused when it is the only slide left.
    DeleteSlide {
        /// Slide to remove.
        id: SlideId,
    },
    /// Move the slide at `from` to `to`.
    Reorder {
        /// Index of the slide being moved.
        from: usize,
        /// Index it is reinserted at.
        to: usize,
    },
    /// Set the presentation name verbatim (while editing).
    Rename {
        /// Draft name.
        name: String,
    },
    /// Finalize the name: trim it, or fall back to the default.
    CommitName,
    /// Move the position without touching the slides.
    Select(Position),
    /// Replace every slide, and the name when one is given (import).
    Replace {
        /// New slides, in order.
        slides: Vec<Slide>,
        /// Imported name; blank names are ignored.
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_deck`] for the session to execute.
pub enum DeckEffect {
    /// Rewrite the persisted slides and name.
    Persist,
    /// Publish the position (0-based index) to the navigable address.
    Navigate(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors. The state is untouched when one is returned.
pub enum ReducerError {
    #[error("slide index {index} is out of range for a deck of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a deck needs at least one slide")]
    EmptyDeck,

    #[error("duplicate slide id: {0}")]
    DuplicateId(SlideId),
}

/// Applies a [`DeckAction`] to the deck state and collects resulting effects.
///
/// Every action is validated before anything is mutated, so the deck and its
/// position are either both updated or both left alone.
///
/// # Errors
///
/// Returns [`ReducerError::IndexOutOfRange`] for a reorder outside the deck,
/// and [`ReducerError::EmptyDeck`] or [`ReducerError::DuplicateId`] for an
/// invalid replacement.
pub fn reduce_deck(
    state: &mut DeckState,
    action: DeckAction,
) -> Result<Vec<DeckEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DeckAction::AddSlide => {
            let slide = Slide::new(fresh_id(state));
            state.deck.slides_mut().push(slide);
            let index = navigation::after_add(state.deck.len());
            state.set_current(index);
            effects.push(DeckEffect::Persist);
            effects.push(DeckEffect::Navigate(index));
        }
        DeckAction::UpdateSlide(slide) => {
            let Some(index) = state.deck.index_of(&slide.id) else {
                log::debug!("Ignoring update for unknown slide {}", slide.id);
                return Ok(effects);
            };
            state.deck.slides_mut()[index] = slide;
            effects.push(DeckEffect::Persist);
        }
        DeckAction::SetLayout { id, layout } => {
            let Some(index) = state.deck.index_of(&id) else {
                log::debug!("Ignoring layout change for unknown slide {id}");
                return Ok(effects);
            };
            let slides = state.deck.slides_mut();
            let slide = slides[index].clone().with_layout(layout);
            slides[index] = slide;
            effects.push(DeckEffect::Persist);
        }
        DeckAction::DeleteSlide { id } => {
            let old_len = state.deck.len();
            if old_len <= 1 {
                log::debug!("Refusing to delete the last remaining slide");
                return Ok(effects);
            }
            let Some(removed) = state.deck.index_of(&id) else {
                log::debug!("Ignoring delete for unknown slide {id}");
                return Ok(effects);
            };
            let index = navigation::after_delete(state.current_index(), removed, old_len);
            state.deck.slides_mut().remove(removed);
            state.set_current(index);
            effects.push(DeckEffect::Persist);
            effects.push(DeckEffect::Navigate(index));
        }
        DeckAction::Reorder { from, to } => {
            let len = state.deck.len();
            for index in [from, to] {
                if index >= len {
                    return Err(ReducerError::IndexOutOfRange { index, len });
                }
            }
            if from == to {
                return Ok(effects);
            }
            let index = navigation::after_reorder(state.current_index(), from, to);
            let slides = state.deck.slides_mut();
            let moved = slides.remove(from);
            slides.insert(to, moved);
            state.set_current(index);
            effects.push(DeckEffect::Persist);
            effects.push(DeckEffect::Navigate(index));
        }
        DeckAction::Rename { name } => {
            state.deck.set_name(name);
            effects.push(DeckEffect::Persist);
        }
        DeckAction::CommitName => {
            let committed = commit_name(state.deck.name());
            if committed != state.deck.name() {
                state.deck.set_name(committed);
                effects.push(DeckEffect::Persist);
            }
        }
        DeckAction::Select(position) => {
            let index = position.resolve(&state.deck);
            state.set_current(index);
            effects.push(DeckEffect::Navigate(index));
        }
        DeckAction::Replace { slides, name } => {
            if slides.is_empty() {
                return Err(ReducerError::EmptyDeck);
            }
            if let Some(id) = first_duplicate(&slides) {
                return Err(ReducerError::DuplicateId(id));
            }
            *state.deck.slides_mut() = slides;
            if let Some(name) = name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                state.deck.set_name(name.to_string());
            }
            state.set_current(0);
            effects.push(DeckEffect::Persist);
            effects.push(DeckEffect::Navigate(0));
        }
    }
    Ok(effects)
}

fn first_duplicate(slides: &[Slide]) -> Option<SlideId> {
    let mut seen = HashSet::with_capacity(slides.len());
    slides
        .iter()
        .find(|slide| !seen.insert(&slide.id))
        .map(|slide| slide.id.clone())
}

fn fresh_id(state: &DeckState) -> SlideId {
    loop {
        let id = SlideId::generate();
        if !state.deck.contains(&id) {
            return id;
        }
    }
}
