mod navigation;
mod scenarios;

use super::{Deck, DeckAction, DeckEffect, DeckState, Slide, SlideBody, SlideId, reduce_deck};

/// Helper to create a title slide.
fn slide(id: &str, title: &str) -> Slide {
    Slide {
        id: SlideId::new(id),
        title: Some(title.to_string()),
        notes: None,
        body: SlideBody::Title {
            content: Some(format!("{title} content")),
        },
    }
}

/// Helper to create a deck whose slides are titled after their ids.
fn deck(ids: &[&str]) -> Deck {
    let slides = ids.iter().map(|id| slide(id, &id.to_uppercase())).collect();
    Deck::new("Test deck", slides).expect("non-empty deck")
}

/// Helper to create a deck state positioned at `current`.
fn state(ids: &[&str], current: usize) -> DeckState {
    DeckState::new(deck(ids), current)
}

/// Slide ids in deck order.
fn order(state: &DeckState) -> Vec<String> {
    state
        .deck
        .slides()
        .iter()
        .map(|s| s.id.to_string())
        .collect()
}

/// Id of the slide currently addressed.
fn current_id(state: &DeckState) -> String {
    state.current_slide().id.to_string()
}

/// Apply an action that must succeed.
fn apply(state: &mut DeckState, action: DeckAction) -> Vec<DeckEffect> {
    reduce_deck(state, action).expect("action should succeed")
}
