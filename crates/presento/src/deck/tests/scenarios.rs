//! End-to-end walks through the reducer, the player and the gateway.

use pretty_assertions::assert_eq;

use super::{apply, current_id, order, state};
use crate::deck::gateway::{export, import};
use crate::deck::player::{Player, PlayerEvent};
use crate::deck::{DeckAction, Route, SlideId};

#[test]
fn moving_first_slide_to_end_keeps_current() {
    // [A,B,C], current B; move A to the end.
    let mut s = state(&["a", "b", "c"], 1);
    apply(&mut s, DeckAction::Reorder { from: 0, to: 2 });
    assert_eq!(order(&s), vec!["b", "c", "a"]);
    assert_eq!(current_id(&s), "b");
    assert_eq!(s.current_index(), 0);
}

#[test]
fn deleting_last_ordinal_moves_to_new_last() {
    let mut s = state(&["a", "b", "c", "d"], 3);
    apply(
        &mut s,
        DeckAction::DeleteSlide {
            id: SlideId::new("d"),
        },
    );
    assert_eq!(s.current_index(), 2);
    assert_eq!(Route::edit(s.current_index()).to_string(), "/edit/3");
}

#[test]
fn presenting_at_last_slide_then_advancing() {
    let s = state(&["a", "b", "c"], 2);
    let mut player = Player::default();
    player.present(s.current_index(), s.deck.len());
    assert_eq!(player.advance(s.deck.len()), PlayerEvent::Unchanged);
    assert_eq!(player.current(), Some(2));
    assert_eq!(player.progress(s.deck.len()), 1.0);
}

#[test]
fn playback_position_flows_back_to_editor() {
    let mut s = state(&["a", "b", "c"], 0);
    let mut player = Player::default();
    player.present(s.current_index(), s.deck.len());
    player.advance(s.deck.len());
    let PlayerEvent::Exited(index) = player.exit() else {
        panic!("expected playback to exit");
    };
    apply(
        &mut s,
        DeckAction::Select(crate::deck::Position::Ordinal((index + 1).to_string())),
    );
    assert_eq!(current_id(&s), "b");
}

#[test]
fn import_replaces_deck_atomically() {
    let mut s = state(&["a", "b"], 1);
    let source = state(&["x", "y", "z"], 0);
    let payload = export(&source.deck, chrono::Utc::now()).unwrap();

    let imported = import(&payload.bytes).unwrap();
    apply(
        &mut s,
        DeckAction::Replace {
            slides: imported.slides,
            name: imported.name,
        },
    );
    assert_eq!(order(&s), vec!["x", "y", "z"]);
    assert_eq!(s.current_index(), 0);
}
