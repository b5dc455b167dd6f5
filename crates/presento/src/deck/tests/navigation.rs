use super::deck;
use crate::deck::navigation::{after_add, after_delete, after_reorder, ordinal, resolve};
use crate::deck::{Position, Route, SlideId};

#[test]
fn resolve_valid_ordinals() {
    assert_eq!(resolve(Some("1"), 3), 0);
    assert_eq!(resolve(Some("2"), 3), 1);
    assert_eq!(resolve(Some("3"), 3), 2);
    assert_eq!(resolve(Some(" 2 "), 3), 1);
}

#[test]
fn resolve_malformed_input_stays_in_range() {
    let inputs = [
        None,
        Some(""),
        Some("abc"),
        Some("-4"),
        Some("0"),
        Some("4"),
        Some("1000"),
        Some("99999999999999999999999"),
        Some("-99999999999999999999999"),
        Some("2.7"),
        Some("+"),
    ];
    for len in 1..5 {
        for raw in inputs {
            let index = resolve(raw, len);
            assert!(index < len, "{raw:?} with len {len} gave {index}");
        }
    }
}

#[test]
fn resolve_clamps_to_nearest_end() {
    assert_eq!(resolve(None, 5), 0);
    assert_eq!(resolve(Some("abc"), 5), 0);
    assert_eq!(resolve(Some("0"), 5), 0);
    assert_eq!(resolve(Some("-2"), 5), 0);
    assert_eq!(resolve(Some("9"), 5), 4);
    assert_eq!(resolve(Some("99999999999999999999999"), 5), 4);
}

#[test]
fn resolve_uses_leading_integer() {
    assert_eq!(resolve(Some("2.7"), 5), 1);
    assert_eq!(resolve(Some("3rd"), 5), 2);
}

#[test]
fn add_points_at_new_last() {
    assert_eq!(after_add(1), 0);
    assert_eq!(after_add(4), 3);
}

#[test]
fn delete_rules() {
    // current slide deleted in the middle: stay put
    assert_eq!(after_delete(1, 1, 3), 1);
    // current slide deleted at the end: new last
    assert_eq!(after_delete(2, 2, 3), 1);
    // earlier slide deleted: follow the current slide
    assert_eq!(after_delete(2, 0, 4), 1);
    // later slide deleted: unchanged
    assert_eq!(after_delete(0, 2, 3), 0);
}

#[test]
fn reorder_rules() {
    assert_eq!(after_reorder(1, 1, 3), 3);
    assert_eq!(after_reorder(1, 0, 2), 0);
    assert_eq!(after_reorder(1, 0, 1), 0);
    assert_eq!(after_reorder(1, 3, 0), 2);
    assert_eq!(after_reorder(1, 3, 1), 2);
    assert_eq!(after_reorder(1, 2, 3), 1);
    assert_eq!(after_reorder(2, 0, 1), 2);
}

#[test]
fn position_resolves_against_deck() {
    let d = deck(&["a", "b", "c"]);
    assert_eq!(Position::Id(SlideId::new("b")).resolve(&d), 1);
    assert_eq!(Position::Id(SlideId::new("nope")).resolve(&d), 0);
    assert_eq!(Position::Ordinal("3".to_string()).resolve(&d), 2);
    assert_eq!(Position::Ordinal("x".to_string()).resolve(&d), 0);
}

#[test]
fn route_parse_and_display() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/settings"), Route::Home);
    assert_eq!(Route::parse("/edit/2"), Route::Edit(Some("2".to_string())));
    assert_eq!(Route::parse("/view/7/"), Route::View(Some("7".to_string())));
    assert_eq!(Route::parse("/view"), Route::View(None));

    assert_eq!(Route::edit(0).to_string(), "/edit/1");
    assert_eq!(Route::view(4).to_string(), "/view/5");
    assert_eq!(Route::Home.to_string(), "/");
    assert_eq!(ordinal(2), 3);
}

#[test]
fn route_index_clamps_stale_addresses() {
    assert_eq!(Route::parse("/view/9").index(3), 2);
    assert_eq!(Route::parse("/edit/abc").index(3), 0);
    assert_eq!(Route::parse("/view").index(3), 0);
    assert_eq!(Route::Home.index(3), 0);
    assert!(Route::parse("/view/2").is_presenting());
    assert!(!Route::parse("/edit/2").is_presenting());
}
