//! Mapping between stable slide ids, 0-based indices and the 1-based ordinals
//! used in navigable addresses.
//!
//! Every recomputation takes pre-mutation indices. The reducer applies the
//! deck change and the new position together.

use std::fmt;

use super::id::SlideId;
use super::model::Deck;

/// Resolve a raw address segment to a 0-based index.
///
/// Unparsable or absent input means ordinal 1. The ordinal is clamped into
/// `[1, len]`, so the result is always a valid index for a non-empty deck.
pub fn resolve(raw: Option<&str>, len: usize) -> usize {
    let ordinal = raw.and_then(parse_leading_int).unwrap_or(1);
    let max = len.max(1) as i64;
    (ordinal.clamp(1, max) - 1) as usize
}

/// Parse the leading integer of `raw` (`"3abc"` is 3). Digit runs too long for
/// an `i64` saturate so they still clamp to the nearest end.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// 1-based ordinal for an index.
pub fn ordinal(index: usize) -> usize {
    index + 1
}

/// Position after appending a slide: the new last slide.
pub fn after_add(new_len: usize) -> usize {
    new_len.saturating_sub(1)
}

/// Position after removing the slide at `removed` from a deck of `old_len`.
///
/// Deleting the current slide keeps the same index so the next slide shifts
/// into place, except at the end of the deck where the position moves to the
/// new last slide.
pub fn after_delete(current: usize, removed: usize, old_len: usize) -> usize {
    if removed < current {
        current - 1
    } else if removed == current && current + 1 >= old_len {
        old_len.saturating_sub(2)
    } else {
        current
    }
}

/// Position after moving the slide at `from` to `to`. The current slide stays
/// addressed.
pub fn after_reorder(current: usize, from: usize, to: usize) -> usize {
    if from == current {
        to
    } else if from < current && to >= current {
        current - 1
    } else if from > current && to <= current {
        current + 1
    } else {
        current
    }
}

/// An externally supplied position: a stable id or a raw ordinal segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Id(SlideId),
    Ordinal(String),
}

impl Position {
    /// Unknown ids resolve to the first slide.
    pub fn resolve(&self, deck: &Deck) -> usize {
        match self {
            Self::Id(id) => deck.index_of(id).unwrap_or(0),
            Self::Ordinal(raw) => resolve(Some(raw), deck.len()),
        }
    }
}

/// Navigable address: `/`, `/edit/<n>` or `/view/<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Edit(Option<String>),
    View(Option<String>),
}

impl Route {
    pub fn edit(index: usize) -> Self {
        Self::Edit(Some(ordinal(index).to_string()))
    }

    pub fn view(index: usize) -> Self {
        Self::View(Some(ordinal(index).to_string()))
    }

    /// Unknown paths are treated as home.
    pub fn parse(path: &str) -> Self {
        let mut parts = path.trim().trim_matches('/').splitn(2, '/');
        let head = parts.next().unwrap_or_default();
        let segment = parts
            .next()
            .map(|s| s.trim_matches('/').to_string())
            .filter(|s| !s.is_empty());
        match head {
            "edit" => Self::Edit(segment),
            "view" => Self::View(segment),
            _ => Self::Home,
        }
    }

    /// The slide index this route addresses in a deck of `len` slides.
    pub fn index(&self, len: usize) -> usize {
        match self {
            Self::Home => 0,
            Self::Edit(segment) | Self::View(segment) => resolve(segment.as_deref(), len),
        }
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self, Self::View(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Edit(None) => write!(f, "/edit"),
            Self::Edit(Some(segment)) => write!(f, "/edit/{segment}"),
            Self::View(None) => write!(f, "/view"),
            Self::View(Some(segment)) => write!(f, "/view/{segment}"),
        }
    }
}
