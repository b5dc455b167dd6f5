//! JSON export and import of a deck.
//!
//! Export writes a versioned envelope:
//!
//! ```json
//! { "version": 1, "exportedAt": "2026-01-31T09:30:00.000Z", "name": "Demo", "slides": [...] }
//! ```
//!
//! Import accepts that envelope, or a bare array of slides.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::model::Deck;
use super::slide::{Slide, SlideRecord, slides_from_records};

pub const ENVELOPE_VERSION: u32 = 1;
const MAX_SLUG_LEN: usize = 50;
const FALLBACK_SLUG: &str = "slides";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    version: u32,
    exported_at: String,
    name: &'a str,
    slides: &'a [Slide],
}

#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    /// Suggested file name, e.g. `quarterly-review-2026-01-31.json`.
    pub filename: String,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no slides found in file")]
    NoSlides,

    #[error("the slide list is empty")]
    Empty,

    #[error("slide {index} is invalid: {source}")]
    InvalidSlide {
        index: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDeck {
    pub slides: Vec<Slide>,
    /// Trimmed name, present only when the envelope carried a non-blank one.
    pub name: Option<String>,
}

/// Serialize `deck` into a pretty-printed envelope stamped with `now`.
pub fn export(deck: &Deck, now: DateTime<Utc>) -> Result<ExportPayload, serde_json::Error> {
    let envelope = Envelope {
        version: ENVELOPE_VERSION,
        exported_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        name: deck.name(),
        slides: deck.slides(),
    };
    let bytes = serde_json::to_vec_pretty(&envelope)?;
    Ok(ExportPayload {
        bytes,
        filename: export_filename(deck.name(), now),
    })
}

pub fn export_filename(name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.json", slugify(name), now.format("%Y-%m-%d"))
}

/// Lower-case, collapse every run of non-alphanumerics to `-`, cap at 50 chars.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Parse an export envelope or a bare slide array.
///
/// Slides without an id, or repeating an id seen earlier in the payload, get a
/// freshly generated one.
pub fn import(bytes: &[u8]) -> Result<ImportedDeck, ImportError> {
    let parsed: Value = serde_json::from_slice(bytes)?;
    let (raw_slides, name) = match parsed {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let Some(Value::Array(items)) = map.remove("slides") else {
                return Err(ImportError::NoSlides);
            };
            let name = match map.remove("name") {
                Some(Value::String(name)) => Some(name.trim().to_string()),
                _ => None,
            };
            (items, name.filter(|n| !n.is_empty()))
        }
        _ => return Err(ImportError::NoSlides),
    };
    if raw_slides.is_empty() {
        return Err(ImportError::Empty);
    }

    let records = raw_slides
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<SlideRecord>(value)
                .map_err(|source| ImportError::InvalidSlide { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Imported {} slides", records.len());
    Ok(ImportedDeck {
        slides: slides_from_records(records),
        name,
    })
}
