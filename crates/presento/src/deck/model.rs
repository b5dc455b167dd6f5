use super::id::SlideId;
use super::slide::{Slide, SlideBody};

pub const DEFAULT_NAME: &str = "Slides";

/// Ordered slides plus the presentation name. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    name: String,
    slides: Vec<Slide>,
}

impl Deck {
    /// Returns `None` when `slides` is empty.
    pub fn new(name: impl Into<String>, slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            slides,
        })
    }

    /// The sample deck a fresh install starts from.
    pub fn initial() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            slides: initial_slides(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn index_of(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SlideId) -> bool {
        self.index_of(id).is_some()
    }

    pub(super) fn slides_mut(&mut self) -> &mut Vec<Slide> {
        &mut self.slides
    }

    pub(super) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Trim a committed name, falling back to [`DEFAULT_NAME`].
pub fn commit_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Deck plus the index of the slide currently addressed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckState {
    pub deck: Deck,
    current: usize,
}

impl DeckState {
    /// The index is clamped into the deck.
    pub fn new(deck: Deck, current: usize) -> Self {
        let current = current.min(deck.last_index());
        Self { deck, current }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.deck.slides[self.current]
    }

    pub(super) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.deck.len());
        self.current = index.min(self.deck.last_index());
    }
}

fn initial_slides() -> Vec<Slide> {
    vec![
        Slide {
            id: SlideId::new("1"),
            title: Some("Welcome to Presento".to_string()),
            notes: None,
            body: SlideBody::Title {
                content: Some("A lightweight slide creator".to_string()),
            },
        },
        Slide {
            id: SlideId::new("2"),
            title: Some("Features".to_string()),
            notes: None,
            body: SlideBody::Bullets {
                items: vec![
                    "Simple Markdown-like editing".to_string(),
                    "Real-time preview".to_string(),
                    "Dark mode support".to_string(),
                    "Local storage persistence".to_string(),
                    "Manual JSON import/export".to_string(),
                ],
            },
        },
        Slide {
            id: SlideId::new("3"),
            title: Some("Code Snippets".to_string()),
            notes: None,
            body: SlideBody::Code {
                content: None,
                code: Some(
                    "// Example code block\nfunction hello() {\n  console.log(\"Hello World!\");\n}"
                        .to_string(),
                ),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_rejected() {
        assert!(Deck::new("x", Vec::new()).is_none());
    }

    #[test]
    fn test_initial_deck() {
        let deck = Deck::initial();
        assert_eq!(deck.name(), DEFAULT_NAME);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.index_of(&SlideId::new("3")), Some(2));
    }

    #[test]
    fn test_commit_name() {
        assert_eq!(commit_name("  Quarterly review "), "Quarterly review");
        assert_eq!(commit_name("   "), DEFAULT_NAME);
        assert_eq!(commit_name(""), DEFAULT_NAME);
    }

    #[test]
    fn test_state_clamps_current() {
        let state = DeckState::new(Deck::initial(), 10);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.current_slide().id, SlideId::new("3"));
    }
}
