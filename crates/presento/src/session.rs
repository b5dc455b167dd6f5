//! Owns the deck state and executes reducer effects against storage.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::deck::gateway::{self, ExportPayload, ImportError};
use crate::deck::navigation::ordinal;
use crate::deck::{DeckAction, DeckEffect, DeckState, Position, ReducerError, Route, reduce_deck};
use crate::storage::{self, KeyValueStore, StorageError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Reducer(#[from] ReducerError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("failed to encode export: {0}")]
    Export(#[from] serde_json::Error),
}

pub struct Session<S: KeyValueStore> {
    store: S,
    state: DeckState,
    route: Route,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the deck and the last route from `store`.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let deck = storage::load_deck(&store)?;
        let route = storage::load_route(&store)?;
        let index = route.index(deck.len());
        log::debug!(
            "Opened deck {:?} with {} slides at {route}",
            deck.name(),
            deck.len()
        );
        Ok(Self {
            store,
            state: DeckState::new(deck, index),
            route,
        })
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Apply one action and run its effects.
    pub fn dispatch(&mut self, action: DeckAction) -> Result<Vec<DeckEffect>, SessionError> {
        let effects = reduce_deck(&mut self.state, action)?;
        for effect in &effects {
            self.execute(*effect)?;
        }
        Ok(effects)
    }

    /// Follow an address. The stored route is rewritten with the clamped ordinal.
    pub fn navigate(&mut self, route: Route) -> Result<usize, SessionError> {
        let index = route.index(self.state.deck.len());
        self.route = route;
        self.dispatch(DeckAction::Select(Position::Ordinal(
            ordinal(index).to_string(),
        )))?;
        Ok(index)
    }

    /// Import a payload, replacing the deck. On error nothing changes.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, SessionError> {
        let imported = gateway::import(bytes)?;
        let count = imported.slides.len();
        self.dispatch(DeckAction::Replace {
            slides: imported.slides,
            name: imported.name,
        })?;
        Ok(count)
    }

    pub fn export(&self, now: DateTime<Utc>) -> Result<ExportPayload, SessionError> {
        Ok(gateway::export(&self.state.deck, now)?)
    }

    fn execute(&mut self, effect: DeckEffect) -> Result<(), StorageError> {
        match effect {
            DeckEffect::Persist => storage::save_deck(&mut self.store, &self.state.deck),
            DeckEffect::Navigate(index) => {
                self.route = if self.route.is_presenting() {
                    Route::view(index)
                } else {
                    Route::edit(index)
                };
                storage::save_route(&mut self.store, &self.route)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::deck::SlideId;
    use crate::storage::{MemoryStore, NAME_KEY, ROUTE_KEY, SLIDES_KEY};

    fn session() -> Session<MemoryStore> {
        Session::open(MemoryStore::default()).unwrap()
    }

    fn reopen(session: Session<MemoryStore>) -> Session<MemoryStore> {
        Session::open(session.store).unwrap()
    }

    #[test]
    fn test_mutations_persist_across_sessions() {
        let mut s = session();
        s.dispatch(DeckAction::AddSlide).unwrap();
        s.dispatch(DeckAction::Rename {
            name: "Roadmap ".to_string(),
        })
        .unwrap();
        s.dispatch(DeckAction::CommitName).unwrap();
        let added = s.state().current_slide().id.clone();

        let s = reopen(s);
        assert_eq!(s.state().deck.len(), 4);
        assert_eq!(s.state().deck.name(), "Roadmap");
        assert_eq!(s.state().current_slide().id, added);
        assert_eq!(s.route(), &Route::edit(3));
    }

    #[test]
    fn test_stale_route_is_clamped_on_open() {
        let mut store = MemoryStore::default();
        store.set(ROUTE_KEY, "/edit/42").unwrap();
        let s = Session::open(store).unwrap();
        assert_eq!(s.state().current_index(), 2);
    }

    #[test]
    fn test_navigate_keeps_mode_and_canonicalizes() {
        let mut s = session();
        let index = s.navigate(Route::parse("/view/abc")).unwrap();
        assert_eq!(index, 0);
        assert_eq!(s.route(), &Route::view(0));

        s.dispatch(DeckAction::Reorder { from: 0, to: 2 }).unwrap();
        assert_eq!(s.route(), &Route::view(2));

        s.navigate(Route::edit(1)).unwrap();
        assert_eq!(s.state().current_index(), 1);
        assert_eq!(s.store.get(ROUTE_KEY).unwrap().as_deref(), Some("/edit/2"));
    }

    #[test]
    fn test_failed_import_leaves_everything_untouched() {
        let mut s = session();
        s.dispatch(DeckAction::Select(Position::Id(SlideId::new("2"))))
            .unwrap();
        let before = s.state().clone();
        let stored = s.store.get(SLIDES_KEY).unwrap();

        let err = s.import(br#"{"slides": []}"#).unwrap_err();
        assert!(matches!(err, SessionError::Import(ImportError::Empty)));
        assert_eq!(s.state(), &before);
        assert_eq!(s.store.get(SLIDES_KEY).unwrap(), stored);
    }

    #[test]
    fn test_import_replaces_deck_and_name() {
        let mut s = session();
        let count = s
            .import(br#"{"version": 1, "name": "Imported", "slides": [{"title": "Only"}]}"#)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(s.state().deck.name(), "Imported");
        assert_eq!(s.store.get(NAME_KEY).unwrap().as_deref(), Some("Imported"));
        assert_eq!(s.route(), &Route::edit(0));
    }

    #[test]
    fn test_export_uses_current_deck() {
        let s = session();
        let payload = s.export(Utc::now()).unwrap();
        assert!(payload.filename.starts_with("slides-"));
        assert!(payload.filename.ends_with(".json"));
    }
}
