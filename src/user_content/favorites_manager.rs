//! Favorites manager.
//!
//! Owns the in-memory favorites collection for the active identity and
//! mediates every read and write through the scoped store. Mutations run
//! under a single state lock: validate, change the collection, persist the
//! whole collection, then notify observers, in that order. The lock spans
//! the read-modify-write sequence, so rapid toggling cannot lose updates.

use crate::catalog::Exercise;
use crate::observer::{Subscribers, SubscriptionId};
use crate::store::{load_collection, save_collection, Namespace, ScopedStore};
use crate::user_content::models::{FavoritesView, StateError};
use std::sync::{Arc, Mutex};
use tracing::warn;

struct FavoritesState {
    current_user_id: Option<String>,
    favorites: Vec<Exercise>,
}

pub struct FavoritesManager {
    store: Arc<dyn ScopedStore>,
    state: Mutex<FavoritesState>,
    subscribers: Mutex<Subscribers<FavoritesView>>,
}

impl FavoritesManager {
    pub fn new(store: Arc<dyn ScopedStore>) -> Self {
        Self {
            store,
            state: Mutex::new(FavoritesState {
                current_user_id: None,
                favorites: Vec::new(),
            }),
            subscribers: Mutex::new(Subscribers::new()),
        }
    }

    /// Re-scopes the manager to the given identity. This is the only path
    /// that repopulates the collection; favorites are never merged across
    /// scopes. No identity means an empty collection.
    pub fn on_identity_change(&self, user_id: Option<&str>) {
        let view = {
            let mut state = self.state.lock().unwrap();
            state.current_user_id = user_id.map(str::to_string);
            state.favorites = match user_id {
                Some(user_id) => {
                    load_collection(self.store.as_ref(), Namespace::Favorites, user_id)
                }
                None => Vec::new(),
            };
            view_of(&state)
        };
        self.notify(&view);
    }

    pub fn favorites(&self) -> Vec<Exercise> {
        self.state.lock().unwrap().favorites.clone()
    }

    pub fn favorites_count(&self) -> usize {
        self.state.lock().unwrap().favorites.len()
    }

    /// Pure lookup, no side effect.
    pub fn is_favorite(&self, exercise_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .favorites
            .iter()
            .any(|favorite| favorite.id == exercise_id)
    }

    /// Appends the exercise snapshot. Adding an exercise that is already a
    /// favorite is a no-op (no write, no notification).
    pub fn add(&self, exercise: Exercise) -> Result<(), StateError> {
        let view = {
            let mut state = self.state.lock().unwrap();
            let user_id = state
                .current_user_id
                .clone()
                .ok_or(StateError::NotAuthenticated)?;

            if state.favorites.iter().any(|f| f.id == exercise.id) {
                return Ok(());
            }

            state.favorites.push(exercise);
            self.persist(&user_id, &state.favorites);
            view_of(&state)
        };
        self.notify(&view);
        Ok(())
    }

    /// Removes any entry with the matching id. Never fails: without an
    /// identity there is nothing to remove and the call is a no-op.
    pub fn remove(&self, exercise_id: &str) {
        let view = {
            let mut state = self.state.lock().unwrap();
            let Some(user_id) = state.current_user_id.clone() else {
                return;
            };

            state.favorites.retain(|f| f.id != exercise_id);
            self.persist(&user_id, &state.favorites);
            view_of(&state)
        };
        self.notify(&view);
    }

    /// Removes the exercise if present, adds it otherwise. Runs under one
    /// lock so repeated calls can never produce duplicate entries.
    pub fn toggle(&self, exercise: Exercise) -> Result<(), StateError> {
        let view = {
            let mut state = self.state.lock().unwrap();
            let user_id = state
                .current_user_id
                .clone()
                .ok_or(StateError::NotAuthenticated)?;

            match state.favorites.iter().position(|f| f.id == exercise.id) {
                Some(position) => {
                    state.favorites.remove(position);
                }
                None => state.favorites.push(exercise),
            }

            self.persist(&user_id, &state.favorites);
            view_of(&state)
        };
        self.notify(&view);
        Ok(())
    }

    /// Empties the collection and erases the persisted value for the
    /// current scope. A no-op without an identity.
    pub fn clear(&self) {
        let view = {
            let mut state = self.state.lock().unwrap();
            let Some(user_id) = state.current_user_id.clone() else {
                return;
            };

            state.favorites.clear();
            if let Err(err) = self.store.clear(Namespace::Favorites, &user_id) {
                warn!("Failed to erase favorites for user {}: {}", user_id, err);
            }
            view_of(&state)
        };
        self.notify(&view);
    }

    pub fn subscribe(&self, callback: Box<dyn Fn(&FavoritesView) + Send>) -> SubscriptionId {
        self.subscribers.lock().unwrap().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().unsubscribe(id);
    }

    /// Write failures keep the in-memory mutation: the session stays
    /// authoritative and the miss is only logged.
    fn persist(&self, user_id: &str, favorites: &[Exercise]) {
        if let Err(err) =
            save_collection(self.store.as_ref(), Namespace::Favorites, user_id, favorites)
        {
            warn!("Failed to persist favorites for user {}: {}", user_id, err);
        }
    }

    fn notify(&self, view: &FavoritesView) {
        self.subscribers.lock().unwrap().notify(view);
    }
}

fn view_of(state: &FavoritesState) -> FavoritesView {
    FavoritesView {
        favorites: state.favorites.clone(),
        count: state.favorites.len(),
    }
}
