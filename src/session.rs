//! Composition root.
//!
//! Builds the identity signal and both managers over one shared store and
//! wires the managers to identity transitions. Everything is injected; the
//! core holds no ambient global state.

use crate::identity::IdentitySignal;
use crate::store::ScopedStore;
use crate::user_content::{FavoritesManager, WorkoutPlanManager};
use std::sync::Arc;

pub struct Session {
    pub identity: Arc<IdentitySignal>,
    pub favorites: Arc<FavoritesManager>,
    pub plans: Arc<WorkoutPlanManager>,
}

impl Session {
    pub fn new(store: Arc<dyn ScopedStore>) -> Self {
        let identity = Arc::new(IdentitySignal::new());
        let favorites = Arc::new(FavoritesManager::new(store.clone()));
        let plans = Arc::new(WorkoutPlanManager::new(store));

        let manager = favorites.clone();
        identity.subscribe(Box::new(move |event| {
            manager.on_identity_change(event.identity().map(|i| i.user_id.as_str()));
        }));

        let manager = plans.clone();
        identity.subscribe(Box::new(move |event| {
            manager.on_identity_change(event.identity().map(|i| i.user_id.as_str()));
        }));

        Self {
            identity,
            favorites,
            plans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Exercise;
    use crate::identity::Identity;
    use crate::store::MemoryScopedStore;
    use chrono::Utc;

    fn identity_for(user_id: &str) -> Identity {
        Identity {
            user_id: user_id.to_string(),
            display_name: user_id.to_string(),
            created_at: Utc::now(),
        }
    }

    fn exercise(id: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: "Push Up".to_string(),
            body_part: "chest".to_string(),
            target: "pectorals".to_string(),
            equipment: "body weight".to_string(),
            secondary_muscles: vec![],
            instructions: vec![],
        }
    }

    #[test]
    fn test_managers_follow_identity_transitions() {
        let session = Session::new(Arc::new(MemoryScopedStore::new()));

        session.identity.login(identity_for("u1"));
        session.favorites.add(exercise("12")).unwrap();

        session.identity.logout();
        assert_eq!(session.favorites.favorites_count(), 0);
        assert_eq!(session.plans.plans_count(), 0);

        session.identity.login(identity_for("u1"));
        assert!(session.favorites.is_favorite("12"));
    }

    #[test]
    fn test_initial_resolve_scopes_both_managers() {
        let session = Session::new(Arc::new(MemoryScopedStore::new()));

        session.identity.resolve(Some(identity_for("u1")));

        session.favorites.add(exercise("12")).unwrap();
        session
            .plans
            .create("Leg Day", &[crate::user_content::Weekday::Monday], vec![])
            .unwrap();

        assert_eq!(session.favorites.favorites_count(), 1);
        assert_eq!(session.plans.plans_count(), 1);
    }
}
