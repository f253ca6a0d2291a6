//! Workout plan manager.
//!
//! Same shape as the favorites manager: one state lock around the whole
//! validate / mutate / persist sequence, observers notified after the write.

use crate::catalog::Exercise;
use crate::observer::{Subscribers, SubscriptionId};
use crate::store::{load_collection, save_collection, Namespace, ScopedStore};
use crate::user_content::models::{StateError, Weekday, WorkoutPlan, WorkoutPlansView};
use crate::user_content::plan_id::PlanIdGenerator;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::warn;

struct WorkoutPlanState {
    current_user_id: Option<String>,
    plans: Vec<WorkoutPlan>,
}

pub struct WorkoutPlanManager {
    store: Arc<dyn ScopedStore>,
    state: Mutex<WorkoutPlanState>,
    plan_ids: PlanIdGenerator,
    subscribers: Mutex<Subscribers<WorkoutPlansView>>,
}

impl WorkoutPlanManager {
    pub fn new(store: Arc<dyn ScopedStore>) -> Self {
        Self {
            store,
            state: Mutex::new(WorkoutPlanState {
                current_user_id: None,
                plans: Vec::new(),
            }),
            plan_ids: PlanIdGenerator::new(),
            subscribers: Mutex::new(Subscribers::new()),
        }
    }

    /// Re-scopes the manager to the given identity, reloading its plans from
    /// the store or resetting to empty when logged out.
    pub fn on_identity_change(&self, user_id: Option<&str>) {
        let view = {
            let mut state = self.state.lock().unwrap();
            state.current_user_id = user_id.map(str::to_string);
            state.plans = match user_id {
                Some(user_id) => {
                    load_collection(self.store.as_ref(), Namespace::Workouts, user_id)
                }
                None => Vec::new(),
            };
            view_of(&state)
        };
        self.notify(&view);
    }

    pub fn plans(&self) -> Vec<WorkoutPlan> {
        self.state.lock().unwrap().plans.clone()
    }

    pub fn plans_count(&self) -> usize {
        self.state.lock().unwrap().plans.len()
    }

    /// Every plan scheduled on the given day, in stored order.
    pub fn list_by_day(&self, day: Weekday) -> Vec<WorkoutPlan> {
        self.state
            .lock()
            .unwrap()
            .plans
            .iter()
            .filter(|plan| plan.is_scheduled_on(day))
            .cloned()
            .collect()
    }

    /// Creates a plan from favorites snapshots selected by the caller and
    /// appends it to the collection. Fails without mutating on an empty
    /// name or an empty day selection.
    pub fn create(
        &self,
        name: &str,
        days: &[Weekday],
        exercises: Vec<Exercise>,
    ) -> Result<WorkoutPlan, StateError> {
        let (plan, view) = {
            let mut state = self.state.lock().unwrap();
            let user_id = state
                .current_user_id
                .clone()
                .ok_or(StateError::NotAuthenticated)?;
            let (name, days) = validate_plan_fields(name, days)?;

            let plan = WorkoutPlan {
                id: self.plan_ids.next_id(),
                name,
                days,
                exercises,
                created_at: Utc::now(),
            };

            state.plans.push(plan.clone());
            self.persist(&user_id, &state.plans);
            (plan, view_of(&state))
        };
        self.notify(&view);
        Ok(plan)
    }

    /// Replaces name, days and exercises of an existing plan, preserving its
    /// id and creation time.
    pub fn update(
        &self,
        plan_id: &str,
        name: &str,
        days: &[Weekday],
        exercises: Vec<Exercise>,
    ) -> Result<WorkoutPlan, StateError> {
        let (plan, view) = {
            let mut state = self.state.lock().unwrap();
            let user_id = state
                .current_user_id
                .clone()
                .ok_or(StateError::NotAuthenticated)?;
            let (name, days) = validate_plan_fields(name, days)?;

            let plan = state
                .plans
                .iter_mut()
                .find(|plan| plan.id == plan_id)
                .ok_or_else(|| StateError::NotFound(format!("workout plan {}", plan_id)))?;

            plan.name = name;
            plan.days = days;
            plan.exercises = exercises;
            let plan = plan.clone();

            self.persist(&user_id, &state.plans);
            (plan, view_of(&state))
        };
        self.notify(&view);
        Ok(plan)
    }

    /// Removes the matching plan. Deleting an id that is not there (for
    /// example deleting twice) is a no-op, not an error.
    pub fn delete(&self, plan_id: &str) -> Result<(), StateError> {
        let view = {
            let mut state = self.state.lock().unwrap();
            let user_id = state
                .current_user_id
                .clone()
                .ok_or(StateError::NotAuthenticated)?;

            state.plans.retain(|plan| plan.id != plan_id);
            self.persist(&user_id, &state.plans);
            view_of(&state)
        };
        self.notify(&view);
        Ok(())
    }

    pub fn subscribe(&self, callback: Box<dyn Fn(&WorkoutPlansView) + Send>) -> SubscriptionId {
        self.subscribers.lock().unwrap().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().unsubscribe(id);
    }

    /// Write failures keep the in-memory mutation, same policy as favorites.
    fn persist(&self, user_id: &str, plans: &[WorkoutPlan]) {
        if let Err(err) =
            save_collection(self.store.as_ref(), Namespace::Workouts, user_id, plans)
        {
            warn!(
                "Failed to persist workout plans for user {}: {}",
                user_id, err
            );
        }
    }

    fn notify(&self, view: &WorkoutPlansView) {
        self.subscribers.lock().unwrap().notify(view);
    }
}

/// Shared create/update validation: non-blank name, at least one day.
/// Days are de-duplicated preserving first-seen order so a plan can never be
/// listed twice for the same day.
fn validate_plan_fields(
    name: &str,
    days: &[Weekday],
) -> Result<(String, Vec<Weekday>), StateError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StateError::Validation(
            "workout name cannot be empty".to_string(),
        ));
    }
    if days.is_empty() {
        return Err(StateError::Validation(
            "select at least one day".to_string(),
        ));
    }

    let mut deduped: Vec<Weekday> = Vec::with_capacity(days.len());
    for day in days {
        if !deduped.contains(day) {
            deduped.push(*day);
        }
    }

    Ok((name.to_string(), deduped))
}

fn view_of(state: &WorkoutPlanState) -> WorkoutPlansView {
    WorkoutPlansView {
        plans: state.plans.clone(),
        count: state.plans.len(),
    }
}
