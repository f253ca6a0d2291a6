mod favorites_manager;
mod models;
mod plan_id;
mod workout_plan_manager;

pub use favorites_manager::FavoritesManager;
pub use models::{FavoritesView, StateError, Weekday, WorkoutPlan, WorkoutPlansView};
pub use plan_id::PlanIdGenerator;
pub use workout_plan_manager::WorkoutPlanManager;
