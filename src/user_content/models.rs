//! User-authored content models.

use crate::catalog::Exercise;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced synchronously to callers of the managers.
/// Storage failures are not represented here: the in-memory mutation stands
/// and the write failure is only logged.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Days a workout plan can be scheduled on. Serialized as the full English
/// day name to stay compatible with collections persisted by earlier clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: &'static [Weekday] = &[
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-authored weekly workout plan.
///
/// `exercises` holds snapshots chosen from the user's favorites at selection
/// time. They are intentionally not pruned when favorites later change; a
/// plan may reference an exercise that is no longer a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub days: Vec<Weekday>,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutPlan {
    pub fn is_scheduled_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

/// Snapshot published to favorites observers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesView {
    pub favorites: Vec<Exercise>,
    pub count: usize,
}

/// Snapshot published to workout plan observers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlansView {
    pub plans: Vec<WorkoutPlan>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_serializes_as_full_day_name() {
        assert_eq!(
            serde_json::to_string(&Weekday::Monday).unwrap(),
            "\"Monday\""
        );
        assert_eq!(
            serde_json::from_str::<Weekday>("\"Thursday\"").unwrap(),
            Weekday::Thursday
        );
    }

    #[test]
    fn test_weekday_all_covers_the_week_in_order() {
        assert_eq!(Weekday::ALL.len(), 7);
        assert_eq!(Weekday::ALL[0], Weekday::Monday);
        assert_eq!(Weekday::ALL[6], Weekday::Sunday);
    }

    #[test]
    fn test_plan_serialization_round_trip() {
        let plan = WorkoutPlan {
            id: "1700000000000".to_string(),
            name: "Leg Day".to_string(),
            days: vec![Weekday::Monday, Weekday::Thursday],
            exercises: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"Monday\""));

        let parsed: WorkoutPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_is_scheduled_on() {
        let plan = WorkoutPlan {
            id: "x".to_string(),
            name: "Leg Day".to_string(),
            days: vec![Weekday::Monday],
            exercises: vec![],
            created_at: Utc::now(),
        };

        assert!(plan.is_scheduled_on(Weekday::Monday));
        assert!(!plan.is_scheduled_on(Weekday::Friday));
    }
}
