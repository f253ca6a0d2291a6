//! Client-side filtering of fetched exercises.
//!
//! Pure projections over an already-fetched page; nothing here touches the
//! network or the store.

use super::exercise::Exercise;

/// Body part criterion. `All` disables the category test entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyPartFilter {
    All,
    Category(String),
}

impl BodyPartFilter {
    /// Parses the UI value, where the literal "all" (any case) is the wildcard.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            BodyPartFilter::All
        } else {
            BodyPartFilter::Category(value.to_string())
        }
    }

    fn matches(&self, exercise: &Exercise) -> bool {
        match self {
            BodyPartFilter::All => true,
            BodyPartFilter::Category(category) => &exercise.body_part == category,
        }
    }
}

/// Search + category filter over a fetched collection.
#[derive(Debug, Clone)]
pub struct ExerciseFilter {
    /// Case-insensitive substring, matched against name, target, equipment
    /// and body part; any field matching qualifies.
    pub search: Option<String>,
    pub body_part: BodyPartFilter,
}

impl Default for ExerciseFilter {
    fn default() -> Self {
        Self {
            search: None,
            body_part: BodyPartFilter::All,
        }
    }
}

impl ExerciseFilter {
    /// Applies the filter, keeping the input order.
    pub fn filter(&self, exercises: Vec<Exercise>) -> Vec<Exercise> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        exercises
            .into_iter()
            .filter(|exercise| self.body_part.matches(exercise))
            .filter(|exercise| match &search {
                Some(needle) => matches_search(exercise, needle),
                None => true,
            })
            .collect()
    }
}

fn matches_search(exercise: &Exercise, needle: &str) -> bool {
    exercise.name.to_lowercase().contains(needle)
        || exercise.target.to_lowercase().contains(needle)
        || exercise.equipment.to_lowercase().contains(needle)
        || exercise.body_part.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_exercise(id: &str, name: &str, body_part: &str, target: &str, equipment: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            body_part: body_part.to_string(),
            target: target.to_string(),
            equipment: equipment.to_string(),
            secondary_muscles: vec![],
            instructions: vec![],
        }
    }

    fn sample() -> Vec<Exercise> {
        vec![
            make_exercise("1", "Push Up", "chest", "pectorals", "body weight"),
            make_exercise("2", "Barbell Squat", "upper legs", "glutes", "barbell"),
            make_exercise("3", "Treadmill Run", "cardio", "cardiovascular system", "treadmill"),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let filtered = ExerciseFilter::default().filter(sample());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_category_requires_exact_match() {
        let filter = ExerciseFilter {
            search: None,
            body_part: BodyPartFilter::Category("chest".to_string()),
        };

        let filtered = filter.filter(sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");

        // "upper" is a prefix of a category, not a category
        let filter = ExerciseFilter {
            search: None,
            body_part: BodyPartFilter::Category("upper".to_string()),
        };
        assert!(filter.filter(sample()).is_empty());
    }

    #[test]
    fn test_all_wildcard_parses_case_insensitively() {
        assert_eq!(BodyPartFilter::parse("all"), BodyPartFilter::All);
        assert_eq!(BodyPartFilter::parse("ALL"), BodyPartFilter::All);
        assert_eq!(
            BodyPartFilter::parse("chest"),
            BodyPartFilter::Category("chest".to_string())
        );
    }

    #[test]
    fn test_search_matches_any_field() {
        // name
        let filter = ExerciseFilter {
            search: Some("push".to_string()),
            body_part: BodyPartFilter::All,
        };
        assert_eq!(filter.filter(sample()).len(), 1);

        // target
        let filter = ExerciseFilter {
            search: Some("GLUTES".to_string()),
            body_part: BodyPartFilter::All,
        };
        assert_eq!(filter.filter(sample())[0].id, "2");

        // equipment
        let filter = ExerciseFilter {
            search: Some("barbell".to_string()),
            body_part: BodyPartFilter::All,
        };
        assert_eq!(filter.filter(sample()).len(), 1);

        // body part
        let filter = ExerciseFilter {
            search: Some("cardio".to_string()),
            body_part: BodyPartFilter::All,
        };
        assert_eq!(filter.filter(sample())[0].id, "3");
    }

    #[test]
    fn test_search_and_category_compose() {
        let filter = ExerciseFilter {
            search: Some("squat".to_string()),
            body_part: BodyPartFilter::Category("chest".to_string()),
        };
        assert!(filter.filter(sample()).is_empty());

        let filter = ExerciseFilter {
            search: Some("squat".to_string()),
            body_part: BodyPartFilter::Category("upper legs".to_string()),
        };
        assert_eq!(filter.filter(sample()).len(), 1);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ExerciseFilter {
            search: Some("   ".to_string()),
            body_part: BodyPartFilter::All,
        };
        assert_eq!(filter.filter(sample()).len(), 3);
    }

    #[test]
    fn test_order_is_preserved() {
        let filter = ExerciseFilter {
            search: Some("e".to_string()),
            body_part: BodyPartFilter::All,
        };
        let ids: Vec<String> = filter.filter(sample()).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
