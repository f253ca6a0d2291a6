use serde::{Deserialize, Serialize};

/// An exercise as served by the remote catalog. Snapshots of this struct are
/// what gets persisted into favorites and workout plans, since the catalog
/// offers no cheap re-fetch-by-id at display time.
///
/// Field names follow the catalog's wire format (`bodyPart`, ...), which is
/// also the layout of collections persisted by earlier clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub body_part: String,
    pub target: String,
    pub equipment: String,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// The body part categories the catalog knows about. "all" is the filter
/// wildcard, not a category.
pub const BODY_PARTS: &[&str] = &[
    "back",
    "cardio",
    "chest",
    "lower arms",
    "lower legs",
    "neck",
    "shoulders",
    "upper arms",
    "upper legs",
    "waist",
];
