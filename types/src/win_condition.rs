use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub type WinConditionId = i64;

pub const DEFAULT_POINTS_CONDITION: &str = "Points";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinCondition {
    pub id: WinConditionId,
    pub name: String,
}

impl WinCondition {
    pub fn new(id: WinConditionId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The win conditions known to the store, in catalog order.
///
/// The set is open: nothing here depends on particular entries except the
/// generic points condition, which is looked up by its configured name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WinConditionCatalog {
    entries: Vec<WinCondition>,
    points_name: String,
}

impl WinConditionCatalog {
    pub fn new(entries: Vec<WinCondition>) -> Self {
        Self::with_points_name(entries, DEFAULT_POINTS_CONDITION)
    }

    pub fn with_points_name(entries: Vec<WinCondition>, points_name: &str) -> Self {
        Self {
            entries,
            points_name: points_name.to_string(),
        }
    }

    pub fn entries(&self) -> &[WinCondition] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WinCondition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: WinConditionId) -> Option<&WinCondition> {
        self.entries.iter().find(|wc| wc.id == id)
    }

    /// Case-insensitive lookup, as typed by a user.
    pub fn find_by_name(&self, name: &str) -> Option<&WinCondition> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|wc| wc.name.eq_ignore_ascii_case(name))
    }

    pub fn points(&self) -> Option<&WinCondition> {
        self.find_by_name(&self.points_name)
    }

    pub fn is_points(&self, id: WinConditionId) -> bool {
        self.points().is_some_and(|points| points.id == id)
    }

    /// Everything a player can claim before the final scoring.
    pub fn instant_victory_conditions(&self) -> Vec<WinCondition> {
        self.entries
            .iter()
            .filter(|wc| !self.is_points(wc.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> WinConditionCatalog {
        WinConditionCatalog::new(vec![
            WinCondition::new(1, "Points"),
            WinCondition::new(2, "Military"),
            WinCondition::new(3, "Science"),
        ])
    }

    #[test]
    fn test_points_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.points().map(|wc| wc.id), Some(1));
        assert!(catalog.is_points(1));
        assert!(!catalog.is_points(2));
    }

    #[test]
    fn test_instant_victory_conditions_exclude_points() {
        let names: Vec<_> = catalog()
            .instant_victory_conditions()
            .into_iter()
            .map(|wc| wc.name)
            .collect();
        assert_eq!(names, vec!["Military", "Science"]);
    }

    #[test]
    fn test_custom_points_name() {
        let catalog = WinConditionCatalog::with_points_name(
            vec![WinCondition::new(7, "Punkte"), WinCondition::new(8, "Senat")],
            "Punkte",
        );
        assert_eq!(catalog.points().map(|wc| wc.id), Some(7));
        assert_eq!(catalog.instant_victory_conditions().len(), 1);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        assert_eq!(catalog().find_by_name(" military").map(|wc| wc.id), Some(2));
        assert!(catalog().find_by_name("Naval").is_none());
    }
}
