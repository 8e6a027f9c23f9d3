use crate::models::plant::PlantInfo;
use serde::{Deserialize, Serialize};

/// Maximum number of plants shown side by side
pub const MAX_COMPARED: usize = 2;

/// Plants selected for side-by-side comparison.
///
/// Keeps the two most recently selected ids, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

/// One column of the comparison panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub quality_score: i32,
    /// None while rarity is hidden
    pub rarity_score: Option<i32>,
    /// "<watering>, <light>"
    pub care_summary: String,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect a plant.
    ///
    /// Selecting a third plant evicts the oldest selection.
    /// Returns true if the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            return false;
        }

        if self.ids.len() >= MAX_COMPARED {
            self.ids.remove(0);
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Build the comparison panel rows, in plant list order
    pub fn compare_rows(&self, plants: &[PlantInfo], show_rarity: bool) -> Vec<CompareRow> {
        plants
            .iter()
            .filter(|p| self.contains(&p.id))
            .map(|p| CompareRow {
                id: p.id.clone(),
                name: p.record.name.clone(),
                scientific_name: p.record.scientific_name.clone(),
                quality_score: p.record.quality_score,
                rarity_score: show_rarity.then_some(p.record.rarity_score),
                care_summary: format!("{}, {}", p.record.care.watering, p.record.care.light),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plant::{CareInstructions, ParsedPlantRecord};

    fn plant(id: &str, name: &str) -> PlantInfo {
        PlantInfo {
            id: id.to_string(),
            image_url: String::new(),
            record: ParsedPlantRecord {
                name: name.to_string(),
                scientific_name: format!("{} sp.", name),
                quality_score: 80,
                rarity_score: 30,
                care: CareInstructions {
                    watering: "Weekly".to_string(),
                    light: "Shade".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut selection = ComparisonSelection::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));

        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_third_selection_evicts_oldest() {
        let mut selection = ComparisonSelection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");

        assert_eq!(selection.ids(), &["b".to_string(), "c".to_string()]);
        assert!(!selection.contains("a"));
    }

    #[test]
    fn test_deselect_then_select_keeps_order() {
        let mut selection = ComparisonSelection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("a");
        selection.toggle("c");

        assert_eq!(selection.ids(), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_never_more_than_two() {
        let mut selection = ComparisonSelection::new();
        for id in ["a", "b", "c", "d", "e"] {
            selection.toggle(id);
            assert!(selection.ids().len() <= MAX_COMPARED);
        }
        assert_eq!(selection.ids(), &["d".to_string(), "e".to_string()]);
    }

    #[test]
    fn test_compare_rows_follow_plant_order() {
        let plants = vec![plant("1", "Fern"), plant("2", "Rose"), plant("3", "Ivy")];
        let mut selection = ComparisonSelection::new();
        selection.toggle("3");
        selection.toggle("1");

        let rows = selection.compare_rows(&plants, false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Fern");
        assert_eq!(rows[1].name, "Ivy");
        assert_eq!(rows[0].rarity_score, None);
        assert_eq!(rows[0].care_summary, "Weekly, Shade");
    }

    #[test]
    fn test_compare_rows_show_rarity() {
        let plants = vec![plant("1", "Fern")];
        let mut selection = ComparisonSelection::new();
        selection.toggle("1");

        let rows = selection.compare_rows(&plants, true);
        assert_eq!(rows[0].rarity_score, Some(30));
        assert_eq!(rows[0].quality_score, 80);
    }
}
