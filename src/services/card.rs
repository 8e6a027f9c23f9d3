use super::color::{quality_color, rarity_color};
use crate::models::plant::{CareInstructions, PlantInfo};
use serde::{Deserialize, Serialize};

/// Characters of description shown on a collapsed card
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Per-card toggles, local to one card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardViewState {
    pub expanded: bool,
    pub show_care: bool,
}

/// Score bar as rendered under the card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBar {
    pub score: i32,
    pub color: String,
    pub caption: String,
}

/// Everything the front end needs to draw one plant card
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantCard {
    pub id: String,
    pub image_url: String,
    pub name: String,
    pub scientific_name: String,
    /// Full text when expanded, otherwise the preview
    pub description: String,
    /// Collapsed and longer than the preview ("..." button)
    pub truncated: bool,
    pub expanded: bool,
    pub compare_label: &'static str,
    pub comparing: bool,
    pub care_label: &'static str,
    /// Present only while the care panel is open
    pub care: Option<CareInstructions>,
    pub quality: ScoreBar,
    pub rarity: Option<ScoreBar>,
}

/// First `max_chars` characters of `text`, and whether anything was cut
pub fn description_preview(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

pub fn build_card(
    info: &PlantInfo,
    view: CardViewState,
    comparing: bool,
    show_rarity: bool,
) -> PlantCard {
    let record = &info.record;

    let (description, truncated) = if view.expanded {
        (record.description.clone(), false)
    } else {
        description_preview(&record.description, DESCRIPTION_PREVIEW_CHARS)
    };

    let quality = ScoreBar {
        score: record.quality_score,
        color: quality_color(record.quality_score),
        caption: format!("{}% based on image analysis", record.quality_score),
    };

    let rarity = show_rarity.then(|| ScoreBar {
        score: record.rarity_score,
        color: rarity_color(record.rarity_score),
        caption: format!("{}% (Higher = Rarer)", record.rarity_score),
    });

    PlantCard {
        id: info.id.clone(),
        image_url: info.image_url.clone(),
        name: record.name.clone(),
        scientific_name: record.scientific_name.clone(),
        description,
        truncated,
        expanded: view.expanded,
        compare_label: if comparing { "Comparing" } else { "Compare" },
        comparing,
        care_label: if view.show_care { "Hide Care" } else { "Care Instructions" },
        care: view.show_care.then(|| record.care.clone()),
        quality,
        rarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plant::ParsedPlantRecord;

    fn info_with_description(description: &str) -> PlantInfo {
        PlantInfo {
            id: "p1".to_string(),
            image_url: "data:image/jpeg;base64,AAAA".to_string(),
            record: ParsedPlantRecord {
                name: "Fern".to_string(),
                description: description.to_string(),
                quality_score: 100,
                rarity_score: 0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(description_preview("short", 100), ("short".to_string(), false));
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let text = "x".repeat(100);
        assert_eq!(description_preview(&text, 100), (text.clone(), false));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(150);
        let (preview, truncated) = description_preview(&text, 100);
        assert!(truncated);
        assert_eq!(preview.chars().count(), 100);
    }

    #[test]
    fn test_collapsed_card_shows_preview() {
        let long = "a".repeat(250);
        let card = build_card(&info_with_description(&long), CardViewState::default(), false, false);

        assert_eq!(card.description.len(), 100);
        assert!(card.truncated);
        assert!(!card.expanded);
        assert_eq!(card.compare_label, "Compare");
        assert_eq!(card.care_label, "Care Instructions");
        assert!(card.care.is_none());
        assert!(card.rarity.is_none());
    }

    #[test]
    fn test_expanded_card_shows_full_text() {
        let long = "a".repeat(250);
        let view = CardViewState { expanded: true, show_care: true };
        let card = build_card(&info_with_description(&long), view, true, true);

        assert_eq!(card.description.len(), 250);
        assert!(!card.truncated);
        assert_eq!(card.compare_label, "Comparing");
        assert_eq!(card.care_label, "Hide Care");
        assert!(card.care.is_some());
    }

    #[test]
    fn test_score_bars() {
        let card = build_card(&info_with_description(""), CardViewState::default(), false, true);

        assert_eq!(card.quality.color, "hsl(120, 100%, 40%)");
        assert_eq!(card.quality.caption, "100% based on image analysis");

        let rarity = card.rarity.expect("rarity shown");
        assert_eq!(rarity.color, "hsl(240, 100%, 40%)");
        assert_eq!(rarity.caption, "0% (Higher = Rarer)");
    }
}
