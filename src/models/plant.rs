use serde::{Deserialize, Serialize};

/// Care instructions returned by the model, one free-text line each
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CareInstructions {
    pub watering: String,
    pub light: String,
    pub temperature: String,
    pub soil: String,
}

/// Structured fields extracted from a single model response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPlantRecord {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    /// Expected 0-100, not enforced
    pub quality_score: i32,
    /// Expected 0-100 (higher = rarer), not enforced
    pub rarity_score: i32,
    pub care: CareInstructions,
}

/// An identified plant as shown in the card grid (one per uploaded image)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantInfo {
    pub id: String,
    /// `data:` URL of the uploaded image
    pub image_url: String,
    #[serde(flatten)]
    pub record: ParsedPlantRecord,
}

/// Image file handed over by the front end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    /// Raw file contents, base64 encoded (no `data:` prefix)
    pub data_base64: String,
}

/// A single image that could not be identified
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of one upload batch. Failures never abort the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyBatch {
    pub plants: Vec<PlantInfo>,
    pub failures: Vec<IdentifyFailure>,
}

impl IdentifyBatch {
    /// Message of the most recent failure, which is what the UI shows
    pub fn last_error(&self) -> Option<&str> {
        self.failures.last().map(|f| f.message.as_str())
    }
}
