use super::card::{build_card, CardViewState, PlantCard};
use super::comparison::{CompareRow, ComparisonSelection};
use super::parser::parse_plant_info;
use super::vision::{ImagePayload, VisionModel};
use crate::error::AppError;
use crate::models::plant::{IdentifyBatch, IdentifyFailure, PlantInfo, UploadedImage};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::Mutex as AsyncMutex;

/// Identify one image: encode, ask the model, parse the reply
pub async fn identify_one<M: VisionModel>(
    model: &M,
    upload: &UploadedImage,
    id: String,
) -> Result<PlantInfo, AppError> {
    // Decode the upload and sniff its MIME type
    let payload = ImagePayload::from_base64(&upload.file_name, &upload.data_base64)?;

    // Ask the model, then parse its free-text reply
    let text = model.describe(&payload).await?;
    let record = parse_plant_info(&text);

    tracing::debug!(id = %id, name = %record.name, "Parsed plant record");

    Ok(PlantInfo {
        id,
        image_url: payload.data_url(),
        record,
    })
}

/// Identify every upload in order, one request at a time.
///
/// A failed image is recorded and the rest of the batch still runs.
pub async fn identify_all<M: VisionModel>(model: &M, uploads: &[UploadedImage]) -> IdentifyBatch {
    let mut batch = IdentifyBatch::default();

    for (index, upload) in uploads.iter().enumerate() {
        // Timestamp plus position keeps ids unique within a batch
        let id = format!("{}{}", chrono::Utc::now().timestamp_millis(), index);

        match identify_one(model, upload, id).await {
            Ok(info) => batch.plants.push(info),
            Err(e) => {
                // Record and keep going with the next image
                tracing::error!(file = %upload.file_name, error = %e, "Error identifying plant");
                batch.failures.push(IdentifyFailure {
                    file_name: upload.file_name.clone(),
                    message: format!("Error: {}", e),
                });
            }
        }
    }

    tracing::info!(
        identified = batch.plants.len(),
        failed = batch.failures.len(),
        "Identification batch finished"
    );
    batch
}

/// Runs upload batches against a model, never two at once
pub struct Identifier<M> {
    model: M,
    gate: AsyncMutex<()>,
}

impl<M: VisionModel> Identifier<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            gate: AsyncMutex::new(()),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Wait for any running batch, then process this one
    pub async fn run(&self, uploads: &[UploadedImage]) -> IdentifyBatch {
        // Held for the whole batch so requests never overlap
        let _guard = self.gate.lock().await;
        identify_all(&self.model, uploads).await
    }
}

/// Snapshot of the whole page for the front end
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub cards: Vec<PlantCard>,
    pub comparison: Vec<CompareRow>,
    pub show_rarity: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// In-memory state of one identification session.
///
/// Plants are append-only; the other fields are small view flags.
#[derive(Debug, Default)]
pub struct PlantSession {
    plants: Vec<PlantInfo>,
    comparison: ComparisonSelection,
    show_rarity: bool,
    views: HashMap<String, CardViewState>,
    /// Batches started but not finished, including ones queued behind the gate
    pending_batches: usize,
    last_error: Option<String>,
}

impl PlantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plants(&self) -> &[PlantInfo] {
        &self.plants
    }

    pub fn comparison(&self) -> &ComparisonSelection {
        &self.comparison
    }

    pub fn show_rarity(&self) -> bool {
        self.show_rarity
    }

    pub fn is_loading(&self) -> bool {
        self.pending_batches > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mark a batch as started and clear the previous error
    pub fn begin_batch(&mut self) {
        self.pending_batches += 1;
        self.last_error = None;
    }

    /// Append the batch results; the last failure becomes the visible error
    pub fn finish_batch(&mut self, batch: IdentifyBatch) {
        if let Some(message) = batch.last_error() {
            self.last_error = Some(message.to_string());
        }
        self.plants.extend(batch.plants);

        // Stay in loading state while another batch is still queued
        self.pending_batches = self.pending_batches.saturating_sub(1);
    }

    fn ensure_known(&self, id: &str) -> Result<(), AppError> {
        if self.plants.iter().any(|p| p.id == id) {
            Ok(())
        } else {
            Err(AppError::UnknownPlant(id.to_string()))
        }
    }

    /// Returns whether the plant is selected afterwards
    pub fn toggle_compare(&mut self, id: &str) -> Result<bool, AppError> {
        self.ensure_known(id)?;
        Ok(self.comparison.toggle(id))
    }

    pub fn toggle_show_rarity(&mut self) -> bool {
        self.show_rarity = !self.show_rarity;
        self.show_rarity
    }

    pub fn toggle_expanded(&mut self, id: &str) -> Result<bool, AppError> {
        self.ensure_known(id)?;
        let view = self.views.entry(id.to_string()).or_default();
        view.expanded = !view.expanded;
        Ok(view.expanded)
    }

    pub fn toggle_care(&mut self, id: &str) -> Result<bool, AppError> {
        self.ensure_known(id)?;
        let view = self.views.entry(id.to_string()).or_default();
        view.show_care = !view.show_care;
        Ok(view.show_care)
    }

    pub fn cards(&self) -> Vec<PlantCard> {
        self.plants
            .iter()
            .map(|p| {
                let view = self.views.get(&p.id).copied().unwrap_or_default();
                build_card(p, view, self.comparison.contains(&p.id), self.show_rarity)
            })
            .collect()
    }

    pub fn comparison_rows(&self) -> Vec<CompareRow> {
        self.comparison.compare_rows(&self.plants, self.show_rarity)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            cards: self.cards(),
            comparison: self.comparison_rows(),
            show_rarity: self.show_rarity,
            loading: self.is_loading(),
            error: self.last_error.clone(),
        }
    }
}
