use crate::models::plant::{PlantInfo, UploadedImage};
use crate::services::comparison::CompareRow;
use crate::services::{GeminiClient, Identifier, PlantSession, SessionView};
use parking_lot::Mutex;
use tauri::State;

/// Session state (plants, comparison, view flags)
pub type SessionState = Mutex<PlantSession>;

/// Model client plus the gate that keeps batches sequential
pub type IdentifierState = Identifier<GeminiClient>;

pub fn init_session() -> SessionState {
    Mutex::new(PlantSession::new())
}

pub fn init_identifier() -> Result<IdentifierState, String> {
    let client = GeminiClient::from_env()?;
    if client.config().api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; identification requests will fail");
    }
    Ok(Identifier::new(client))
}

/// Identify uploaded images one after another and append the results
#[tauri::command]
pub async fn identify_plants(
    identifier: State<'_, IdentifierState>,
    session: State<'_, SessionState>,
    files: Vec<UploadedImage>,
) -> Result<SessionView, String> {
    tracing::info!(count = files.len(), "Identify request");
    // Counts as pending even while queued behind a running batch
    session.lock().begin_batch();

    // Lock is not held across the model requests
    let batch = identifier.run(&files).await;

    let mut session = session.lock();
    session.finish_batch(batch);
    Ok(session.view())
}

#[tauri::command]
pub fn get_session(session: State<SessionState>) -> SessionView {
    session.lock().view()
}

#[tauri::command]
pub fn list_plants(session: State<SessionState>) -> Vec<PlantInfo> {
    session.lock().plants().to_vec()
}

#[tauri::command]
pub fn get_comparison(session: State<SessionState>) -> Vec<CompareRow> {
    session.lock().comparison_rows()
}

#[tauri::command]
pub fn toggle_compare(session: State<SessionState>, id: String) -> Result<SessionView, String> {
    let mut session = session.lock();
    session.toggle_compare(&id)?;
    Ok(session.view())
}

#[tauri::command]
pub fn toggle_show_rarity(session: State<SessionState>) -> SessionView {
    let mut session = session.lock();
    session.toggle_show_rarity();
    session.view()
}

#[tauri::command]
pub fn toggle_card_expanded(session: State<SessionState>, id: String) -> Result<SessionView, String> {
    let mut session = session.lock();
    session.toggle_expanded(&id)?;
    Ok(session.view())
}

#[tauri::command]
pub fn toggle_card_care(session: State<SessionState>, id: String) -> Result<SessionView, String> {
    let mut session = session.lock();
    session.toggle_care(&id)?;
    Ok(session.view())
}
