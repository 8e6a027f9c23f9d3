use crate::services::PreferencesStore;
use std::sync::Mutex;
use tauri::State;

/// State wrapper for the preferences store
pub type PreferencesState = Mutex<PreferencesStore>;

pub fn init_preferences() -> Result<PreferencesState, String> {
    let store = PreferencesStore::new()?;
    Ok(Mutex::new(store))
}

#[tauri::command]
pub fn get_dark_mode(state: State<PreferencesState>) -> Result<bool, String> {
    let store = state
        .lock()
        .map_err(|e| format!("Failed to lock preferences: {}", e))?;

    Ok(store.load_or_default().dark_mode)
}

/// Flip and persist dark mode, returning the new value
#[tauri::command]
pub fn toggle_dark_mode(state: State<PreferencesState>) -> Result<bool, String> {
    let store = state
        .lock()
        .map_err(|e| format!("Failed to lock preferences: {}", e))?;

    Ok(store.toggle_dark_mode()?)
}

#[tauri::command]
pub fn get_preferences_path(state: State<PreferencesState>) -> Result<String, String> {
    let store = state
        .lock()
        .map_err(|e| format!("Failed to lock preferences: {}", e))?;

    Ok(store.file_path().to_string_lossy().into_owned())
}
