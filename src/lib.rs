#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::plant::{CareInstructions, ParsedPlantRecord, PlantInfo};
pub use services::parse_plant_info;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::plants::{
        get_comparison, get_session, identify_plants, init_identifier, init_session, list_plants,
        toggle_card_care, toggle_card_expanded, toggle_compare, toggle_show_rarity,
    };
    use commands::preferences::{
        get_dark_mode, get_preferences_path, init_preferences, toggle_dark_mode,
    };

    logging::init();
    tracing::info!("Plant Identifier starting v{}", config::APP_VERSION);

    let preferences = init_preferences().expect("Failed to initialize preferences store");
    let identifier = init_identifier().expect("Failed to initialize vision client");

    tauri::Builder::default()
        .manage(preferences)
        .manage(identifier)
        .manage(init_session())
        .invoke_handler(tauri::generate_handler![
            identify_plants,
            get_session,
            list_plants,
            get_comparison,
            toggle_compare,
            toggle_show_rarity,
            toggle_card_expanded,
            toggle_card_care,
            get_dark_mode,
            toggle_dark_mode,
            get_preferences_path
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
