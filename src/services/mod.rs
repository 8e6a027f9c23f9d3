pub mod card;
pub mod color;
pub mod comparison;
pub mod identifier;
pub mod parser;
pub mod preferences;
pub mod vision;

// Re-export main types
pub use identifier::{identify_all, Identifier, PlantSession, SessionView};
pub use parser::parse_plant_info;
pub use preferences::PreferencesStore;
pub use vision::{GeminiClient, ImagePayload, VisionModel};
