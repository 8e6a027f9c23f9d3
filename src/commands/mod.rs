pub mod plants;
pub mod preferences;
