pub mod plant;
pub mod preferences;
