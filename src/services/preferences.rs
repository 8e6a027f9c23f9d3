use crate::config::APP_NAME;
use crate::error::AppError;
use crate::models::preferences::Preferences;
use std::fs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

/// Reads and writes the persisted preferences file
pub struct PreferencesStore {
    dir: PathBuf,
    path: PathBuf,
}

impl PreferencesStore {
    /// Store under the platform config directory, created if missing
    pub fn new() -> Result<Self, AppError> {
        // Get platform-specific config directory
        let dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))?
            .join(APP_NAME);

        // Create directory if it doesn't exist
        fs::create_dir_all(&dir)?;
        Ok(Self::in_dir(dir))
    }

    /// Store rooted at an explicit directory. The directory is created on first save.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(PREFERENCES_FILE);
        Self { dir, path }
    }

    /// Load preferences; a missing file yields defaults
    pub fn load(&self) -> Result<Preferences, AppError> {
        // If file doesn't exist, return default
        if !self.exists() {
            return Ok(Preferences::default());
        }

        let content = fs::read_to_string(&self.path)?;

        // Parse JSON
        let prefs: Preferences = serde_json::from_str(&content)?;
        Ok(prefs)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), AppError> {
        // Ensure config directory exists
        fs::create_dir_all(&self.dir)?;

        // Pretty print for human readability
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)?;

        tracing::debug!(path = %self.path.display(), dark_mode = prefs.dark_mode, "Preferences saved");
        Ok(())
    }

    /// Flip dark mode, persist, and return the new value
    pub fn toggle_dark_mode(&self) -> Result<bool, AppError> {
        // A corrupt file is replaced rather than blocking the toggle
        let mut prefs = self.load_or_default();
        prefs.dark_mode = !prefs.dark_mode;
        self.save(&prefs)?;
        Ok(prefs.dark_mode)
    }

    /// Load, falling back to defaults on a corrupt file
    pub fn load_or_default(&self) -> Preferences {
        match self.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable preferences, using defaults");
                Preferences::default()
            }
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
