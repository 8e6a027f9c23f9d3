use serde::{Deserialize, Serialize};

/// Persisted user preferences
///
/// Only the theme survives restarts; everything else is session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}
