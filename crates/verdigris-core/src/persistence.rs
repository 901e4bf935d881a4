use serde::{Deserialize, Serialize};

/// The persisted slice of a creature: exactly the stage and the wax flag,
/// under the host's fixed storage keys.
///
/// Timers and the AI-enabled flag are deliberately absent; they are
/// transient animation/derived state and reset to rest on reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(rename = "Oxidation")]
    pub oxidation: i32,
    #[serde(rename = "Waxed")]
    pub waxed: bool,
}
