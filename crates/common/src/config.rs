//! Engine-wide defaults for edit operations and history.

use serde::{Deserialize, Serialize};

/// Default behaviour of the edit operations and the edit session.
///
/// Per-operation option structs in `cl-edit` start from these values, so a
/// host application can load one document and have every edit honour it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Remove transitions that sit on an insert, overwrite or slice point.
    /// When `false`, slicing through a transition is an error.
    pub remove_transitions: bool,
    /// Replace removed material with a gap instead of closing the hole.
    pub fill_removed: bool,
    /// Maximum number of undo steps kept by an edit session.
    pub max_history: usize,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            remove_transitions: true,
            fill_removed: true,
            max_history: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EditConfig::default();
        assert!(config.remove_transitions);
        assert!(config.fill_removed);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let config: EditConfig =
            serde_json::from_str(r#"{ "fill_removed": false }"#).expect("deserialize");
        assert!(!config.fill_removed);
        assert!(config.remove_transitions);
        assert_eq!(config.max_history, 100);
    }
}
