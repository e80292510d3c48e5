//! Error types for the composition tree model.

use thiserror::Error;

use crate::id::NodeId;

/// Errors raised by the composition tree model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("Child index {index} out of range for composition with {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Node {id} is not a child of this composition")]
    NotAChild { id: NodeId },

    #[error("Cannot compute available range of {name:?}")]
    CannotComputeAvailableRange { name: String },

    #[error("Clip {name:?} has no media reference")]
    MissingReference { name: String },
}

/// Convenience Result type for model operations.
pub type TimelineResult<T> = Result<T, TimelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = TimelineError::IndexOutOfRange { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7') && msg.contains('3'));

        let err = TimelineError::MissingReference {
            name: "shot_010".into(),
        };
        assert!(err.to_string().contains("shot_010"));

        let err = TimelineError::CannotComputeAvailableRange {
            name: "filler".into(),
        };
        assert!(err.to_string().contains("filler"));
    }
}
