//! Error types for edit operations.

use cl_common::{RationalTime, TimeRange};
use cl_timeline::{NodeId, TimelineError};
use thiserror::Error;

/// Errors raised by edit operations. `operation` names the edit that failed
/// (`"trim"`, `"fill"`, ...).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("edit {operation}: item {item} is not a child of composition")]
    NotAChildOf {
        operation: &'static str,
        item: NodeId,
    },

    #[error("edit {operation}: operation would result in negative duration")]
    NegativeDuration { operation: &'static str },

    #[error("edit fill: item at time {time} is not a gap")]
    NotAGap { time: RationalTime },

    #[error("edit {operation}: {name:?} is not an item")]
    NotAnItem {
        operation: &'static str,
        name: String,
    },

    #[error("edit {operation}: no item at time {time}")]
    InvalidTime {
        operation: &'static str,
        time: RationalTime,
    },

    #[error("edit {operation}: invalid range {range}")]
    InvalidRange {
        operation: &'static str,
        range: TimeRange,
    },

    #[error("edit {operation}: cannot cut through a transition at {time}")]
    CannotTrimTransition {
        operation: &'static str,
        time: RationalTime,
    },

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// Convenience Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_operation() {
        let err = EditError::NegativeDuration { operation: "trim" };
        assert!(err.to_string().contains("trim"));

        let err = EditError::InvalidTime {
            operation: "remove",
            time: RationalTime::new(12.0, 24.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("remove") && msg.contains("12@24"));
    }

    #[test]
    fn timeline_errors_convert() {
        let err: EditError = TimelineError::IndexOutOfRange { index: 3, len: 1 }.into();
        assert!(matches!(err, EditError::Timeline(_)));
    }
}
