//! Effects attached to items.

use serde::{Deserialize, Serialize};

/// An effect applied to an item. Only time effects change edit behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// An opaque effect identified by name (color, blur, ...).
    Generic { name: String, effect_name: String },
    /// Constant speed change. `time_scalar` 2.0 plays twice as fast.
    LinearTimeWarp { name: String, time_scalar: f64 },
}

impl Effect {
    /// A linear time warp. A zero scalar is treated as normal speed.
    pub fn linear_time_warp(name: impl Into<String>, time_scalar: f64) -> Self {
        let time_scalar = if time_scalar == 0.0 { 1.0 } else { time_scalar };
        Self::LinearTimeWarp {
            name: name.into(),
            time_scalar,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Generic { name, .. } | Self::LinearTimeWarp { name, .. } => name,
        }
    }

    /// Speed multiplier of a time effect, `None` for other effects.
    pub fn time_scalar(&self) -> Option<f64> {
        match self {
            Self::LinearTimeWarp { time_scalar, .. } => Some(*time_scalar),
            Self::Generic { .. } => None,
        }
    }
}
