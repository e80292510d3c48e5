//! `cl-common` — Shared primitives for the Cutline edit engine.
//!
//! - **Time**: `RationalTime`, `TimeRange` and the `DEFAULT_EPSILON` used for
//!   boundary comparisons
//! - **Config**: `EditConfig`, the defaults every edit operation starts from

pub mod config;
pub mod time;

pub use config::EditConfig;
pub use time::{RationalTime, TimeRange, DEFAULT_EPSILON};
