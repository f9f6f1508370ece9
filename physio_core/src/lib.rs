#![forbid(unsafe_code)]

//! Physiology formula engine for the PhysioHub teaching front-end.
//!
//! This crate provides:
//! - Renal, cardiac and respiratory formulas (pure, stateless)
//! - Shared numeric utilities (interpolation, clamping, rounding, units)
//! - The static parameter range table used to bound sliders
//! - Curve sampling for visualization
//! - Configuration and logging support for front-ends

pub mod types;
pub mod error;
pub mod numeric;
pub mod renal;
pub mod cardiac;
pub mod respiratory;
pub mod ranges;
pub mod curve;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use ranges::{range_table, RangeOverrides, RangeTable};
pub use config::Config;
