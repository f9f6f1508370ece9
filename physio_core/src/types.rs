//! Core value types for the PhysioHub formula engine.
//!
//! This module defines the immutable values passed across the engine
//! boundary:
//! - Organ systems and parameter ranges (slider bounds)
//! - Pressure-volume loop coordinates
//! - Sampled curve points

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Organ Systems
// ============================================================================

/// Organ system a formula or parameter belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OrganSystem {
    Renal,
    Cardiac,
    Respiratory,
}

impl OrganSystem {
    /// All organ systems, in display order
    pub const ALL: [OrganSystem; 3] = [
        OrganSystem::Renal,
        OrganSystem::Cardiac,
        OrganSystem::Respiratory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganSystem::Renal => "renal",
            OrganSystem::Cardiac => "cardiac",
            OrganSystem::Respiratory => "respiratory",
        }
    }
}

impl fmt::Display for OrganSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganSystem {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "renal" | "kidney" => Ok(OrganSystem::Renal),
            "cardiac" | "heart" => Ok(OrganSystem::Cardiac),
            "respiratory" | "lung" => Ok(OrganSystem::Respiratory),
            other => Err(crate::Error::UnknownParameter(format!(
                "organ system '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Valid slider range and reference value for a physiological quantity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub normal: f64,
    pub unit: String,
}

/// A named quantity with its current value
///
/// Carrying a value outside `range` is allowed; the engine computes
/// through out-of-range inputs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub range: ParameterRange,
}

/// Parameter ranges for one organ system, keyed by snake_case name
pub type SystemRanges = BTreeMap<String, ParameterRange>;

// ============================================================================
// Formula Results
// ============================================================================

/// One vertex of a pressure-volume loop
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PvPoint {
    /// Ventricular volume (mL)
    pub volume: f64,
    /// Ventricular pressure (mmHg)
    pub pressure: f64,
}

/// The five canonical vertices of a pressure-volume loop, in cycle order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PvLoop {
    pub end_diastole: PvPoint,
    pub isovolumetric_contraction: PvPoint,
    pub ejection_start: PvPoint,
    pub end_systole: PvPoint,
    pub isovolumetric_relaxation: PvPoint,
}

/// A sampled (x, y) point on a formula curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}
