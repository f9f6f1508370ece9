//! Default parameter range table.
//!
//! Slider bounds and normal reference values per organ system. The engine
//! never enforces these; front-ends use them to bound inputs and to fill
//! in defaults.

use crate::numeric::clamp;
use crate::{Error, OrganSystem, Parameter, ParameterRange, Result, SystemRanges};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cached default range table - built once and shared
static DEFAULT_RANGES: Lazy<RangeTable> = Lazy::new(build_default_ranges);

/// Get a reference to the cached default range table
pub fn range_table() -> &'static RangeTable {
    &DEFAULT_RANGES
}

/// Per-system parameter ranges
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeTable {
    #[serde(default)]
    pub renal: SystemRanges,

    #[serde(default)]
    pub cardiac: SystemRanges,

    #[serde(default)]
    pub respiratory: SystemRanges,
}

/// Configured replacements for range table entries
pub type RangeOverrides = RangeTable;

fn range(min: f64, max: f64, normal: f64, unit: &str) -> ParameterRange {
    ParameterRange {
        min,
        max,
        normal,
        unit: unit.into(),
    }
}

/// Builds the default range table
pub fn build_default_ranges() -> RangeTable {
    let mut renal = BTreeMap::new();
    let mut cardiac = BTreeMap::new();
    let mut respiratory = BTreeMap::new();

    // ========================================================================
    // Renal
    // ========================================================================

    renal.insert("gfr".into(), range(30.0, 150.0, 100.0, "mL/min"));
    renal.insert("blood_flow".into(), range(400.0, 1600.0, 1200.0, "mL/min"));
    renal.insert("osmolarity".into(), range(300.0, 1200.0, 300.0, "mOsm/L"));
    renal.insert("loop_length".into(), range(0.0, 15.0, 10.0, "mm"));
    renal.insert("glomerular_pressure".into(), range(30.0, 90.0, 55.0, "mmHg"));
    renal.insert("arterial_pressure".into(), range(60.0, 180.0, 100.0, "mmHg"));

    // ========================================================================
    // Cardiac
    // ========================================================================

    cardiac.insert("heart_rate".into(), range(40.0, 180.0, 70.0, "bpm"));
    cardiac.insert("stroke_volume".into(), range(40.0, 120.0, 70.0, "mL"));
    cardiac.insert("contractility".into(), range(40.0, 160.0, 100.0, "%"));
    cardiac.insert("afterload".into(), range(60.0, 180.0, 100.0, "mmHg"));
    cardiac.insert("edv".into(), range(80.0, 160.0, 120.0, "mL"));
    cardiac.insert("esv".into(), range(30.0, 80.0, 50.0, "mL"));
    cardiac.insert("systolic".into(), range(80.0, 200.0, 120.0, "mmHg"));
    cardiac.insert("diastolic".into(), range(40.0, 120.0, 80.0, "mmHg"));

    // ========================================================================
    // Respiratory
    // ========================================================================

    respiratory.insert("respiratory_rate".into(), range(8.0, 30.0, 15.0, "breaths/min"));
    respiratory.insert("tidal_volume".into(), range(300.0, 800.0, 500.0, "mL"));
    respiratory.insert("fio2".into(), range(0.21, 1.0, 0.21, "fraction"));
    respiratory.insert("paco2".into(), range(20.0, 80.0, 40.0, "mmHg"));
    respiratory.insert("barometric_pressure".into(), range(400.0, 800.0, 760.0, "mmHg"));
    respiratory.insert("po2".into(), range(0.0, 150.0, 100.0, "mmHg"));

    RangeTable {
        renal,
        cardiac,
        respiratory,
    }
}

impl RangeTable {
    /// Ranges for one organ system
    pub fn system(&self, system: OrganSystem) -> &SystemRanges {
        match system {
            OrganSystem::Renal => &self.renal,
            OrganSystem::Cardiac => &self.cardiac,
            OrganSystem::Respiratory => &self.respiratory,
        }
    }

    fn system_mut(&mut self, system: OrganSystem) -> &mut SystemRanges {
        match system {
            OrganSystem::Renal => &mut self.renal,
            OrganSystem::Cardiac => &mut self.cardiac,
            OrganSystem::Respiratory => &mut self.respiratory,
        }
    }

    pub fn get(&self, system: OrganSystem, name: &str) -> Option<&ParameterRange> {
        self.system(system).get(name)
    }

    /// Look up a range, failing for unknown names
    pub fn require(&self, system: OrganSystem, name: &str) -> Result<&ParameterRange> {
        self.get(system, name)
            .ok_or_else(|| Error::UnknownParameter(format!("{}.{}", system, name)))
    }

    /// Normal value for a parameter, or `fallback` when the table has none
    pub fn normal_or(&self, system: OrganSystem, name: &str, fallback: f64) -> f64 {
        self.get(system, name).map(|r| r.normal).unwrap_or(fallback)
    }

    /// A copy of this table with `overrides` replacing or adding entries
    pub fn with_overrides(&self, overrides: &RangeOverrides) -> RangeTable {
        let mut table = self.clone();
        for system in OrganSystem::ALL {
            for (name, range) in overrides.system(system) {
                tracing::debug!("Overriding range {}.{}: {:?}", system, name, range);
                table.system_mut(system).insert(name.clone(), range.clone());
            }
        }
        table
    }

    /// Total number of entries across all systems
    pub fn len(&self) -> usize {
        OrganSystem::ALL
            .iter()
            .map(|s| self.system(*s).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate the table for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for system in OrganSystem::ALL {
            for (name, range) in self.system(system) {
                let key = format!("{}.{}", system, name);

                if name.is_empty() {
                    errors.push(format!("{} parameter has empty name", system));
                }
                if !(range.min.is_finite() && range.max.is_finite() && range.normal.is_finite()) {
                    errors.push(format!("Range '{}' has non-finite bounds", key));
                    continue;
                }
                if range.min > range.max {
                    errors.push(format!(
                        "Range '{}': min {} > max {}",
                        key, range.min, range.max
                    ));
                }
                if range.normal < range.min || range.normal > range.max {
                    errors.push(format!(
                        "Range '{}': normal {} outside [{}, {}]",
                        key, range.normal, range.min, range.max
                    ));
                }
                if range.unit.is_empty() {
                    errors.push(format!("Range '{}' has empty unit", key));
                }
            }
        }

        errors
    }
}

impl ParameterRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Bound a slider value into [min, max]
    pub fn bound(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    /// Position of `value` within the range (0 at min, 1 at max)
    ///
    /// Not clamped; a degenerate range (min == max) yields NaN or infinity.
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

impl Parameter {
    /// Parameter set to its normal reference value
    pub fn at_normal(name: impl Into<String>, range: ParameterRange) -> Self {
        Self {
            name: name.into(),
            value: range.normal,
            range,
        }
    }

    /// Same parameter with a new value; out-of-range values are kept as-is
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    pub fn is_in_range(&self) -> bool {
        self.range.contains(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_load() {
        let table = build_default_ranges();
        assert_eq!(table.renal.len(), 6);
        assert_eq!(table.cardiac.len(), 8);
        assert_eq!(table.respiratory.len(), 6);
        assert_eq!(table.len(), 20);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_default_ranges_validate() {
        let errors = range_table().validate();
        assert!(
            errors.is_empty(),
            "Default range table has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_lookup() {
        let table = range_table();
        let hr = table.get(OrganSystem::Cardiac, "heart_rate").unwrap();
        assert_eq!(hr.normal, 70.0);
        assert_eq!(hr.unit, "bpm");
        assert!(table.get(OrganSystem::Renal, "heart_rate").is_none());
        assert!(table.require(OrganSystem::Renal, "nope").is_err());
    }

    #[test]
    fn test_normal_or_fallback() {
        let table = range_table();
        assert_eq!(table.normal_or(OrganSystem::Respiratory, "fio2", 1.0), 0.21);
        assert_eq!(table.normal_or(OrganSystem::Respiratory, "missing", 0.8), 0.8);
    }

    #[test]
    fn test_validate_catches_bad_ranges() {
        let mut table = RangeTable::default();
        table.renal.insert("inverted".into(), range(10.0, 1.0, 5.0, "mmHg"));
        table.cardiac.insert("abnormal".into(), range(0.0, 10.0, 20.0, "mL"));
        table.respiratory.insert("unitless".into(), range(0.0, 1.0, 0.5, ""));
        table.respiratory.insert("infinite".into(), range(0.0, f64::INFINITY, 0.5, "mL"));

        let errors = table.validate();
        assert!(errors.iter().any(|e| e.contains("renal.inverted") && e.contains("min")));
        assert!(errors.iter().any(|e| e.contains("cardiac.abnormal") && e.contains("normal")));
        assert!(errors.iter().any(|e| e.contains("respiratory.unitless")));
        assert!(errors.iter().any(|e| e.contains("respiratory.infinite")));
    }

    #[test]
    fn test_with_overrides_replaces_and_adds() {
        let mut overrides = RangeOverrides::default();
        overrides
            .cardiac
            .insert("heart_rate".into(), range(30.0, 220.0, 60.0, "bpm"));
        overrides
            .renal
            .insert("kf".into(), range(5.0, 20.0, 12.5, "mL/min/mmHg"));

        let table = range_table().with_overrides(&overrides);
        assert_eq!(table.get(OrganSystem::Cardiac, "heart_rate").unwrap().normal, 60.0);
        assert_eq!(table.get(OrganSystem::Renal, "kf").unwrap().max, 20.0);
        assert_eq!(table.len(), range_table().len() + 1);
        // Shared default is untouched
        assert_eq!(range_table().get(OrganSystem::Cardiac, "heart_rate").unwrap().normal, 70.0);
    }

    #[test]
    fn test_range_bound_and_fraction() {
        let r = range(40.0, 180.0, 70.0, "bpm");
        assert_eq!(r.bound(200.0), 180.0);
        assert_eq!(r.bound(10.0), 40.0);
        assert_eq!(r.bound(70.0), 70.0);
        assert_eq!(r.fraction(40.0), 0.0);
        assert_eq!(r.fraction(180.0), 1.0);
        assert_eq!(r.fraction(110.0), 0.5);
        assert!(r.fraction(250.0) > 1.0);
    }

    #[test]
    fn test_parameter_range_membership() {
        let edv = Parameter::at_normal("edv", range(80.0, 160.0, 120.0, "mL"));
        assert_eq!(edv.value, 120.0);
        assert!(edv.is_in_range());

        let dilated = edv.with_value(220.0);
        assert_eq!(dilated.value, 220.0);
        assert!(!dilated.is_in_range());
        assert_eq!(dilated.range, edv.range);
    }
}
