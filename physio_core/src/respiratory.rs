//! Respiratory physiology formulas.
//!
//! Alveolar PO2 is deliberately left unbounded: a negative value is how
//! the model signals severe hypoxic or hypercapnic conditions. Saturation
//! keeps a cap at 100%.
//!
//! References:
//! - West's Respiratory Physiology, 10th Ed.

use crate::numeric::{cap_at, ml_to_l};

/// Inspired oxygen fraction of room air
pub const ROOM_AIR_FIO2: f64 = 0.21;

/// Barometric pressure at sea level (mmHg)
pub const SEA_LEVEL_PRESSURE_MMHG: f64 = 760.0;

/// Water vapor pressure at 37°C (mmHg)
pub const WATER_VAPOR_PRESSURE_MMHG: f64 = 47.0;

/// Normal arterial PCO2 (mmHg)
pub const NORMAL_PACO2_MMHG: f64 = 40.0;

/// Respiratory quotient on a mixed diet
pub const RESPIRATORY_QUOTIENT: f64 = 0.8;

/// PO2 at half saturation of hemoglobin (mmHg)
pub const P50_MMHG: f64 = 27.0;

/// Hill coefficient of oxyhemoglobin binding
pub const HILL_COEFFICIENT: f64 = 2.7;

/// Saturation ceiling (%)
pub const MAX_SATURATION_PCT: f64 = 100.0;

/// Alveolar oxygen partial pressure (mmHg), alveolar gas equation
///
/// PAO2 = FiO2 × (Pb − 47) − PaCO2 / R
///
/// # Arguments
/// * `fio2` - Fraction of inspired oxygen, 0.21 for room air
/// * `barometric_pressure` - Ambient pressure (mmHg), 760 at sea level
/// * `paco2` - Arterial CO2 pressure (mmHg), normal 40
/// * `respiratory_quotient` - R, typically 0.8
pub fn alveolar_o2(
    fio2: f64,
    barometric_pressure: f64,
    paco2: f64,
    respiratory_quotient: f64,
) -> f64 {
    fio2 * (barometric_pressure - WATER_VAPOR_PRESSURE_MMHG) - paco2 / respiratory_quotient
}

/// Minute ventilation (L/min) from tidal volume (mL) and rate (breaths/min)
pub fn minute_ventilation(tidal_volume: f64, respiratory_rate: f64) -> f64 {
    ml_to_l(tidal_volume * respiratory_rate)
}

/// Oxyhemoglobin saturation (%) at `po2` mmHg, Hill equation
///
/// S = 100 × PO2ⁿ / (P50ⁿ + PO2ⁿ), with P50 = 27 and n = 2.7.
/// Negative PO2 gives NaN, which the cap leaves untouched.
pub fn o2_saturation(po2: f64) -> f64 {
    let bound = po2.powf(HILL_COEFFICIENT);
    let saturation = MAX_SATURATION_PCT * (bound / (P50_MMHG.powf(HILL_COEFFICIENT) + bound));
    cap_at(saturation, MAX_SATURATION_PCT)
}
