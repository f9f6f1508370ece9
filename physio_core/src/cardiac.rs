//! Cardiac physiology formulas.
//!
//! - Stroke volume (Frank-Starling with contractility and afterload)
//! - Cardiac output and mean arterial pressure
//! - Pressure-volume loop vertices
//!
//! The ejection fraction is the one bounded quantity here: whatever the
//! contractility and afterload, the ventricle ejects between 30% and 80%
//! of its end-diastolic volume.
//!
//! References:
//! - Mohrman & Heller, Cardiovascular Physiology, 9th Ed.

use crate::numeric::{clamp, ml_to_l};
use crate::{PvLoop, PvPoint};

/// Resting ejection fraction at normal contractility and afterload
pub const BASE_EJECTION_FRACTION: f64 = 0.6;

/// Lowest ejection fraction the model reports
pub const MIN_EJECTION_FRACTION: f64 = 0.3;

/// Highest ejection fraction the model reports
pub const MAX_EJECTION_FRACTION: f64 = 0.8;

/// Contractility expressed as percent of normal
pub const NORMAL_CONTRACTILITY_PCT: f64 = 100.0;

/// Normal afterload (mmHg)
pub const NORMAL_AFTERLOAD_MMHG: f64 = 100.0;

/// Normal end-diastolic pressure (mmHg)
pub const END_DIASTOLIC_PRESSURE_MMHG: f64 = 8.0;

/// Normal end-systolic pressure (mmHg)
pub const END_SYSTOLIC_PRESSURE_MMHG: f64 = 120.0;

/// Ventricular pressure at which the aortic valve opens (mmHg)
pub const AORTIC_OPENING_PRESSURE_MMHG: f64 = 80.0;

/// Ejection fraction after contractility and afterload scaling, in [0.3, 0.8]
///
/// Zero contractility combined with zero afterload gives 0 × ∞ = NaN,
/// which is not clamped.
pub fn ejection_fraction(contractility: f64, afterload: f64) -> f64 {
    let contractility_factor = contractility / NORMAL_CONTRACTILITY_PCT;
    let afterload_factor = NORMAL_AFTERLOAD_MMHG / afterload;
    clamp(
        BASE_EJECTION_FRACTION * contractility_factor * afterload_factor,
        MIN_EJECTION_FRACTION,
        MAX_EJECTION_FRACTION,
    )
}

/// Stroke volume (mL)
///
/// # Arguments
/// * `edv` - End-diastolic volume (mL), normal 120
/// * `contractility` - Percent of normal, 100 = normal
/// * `afterload` - Arterial pressure opposing ejection (mmHg), normal 100
pub fn stroke_volume(edv: f64, contractility: f64, afterload: f64) -> f64 {
    edv * ejection_fraction(contractility, afterload)
}

/// Cardiac output (L/min) from stroke volume (mL) and heart rate (bpm)
pub fn cardiac_output(stroke_volume: f64, heart_rate: f64) -> f64 {
    ml_to_l(stroke_volume * heart_rate)
}

/// Mean arterial pressure (mmHg)
///
/// Diastole takes about two thirds of the cycle, so MAP sits one third of
/// the pulse pressure above diastolic.
pub fn mean_arterial_pressure(systolic: f64, diastolic: f64) -> f64 {
    diastolic + (systolic - diastolic) / 3.0
}

/// Vertices of the pressure-volume loop for one cardiac cycle
///
/// Isovolumetric contraction rises at constant `edv` to the aortic
/// opening pressure; ejection starts from that same corner. Systole ends
/// at (`esv`, `esp`) and relaxation drops back to `edp` at `esv`.
pub fn pv_loop(edv: f64, esv: f64, edp: f64, esp: f64) -> PvLoop {
    PvLoop {
        end_diastole: PvPoint::new(edv, edp),
        isovolumetric_contraction: PvPoint::new(edv, AORTIC_OPENING_PRESSURE_MMHG),
        ejection_start: PvPoint::new(edv, AORTIC_OPENING_PRESSURE_MMHG),
        end_systole: PvPoint::new(esv, esp),
        isovolumetric_relaxation: PvPoint::new(esv, edp),
    }
}

impl PvPoint {
    pub fn new(volume: f64, pressure: f64) -> Self {
        Self { volume, pressure }
    }
}

impl PvLoop {
    /// Phase names, matching the order of [`PvLoop::points`]
    pub const PHASES: [&'static str; 5] = [
        "end_diastole",
        "isovolumetric_contraction",
        "ejection_start",
        "end_systole",
        "isovolumetric_relaxation",
    ];

    /// The five vertices in cycle order
    pub fn points(&self) -> [PvPoint; 5] {
        [
            self.end_diastole,
            self.isovolumetric_contraction,
            self.ejection_start,
            self.end_systole,
            self.isovolumetric_relaxation,
        ]
    }

    /// Closed polygon for rendering: the vertices followed by the first again
    pub fn polygon(&self) -> Vec<PvPoint> {
        let points = self.points();
        let mut polygon = Vec::with_capacity(points.len() + 1);
        polygon.extend_from_slice(&points);
        polygon.push(points[0]);
        polygon
    }

    /// Stroke volume implied by the loop width (mL)
    pub fn stroke_volume(&self) -> f64 {
        self.end_diastole.volume - self.end_systole.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_volume_normal() {
        assert_eq!(stroke_volume(120.0, 100.0, 100.0), 72.0);
    }

    #[test]
    fn test_ejection_fraction_upper_bound() {
        // 0.6 × 1.5 = 0.9 → 0.8
        assert_eq!(ejection_fraction(150.0, 100.0), MAX_EJECTION_FRACTION);
        assert_eq!(ejection_fraction(100.0, 1e-300), MAX_EJECTION_FRACTION);
        assert_eq!(ejection_fraction(100.0, 0.0), MAX_EJECTION_FRACTION);
    }

    #[test]
    fn test_ejection_fraction_lower_bound() {
        assert_eq!(ejection_fraction(0.0, 100.0), MIN_EJECTION_FRACTION);
        assert_eq!(ejection_fraction(-50.0, 100.0), MIN_EJECTION_FRACTION);
        assert_eq!(ejection_fraction(100.0, 1e300), MIN_EJECTION_FRACTION);
    }

    #[test]
    fn test_ejection_fraction_within_bounds_unchanged() {
        let ef = ejection_fraction(100.0, 150.0);
        assert!((ef - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_ejection_fraction_bounded_over_grid() {
        let values = [0.0, 1.0, 40.0, 100.0, 160.0, 1000.0, f64::INFINITY];
        for &contractility in &values {
            for &afterload in &values[1..] {
                let ef = stroke_volume(120.0, contractility, afterload) / 120.0;
                if ef.is_nan() {
                    continue;
                }
                assert!(
                    (MIN_EJECTION_FRACTION..=MAX_EJECTION_FRACTION).contains(&ef),
                    "EF {} for contractility {} afterload {}",
                    ef,
                    contractility,
                    afterload
                );
            }
        }
    }

    #[test]
    fn test_zero_contractility_and_afterload_is_nan() {
        assert!(ejection_fraction(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_cardiac_output() {
        assert_eq!(cardiac_output(70.0, 70.0), 4.9);
        assert_eq!(cardiac_output(0.0, 70.0), 0.0);
    }

    #[test]
    fn test_mean_arterial_pressure() {
        assert_eq!(mean_arterial_pressure(120.0, 80.0), 80.0 + 40.0 / 3.0);
        assert_eq!(mean_arterial_pressure(90.0, 90.0), 90.0);
    }

    #[test]
    fn test_pv_loop_order_and_values() {
        let pv = pv_loop(120.0, 50.0, 8.0, 120.0);
        let expected = [
            (120.0, 8.0),
            (120.0, 80.0),
            (120.0, 80.0),
            (50.0, 120.0),
            (50.0, 8.0),
        ];
        for (point, (v, p)) in pv.points().iter().zip(expected) {
            assert_eq!(point.volume, v);
            assert_eq!(point.pressure, p);
        }
    }

    #[test]
    fn test_pv_loop_polygon_is_closed() {
        let pv = pv_loop(120.0, 50.0, 8.0, 120.0);
        let polygon = pv.polygon();
        assert_eq!(polygon.len(), 6);
        assert_eq!(polygon[0], polygon[5]);
        assert_eq!(&polygon[..5], &pv.points()[..]);
    }

    #[test]
    fn test_pv_loop_stroke_volume() {
        assert_eq!(pv_loop(120.0, 50.0, 8.0, 120.0).stroke_volume(), 70.0);
    }

    #[test]
    fn test_pv_loop_serializes_named_phases() {
        let json = serde_json::to_value(pv_loop(120.0, 50.0, 8.0, 120.0)).unwrap();
        for phase in PvLoop::PHASES {
            assert!(json.get(phase).is_some(), "missing phase {}", phase);
        }
        assert_eq!(json["end_systole"]["volume"], 50.0);
        assert_eq!(json["end_systole"]["pressure"], 120.0);
    }
}
