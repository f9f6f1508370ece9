//! Renal physiology formulas.
//!
//! - Glomerular filtration rate (Starling forces)
//! - Medullary osmotic gradient (counter-current profile)
//! - Renal blood flow (pressure gradient over resistance)
//!
//! Only filtration is floored and only osmolarity is capped. Blood flow
//! is unbounded and a zero resistance yields infinity.
//!
//! References:
//! - Guyton and Hall, Textbook of Medical Physiology, 14th Ed., ch. 27-29

use crate::numeric::{cap_at, floor_at, lerp};

/// Normal Bowman's capsule hydrostatic pressure (mmHg)
pub const BOWMAN_PRESSURE_MMHG: f64 = 15.0;

/// Normal glomerular capillary oncotic pressure (mmHg)
pub const ONCOTIC_PRESSURE_MMHG: f64 = 30.0;

/// Normal filtration coefficient Kf (mL/min/mmHg)
pub const FILTRATION_COEFFICIENT: f64 = 12.5;

/// Filtration cannot run backwards
pub const MIN_GFR: f64 = 0.0;

/// Normal cortical interstitial osmolarity (mOsm/L)
pub const CORTICAL_OSMOLARITY: f64 = 300.0;

/// Osmolarity at the papillary tip, the ceiling of the gradient (mOsm/L)
pub const MAX_OSMOLARITY: f64 = 1200.0;

/// Total loop of Henle length (mm)
pub const LOOP_DEPTH_MM: f64 = 15.0;

/// Exponent shaping the cortex-to-papilla gradient
pub const GRADIENT_EXPONENT: f64 = 1.5;

/// Normal mean arterial pressure at the renal artery (mmHg)
pub const RENAL_ARTERIAL_PRESSURE_MMHG: f64 = 100.0;

/// Normal renal vein pressure (mmHg)
pub const RENAL_VENOUS_PRESSURE_MMHG: f64 = 4.0;

/// Normal total renal vascular resistance (mmHg·min/mL)
pub const RENAL_RESISTANCE: f64 = 0.08;

/// Net filtration pressure across the glomerular membrane (mmHg)
pub fn net_filtration_pressure(
    glomerular_pressure: f64,
    bowman_pressure: f64,
    oncotic_pressure: f64,
) -> f64 {
    glomerular_pressure - bowman_pressure - oncotic_pressure
}

/// Glomerular filtration rate (mL/min)
///
/// GFR = Kf × (P_gc − P_bs − π_gc), floored at zero.
///
/// # Arguments
/// * `glomerular_pressure` - Glomerular capillary pressure (mmHg), normal 55-60
/// * `bowman_pressure` - Bowman's capsule pressure (mmHg), normal 15
/// * `oncotic_pressure` - Plasma protein oncotic pressure (mmHg), normal 30
/// * `filtration_coefficient` - Kf (mL/min/mmHg), normal 12.5
pub fn gfr(
    glomerular_pressure: f64,
    bowman_pressure: f64,
    oncotic_pressure: f64,
    filtration_coefficient: f64,
) -> f64 {
    let net = net_filtration_pressure(glomerular_pressure, bowman_pressure, oncotic_pressure);
    floor_at(filtration_coefficient * net, MIN_GFR)
}

/// GFR with normal Bowman, oncotic and Kf values
pub fn gfr_at_normal(glomerular_pressure: f64) -> f64 {
    gfr(
        glomerular_pressure,
        BOWMAN_PRESSURE_MMHG,
        ONCOTIC_PRESSURE_MMHG,
        FILTRATION_COEFFICIENT,
    )
}

/// Interstitial osmolarity at `depth` mm into the medulla (mOsm/L)
///
/// Depth is normalized by `max_depth` and capped at 1, raised to 1.5 and
/// used to blend from `cortical_osmolarity` to 1200. The result never
/// exceeds 1200.
///
/// `depth` must be non-negative; a negative depth yields NaN.
pub fn medullary_osmolarity(cortical_osmolarity: f64, depth: f64, max_depth: f64) -> f64 {
    let normalized_depth = cap_at(depth / max_depth, 1.0);
    let osmolarity = lerp(
        cortical_osmolarity,
        MAX_OSMOLARITY,
        normalized_depth.powf(GRADIENT_EXPONENT),
    );
    cap_at(osmolarity, MAX_OSMOLARITY)
}

/// Renal blood flow (mL/min)
///
/// RBF = (P_artery − P_vein) / R. No bounds; R = 0 yields infinity.
pub fn renal_blood_flow(arterial_pressure: f64, venous_pressure: f64, resistance: f64) -> f64 {
    (arterial_pressure - venous_pressure) / resistance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gfr_normal_values() {
        assert_eq!(gfr_at_normal(55.0), 125.0);
        assert_eq!(gfr(60.0, 15.0, 30.0, 12.5), 187.5);
    }

    #[test]
    fn test_gfr_zero_at_balance_point() {
        assert_eq!(gfr_at_normal(45.0), 0.0);
    }

    #[test]
    fn test_gfr_never_negative() {
        for p in [-100.0, 0.0, 10.0, 30.0, 44.9] {
            assert_eq!(gfr_at_normal(p), 0.0, "glomerular pressure {}", p);
        }
        // Negative Kf flips the sign; still floored
        assert_eq!(gfr(60.0, 15.0, 30.0, -12.5), 0.0);
    }

    #[test]
    fn test_gfr_nan_passes_through() {
        assert!(gfr_at_normal(f64::NAN).is_nan());
    }

    #[test]
    fn test_net_filtration_pressure() {
        assert_eq!(net_filtration_pressure(55.0, 15.0, 30.0), 10.0);
        assert_eq!(net_filtration_pressure(30.0, 15.0, 30.0), -15.0);
    }

    #[test]
    fn test_osmolarity_at_cortex() {
        assert_eq!(medullary_osmolarity(300.0, 0.0, 15.0), 300.0);
        assert_eq!(medullary_osmolarity(280.0, 0.0, 15.0), 280.0);
    }

    #[test]
    fn test_osmolarity_at_and_beyond_tip() {
        assert_eq!(medullary_osmolarity(300.0, 15.0, 15.0), 1200.0);
        assert_eq!(medullary_osmolarity(300.0, 20.0, 15.0), 1200.0);
        assert_eq!(medullary_osmolarity(300.0, 1e6, 15.0), 1200.0);
    }

    #[test]
    fn test_osmolarity_capped_for_hypertonic_cortex() {
        // Cortical value above the papillary maximum blends downward
        // but never reports more than 1200
        assert_eq!(medullary_osmolarity(1500.0, 0.0, 15.0), 1200.0);
    }

    #[test]
    fn test_osmolarity_midpoint_below_linear_blend() {
        let mid = medullary_osmolarity(300.0, 7.5, 15.0);
        let linear = lerp(300.0, 1200.0, 0.5);
        assert!(mid > 300.0 && mid < linear, "mid-depth osmolarity {}", mid);
        assert!((mid - 618.198).abs() < 1e-3);
    }

    #[test]
    fn test_osmolarity_monotonic_with_depth() {
        let mut previous = medullary_osmolarity(300.0, 0.0, 15.0);
        for step in 1..=30 {
            let depth = step as f64 * 0.5;
            let value = medullary_osmolarity(300.0, depth, 15.0);
            assert!(value >= previous, "not monotonic at depth {}", depth);
            previous = value;
        }
    }

    #[test]
    fn test_osmolarity_negative_depth_is_nan() {
        assert!(medullary_osmolarity(300.0, -1.0, 15.0).is_nan());
    }

    #[test]
    fn test_renal_blood_flow_normal() {
        assert_eq!(
            renal_blood_flow(
                RENAL_ARTERIAL_PRESSURE_MMHG,
                RENAL_VENOUS_PRESSURE_MMHG,
                RENAL_RESISTANCE
            ),
            1200.0
        );
    }

    #[test]
    fn test_renal_blood_flow_unbounded() {
        assert!(renal_blood_flow(100.0, 4.0, 0.0).is_infinite());
        assert!(renal_blood_flow(4.0, 4.0, 0.0).is_nan());
        assert!(renal_blood_flow(0.0, 4.0, 0.08) < 0.0);
    }
}
