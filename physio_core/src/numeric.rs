//! Shared numeric utilities for the formula groups.
//!
//! Comparisons are written out explicitly rather than through
//! `f64::min`/`f64::max`, which swallow NaN. A NaN input must reach the
//! caller unchanged.

/// mmHg to kPa conversion factor
pub const KPA_PER_MMHG: f64 = 0.133322;

/// mL per L
pub const ML_PER_L: f64 = 1000.0;

/// Linear interpolation between `start` and `end`
///
/// `t` is not clamped, so values outside [0, 1] extrapolate.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Clamp `value` to [min, max]
///
/// Applies the lower bound first, then the upper one, so `max` wins when
/// `min > max`. NaN passes through.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    cap_at(floor_at(value, min), max)
}

/// Raise `value` to at least `floor`; NaN passes through
pub fn floor_at(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else {
        value
    }
}

/// Limit `value` to at most `ceiling`; NaN passes through
pub fn cap_at(value: f64, ceiling: f64) -> f64 {
    if value > ceiling {
        ceiling
    } else {
        value
    }
}

/// Round to `decimals` places for display
///
/// Ties round away from zero (`f64::round`).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn mmhg_to_kpa(mmhg: f64) -> f64 {
    mmhg * KPA_PER_MMHG
}

pub fn ml_to_l(ml: f64) -> f64 {
    ml / ML_PER_L
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(300.0, 1200.0, 0.0), 300.0);
        assert_eq!(lerp(300.0, 1200.0, 1.0), 1200.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0.9, 0.3, 0.8), 0.8);
        assert_eq!(clamp(0.1, 0.3, 0.8), 0.3);
        assert_eq!(clamp(0.5, 0.3, 0.8), 0.5);
    }

    #[test]
    fn test_clamp_inverted_bounds_returns_max() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp(-5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_handles_infinity_and_nan() {
        assert_eq!(clamp(f64::INFINITY, 0.3, 0.8), 0.8);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.3, 0.8), 0.3);
        assert!(clamp(f64::NAN, 0.3, 0.8).is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(99.72999999999999, 1), 99.7);
        assert_eq!(round_to(93.33333333333333, 2), 93.33);
        assert_eq!(round_to(4.9, 0), 5.0);
    }

    #[test]
    fn test_round_to_ties_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(mmhg_to_kpa(0.0), 0.0);
        assert!((mmhg_to_kpa(760.0) - 101.32472).abs() < 1e-9);
        assert_eq!(ml_to_l(7500.0), 7.5);
        assert_eq!(ml_to_l(500.0), 0.5);
    }
}
