//! Curve sampling for visualization.
//!
//! Samples single-variable formulas over an interval, e.g. the medullary
//! osmotic gradient along the loop of Henle or the oxyhemoglobin
//! dissociation curve, and writes them as CSV.

use crate::numeric::lerp;
use crate::{renal, respiratory, CurvePoint, Result};
use std::io::Write;

/// Sample `f` at `steps + 1` evenly spaced points from `from` to `to`
///
/// `steps == 0` yields the single point at `from`.
pub fn sample<F>(from: f64, to: f64, steps: usize, f: F) -> Vec<CurvePoint>
where
    F: Fn(f64) -> f64,
{
    if steps == 0 {
        return vec![CurvePoint { x: from, y: f(from) }];
    }

    (0..=steps)
        .map(|i| {
            let x = lerp(from, to, i as f64 / steps as f64);
            CurvePoint { x, y: f(x) }
        })
        .collect()
}

/// Osmolarity (mOsm/L) against depth (mm) from cortex to papilla
pub fn osmolarity_profile(
    cortical_osmolarity: f64,
    max_depth: f64,
    steps: usize,
) -> Vec<CurvePoint> {
    tracing::debug!(
        "Sampling osmolarity profile: cortical {} mOsm/L, depth {} mm, {} steps",
        cortical_osmolarity,
        max_depth,
        steps
    );
    sample(0.0, max_depth, steps, |depth| {
        renal::medullary_osmolarity(cortical_osmolarity, depth, max_depth)
    })
}

/// Saturation (%) against PO2 (mmHg) from 0 to `max_po2`
pub fn dissociation_curve(max_po2: f64, steps: usize) -> Vec<CurvePoint> {
    tracing::debug!(
        "Sampling dissociation curve up to {} mmHg, {} steps",
        max_po2,
        steps
    );
    sample(0.0, max_po2, steps, respiratory::o2_saturation)
}

/// Write points as CSV with a header naming both columns
pub fn write_csv<W: Write>(
    points: &[CurvePoint],
    x_label: &str,
    y_label: &str,
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([x_label, y_label])?;
    for point in points {
        csv_writer.write_record([point.x.to_string(), point.y.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
