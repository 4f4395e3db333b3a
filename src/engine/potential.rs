//! Scar potential ("pain"): inverse-square repulsion from every recorded scar.

use super::metrics::distance_squared;
use super::types::Scar;
use super::Result;

/// Softening term added to each squared distance so an exact hit stays finite.
pub const SCAR_EPSILON: f64 = 0.01;

/// Sum of `depth / (dist² + ε)` over all scars. Zero for an empty ledger.
pub fn scar_potential(current: &[f64], scars: &[Scar]) -> Result<f64> {
    scars.iter().try_fold(0.0, |total, scar| {
        let dist_sq = distance_squared(current, &scar.vector)?;
        Ok(total + scar.depth / (dist_sq + SCAR_EPSILON))
    })
}
