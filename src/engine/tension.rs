use super::metrics::cosine_similarity;
use super::Result;

/// Drift of `current` from `identity`, remapped from cosine `[-1, 1]` to `[0, 1]` and
/// inverted: aligned → 0, opposed → 1, unrelated (or zero) → 0.5.
pub fn tension(current: &[f64], identity: &[f64]) -> Result<f64> {
    let similarity = cosine_similarity(current, identity)?;
    Ok(1.0 - (similarity + 1.0) / 2.0)
}
