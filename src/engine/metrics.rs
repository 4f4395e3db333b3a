//! Distance and similarity over equal-length vectors.

use super::{EngineError, Result};

fn check_dims(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Euclidean norm.
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Sum of squared element-wise differences.
pub fn distance_squared(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dims(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum())
}

/// Euclidean distance.
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    distance_squared(a, b).map(f64::sqrt)
}

/// Cosine similarity in `[-1, 1]`.
///
/// A zero-magnitude operand yields `0.0` rather than NaN, so a degenerate stimulus reads
/// as "unrelated" instead of silently failing every threshold comparison downstream.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dims(a, b)?;
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (mag_a * mag_b))
}
