//! Durable records around the engine: simulations, the scar ledger, and transcripts.
//!
//! Every function takes a plain `rusqlite::Connection`. Vectors are stored as
//! little-endian `f64` blobs; see [`vector_to_blob`] and [`vector_from_blob`].

pub mod messages;
pub mod scars;
pub mod simulations;
pub mod types;

use anyhow::{ensure, Result};

use crate::engine::DIMENSIONS;

const F64_BYTES: usize = std::mem::size_of::<f64>();

/// Encode a vector as little-endian `f64` bytes.
pub fn vector_to_blob(vector: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * F64_BYTES);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a stored vector, rejecting blobs that are not exactly [`DIMENSIONS`] wide.
pub fn vector_from_blob(blob: &[u8]) -> Result<Vec<f64>> {
    ensure!(
        blob.len() % F64_BYTES == 0,
        "vector blob length {} is not a multiple of {F64_BYTES}",
        blob.len()
    );
    let vector: Vec<f64> = blob
        .chunks_exact(F64_BYTES)
        .map(|chunk| {
            let mut buf = [0u8; F64_BYTES];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect();
    ensure!(
        vector.len() == DIMENSIONS,
        "stored vector has {} dimensions, expected {DIMENSIONS}",
        vector.len()
    );
    Ok(vector)
}

/// Current time as an RFC 3339 string with microsecond precision, so rows sort by text.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
