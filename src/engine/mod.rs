//! Deterministic affective-state engine.
//!
//! Turns a stimulus string into a [`DIMENSIONS`]-wide vector ([`vectorize`]), measures
//! repulsion from past scars ([`scar_potential`]) and drift from the identity anchor
//! ([`tension`]), and folds both into a [`Status`] plus a collapse decision
//! ([`classify`]). Everything here is pure and synchronous: no I/O, no configuration,
//! no interior state. Callers pass snapshots in and get plain values back.

pub mod classify;
pub mod metrics;
pub mod potential;
pub mod tension;
pub mod types;
pub mod vectorize;

pub use classify::{classify, classify_with, process_stimulus, Classification, Thresholds};
pub use metrics::{cosine_similarity, distance, distance_squared, magnitude};
pub use potential::{scar_potential, SCAR_EPSILON};
pub use tension::tension;
pub use types::{NeuralState, Scar, Status};
pub use vectorize::{vectorize, DIMENSIONS, VECTORIZER_ID};

use thiserror::Error;

/// Errors raised by the engine's metric functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Two vectors of unequal length were compared.
    #[error("vector dimension mismatch: left has {left} elements, right has {right}")]
    DimensionMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
