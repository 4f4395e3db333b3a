//! State classification: pain + tension → [`Status`] and the collapse decision.
//!
//! Status is a pure function of the freshly computed scalars. There are no transitions
//! and no memory between calls; the caller supplies the full scar set every time.

use serde::Serialize;

use super::potential::scar_potential;
use super::tension::tension;
use super::types::{NeuralState, Scar, Status};
use super::vectorize::vectorize;
use super::Result;

/// Policy constants for [`classify_with`]. [`Default`] holds the reference values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Tension strictly above this is [`Status::Critical`].
    pub critical_tension: f64,
    /// Pain strictly above this is [`Status::Pain`].
    pub pain_threshold: f64,
    /// Tension strictly above this is [`Status::Alert`].
    pub alert_tension: f64,
    /// Multiplier on tension in the residue.
    pub tension_weight: f64,
    /// Divisor on pain in the residue.
    pub pain_divisor: f64,
    /// Residue strictly above this triggers a collapse.
    pub collapse_limit: f64,
}

impl Thresholds {
    pub const CRITICAL_TENSION: f64 = 0.75;
    pub const PAIN_THRESHOLD: f64 = 5.0;
    pub const ALERT_TENSION: f64 = 0.4;
    pub const TENSION_WEIGHT: f64 = 2.0;
    pub const PAIN_DIVISOR: f64 = 5.0;
    pub const COLLAPSE_LIMIT: f64 = 20.0;

    /// Weighted pressure used only for the collapse decision.
    pub fn residue(&self, tension: f64, pain: f64) -> f64 {
        self.tension_weight * tension + pain / self.pain_divisor
    }

    /// First match wins: critical tension, then pain, then alert tension.
    pub fn status(&self, tension: f64, pain: f64) -> Status {
        if tension > self.critical_tension {
            Status::Critical
        } else if pain > self.pain_threshold {
            Status::Pain
        } else if tension > self.alert_tension {
            Status::Alert
        } else {
            Status::Relaxed
        }
    }

    pub fn should_reset(&self, residue: f64) -> bool {
        residue > self.collapse_limit
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_tension: Self::CRITICAL_TENSION,
            pain_threshold: Self::PAIN_THRESHOLD,
            alert_tension: Self::ALERT_TENSION,
            tension_weight: Self::TENSION_WEIGHT,
            pain_divisor: Self::PAIN_DIVISOR,
            collapse_limit: Self::COLLAPSE_LIMIT,
        }
    }
}

/// Result of classifying one stimulus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub pain: f64,
    pub tension: f64,
    pub residue: f64,
    pub status: Status,
    /// Caller should drop conversational history for this turn.
    pub should_reset: bool,
    /// The stimulus vector, kept so callers can persist it as a scar without
    /// re-vectorizing.
    #[serde(skip)]
    pub vector: Vec<f64>,
}

impl Classification {
    pub fn state(&self) -> NeuralState {
        NeuralState {
            tension: self.tension,
            pain: self.pain,
            status: self.status,
        }
    }

    /// Hidden status line prepended to the stimulus for the text generator.
    pub fn prompt_header(&self) -> String {
        let tension_pct = (self.tension * 100.0).round() as i64;
        let pain_pct = (self.pain * 10.0).round() as i64;
        format!("[STATE: Tension={tension_pct}%, Pain={pain_pct}%]")
    }
}

/// Classify a pre-computed vector with the reference [`Thresholds`].
pub fn classify(current: &[f64], identity: &[f64], scars: &[Scar]) -> Result<Classification> {
    classify_with(current, identity, scars, &Thresholds::default())
}

pub fn classify_with(
    current: &[f64],
    identity: &[f64],
    scars: &[Scar],
    thresholds: &Thresholds,
) -> Result<Classification> {
    let pain = scar_potential(current, scars)?;
    let tension = tension(current, identity)?;
    let residue = thresholds.residue(tension, pain);

    Ok(Classification {
        pain,
        tension,
        residue,
        status: thresholds.status(tension, pain),
        should_reset: thresholds.should_reset(residue),
        vector: current.to_vec(),
    })
}

/// Vectorize `text` and classify it. The engine's single entry point for callers that
/// start from raw text.
pub fn process_stimulus(
    text: &str,
    identity: &[f64],
    scars: &[Scar],
    thresholds: &Thresholds,
) -> Result<Classification> {
    let current = vectorize(text);
    classify_with(&current, identity, scars, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DIMENSIONS;

    fn scar(vector: Vec<f64>, depth: f64) -> Scar {
        Scar {
            id: "s".into(),
            simulation_id: "sim".into(),
            vector,
            depth,
            created_at: "2026-01-01T00:00:00Z".into(),
            description: String::new(),
        }
    }

    fn basis(values: &[f64]) -> Vec<f64> {
        let mut v = vec![0.0; DIMENSIONS];
        v[..values.len()].copy_from_slice(values);
        v
    }

    #[test]
    fn status_priority_order() {
        let t = Thresholds::default();
        assert_eq!(t.status(0.8, 10.0), Status::Critical);
        assert_eq!(t.status(0.5, 10.0), Status::Pain);
        assert_eq!(t.status(0.5, 1.0), Status::Alert);
        assert_eq!(t.status(0.1, 1.0), Status::Relaxed);
    }

    #[test]
    fn thresholds_are_strict() {
        let t = Thresholds::default();
        assert_ne!(t.status(0.75, 0.0), Status::Critical);
        assert_eq!(t.status(0.7500001, 0.0), Status::Critical);
        assert_eq!(t.status(0.4, 5.0), Status::Relaxed);
        assert!(!t.should_reset(20.0));
        assert!(t.should_reset(20.000001));
    }

    #[test]
    fn residue_weights() {
        let t = Thresholds::default();
        assert!((t.residue(0.5, 10.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn critical_beats_pain_on_engineered_vectors() {
        // cos = -0.6 against identity e0 -> tension 0.8
        let identity = basis(&[1.0]);
        let current = basis(&[-0.6, 0.8]);
        // depth 0.1 at distance 0 -> pain 10
        let scars = [scar(current.clone(), 0.1)];

        let c = classify(&current, &identity, &scars).unwrap();
        assert!((c.tension - 0.8).abs() < 1e-9);
        assert!((c.pain - 10.0).abs() < 1e-9);
        assert_eq!(c.status, Status::Critical);
    }

    #[test]
    fn identical_identity_is_relaxed() {
        let identity = vectorize("calm and stable");
        let c = process_stimulus("calm and stable", &identity, &[], &Thresholds::default())
            .unwrap();
        assert!(c.tension.abs() < 1e-12);
        assert_eq!(c.pain, 0.0);
        assert_eq!(c.status, Status::Relaxed);
        assert!(!c.should_reset);
    }

    #[test]
    fn exact_scar_hit_collapses() {
        let identity = vectorize("calm and stable");
        let current = vectorize("you are worthless");
        let c = classify(&current, &identity, &[scar(current.clone(), 2.0)]).unwrap();
        assert!((c.pain - 200.0).abs() < 1e-9);
        assert!(matches!(c.status, Status::Pain | Status::Critical));
        assert!(c.residue > 40.0);
        assert!(c.should_reset);
    }

    #[test]
    fn opposed_identity_is_critical() {
        let current = vectorize("hello world");
        let identity: Vec<f64> = current.iter().map(|x| -x).collect();
        let c = classify(&current, &identity, &[]).unwrap();
        assert!((c.tension - 1.0).abs() < 1e-9);
        assert_eq!(c.status, Status::Critical);
        assert!(!c.should_reset);
    }

    #[test]
    fn custom_thresholds_change_policy() {
        let identity = vectorize("calm and stable");
        let strict = Thresholds {
            collapse_limit: 0.0,
            ..Thresholds::default()
        };
        let c = process_stimulus("something else entirely", &identity, &[], &strict).unwrap();
        assert!(c.should_reset);
    }

    #[test]
    fn dimension_mismatch_propagates() {
        let identity = vec![1.0; 3];
        assert!(process_stimulus("hi", &identity, &[], &Thresholds::default()).is_err());
    }

    #[test]
    fn prompt_header_rounds_percentages() {
        let c = Classification {
            pain: 1.26,
            tension: 0.346,
            residue: 0.0,
            status: Status::Relaxed,
            should_reset: false,
            vector: vec![],
        };
        assert_eq!(c.prompt_header(), "[STATE: Tension=35%, Pain=13%]");
    }

    #[test]
    fn state_snapshot_copies_scalars() {
        let identity = vectorize("calm");
        let c = process_stimulus("storm", &identity, &[], &Thresholds::default()).unwrap();
        let state = c.state();
        assert_eq!(state.tension, c.tension);
        assert_eq!(state.pain, c.pain);
        assert_eq!(state.status, c.status);
        assert_eq!(c.vector, vectorize("storm"));
    }
}
