//! Engine value types: [`Scar`], [`Status`], and the per-turn [`NeuralState`] snapshot.

use serde::{Deserialize, Serialize};

/// A recorded high-pain stimulus that repels similar future stimuli.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scar {
    /// UUID v7 primary key.
    pub id: String,
    /// Simulation this scar belongs to.
    pub simulation_id: String,
    /// Vector of the stimulus that caused it.
    pub vector: Vec<f64>,
    /// Severity multiplier: 1.0 normal, 2.0 when the turn was critical.
    pub depth: f64,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// First 50 characters of the stimulus.
    pub description: String,
}

/// Discrete state derived from tension and pain. Recomputed every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Relaxed,
    Alert,
    Pain,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relaxed => "RELAXED",
            Self::Alert => "ALERT",
            Self::Pain => "PAIN",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RELAXED" => Ok(Self::Relaxed),
            "ALERT" => Ok(Self::Alert),
            "PAIN" => Ok(Self::Pain),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(format!("unknown status: {s}")),
        }
    }
}

/// Scalar snapshot attached to the model message of the turn that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuralState {
    /// Drift from identity, `0..=1`.
    pub tension: f64,
    /// Scar repulsion, `>= 0`, unbounded.
    pub pain: f64,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Status::Relaxed, Status::Alert, Status::Pain, Status::Critical] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert!("calm".parse::<Status>().is_err());
    }

    #[test]
    fn neural_state_serializes_status_uppercase() {
        let state = NeuralState {
            tension: 0.5,
            pain: 1.25,
            status: Status::Critical,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["status"], "CRITICAL");
        assert_eq!(json["pain"], 1.25);
    }
}
