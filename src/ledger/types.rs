//! Ledger record types.
//!
//! [`Simulation`] owns an identity anchor and a custom-instruction field;
//! [`ChatMessage`] is one transcript line, optionally carrying the [`NeuralState`]
//! computed for that turn. Scars live in [`crate::engine::Scar`].

use serde::{Deserialize, Serialize};

use crate::engine::NeuralState;

/// A simulation: one persona with its own identity vector, scars, and transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// UUID v7 primary key.
    pub id: String,
    pub name: String,
    /// Vectorized seed phrase. Fixed at creation.
    pub identity_vector: Vec<f64>,
    /// Extra persona instructions appended to the system prompt.
    pub custom_instructions: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 timestamp of the last completed turn.
    pub last_active: String,
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "model" => Ok(Self::Model),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub simulation_id: String,
    pub role: Role,
    pub content: String,
    /// ISO 8601 timestamp.
    pub created_at: String,
    /// State snapshot; set on model replies only.
    pub state: Option<NeuralState>,
}
