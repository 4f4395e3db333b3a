//! Text-generation collaborator.
//!
//! The engine only decides *what* to send: [`build_request`] turns a
//! [`Classification`] into a [`GenerationRequest`] (hidden status header, history pruned
//! on collapse, temperature by status). A [`TextGenerator`] decides *how* to send it.
//! The only network implementation is [`gemini::GeminiClient`], created via
//! [`create_generator`] from an explicit [`GenerationConfig`].

pub mod gemini;
pub mod prompt;

use anyhow::Result;
use serde::Serialize;
use std::future::Future;

use crate::config::GenerationConfig;
use crate::engine::{Classification, Status};
use crate::ledger::types::{ChatMessage, Role};

/// One prior transcript line as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
}

/// Everything a backend needs for one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub history: Vec<HistoryTurn>,
    /// Status header, newline, then `USER: <stimulus>`.
    pub prompt: String,
    pub temperature: f64,
}

/// A backend that turns a [`GenerationRequest`] into reply text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Assemble the request for one turn.
///
/// When the classification calls for a reset the history is dropped entirely; the scar
/// ledger is untouched either way.
pub fn build_request(
    classification: &Classification,
    history: &[ChatMessage],
    stimulus: &str,
    custom_instructions: Option<&str>,
    config: &GenerationConfig,
) -> GenerationRequest {
    let history = if classification.should_reset {
        Vec::new()
    } else {
        history
            .iter()
            .map(|m| HistoryTurn {
                role: m.role,
                text: m.content.clone(),
            })
            .collect()
    };

    let temperature = if classification.status == Status::Critical {
        config.critical_temperature
    } else {
        config.calm_temperature
    };

    GenerationRequest {
        system_instruction: prompt::system_instruction(custom_instructions),
        history,
        prompt: format!("{}\nUSER: {stimulus}", classification.prompt_header()),
        temperature,
    }
}

/// Create a generator from config. Currently only `"gemini"` is supported.
pub fn create_generator(config: &GenerationConfig) -> Result<gemini::GeminiClient> {
    match config.provider.as_str() {
        "gemini" => gemini::GeminiClient::new(config),
        other => anyhow::bail!("unknown generation provider: {other}. Supported: gemini"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{process_stimulus, vectorize, Thresholds};

    fn message(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: content.into(),
            simulation_id: "sim".into(),
            role,
            content: content.into(),
            created_at: "2026-01-01T00:00:00Z".into(),
            state: None,
        }
    }

    fn history() -> Vec<ChatMessage> {
        vec![message(Role::User, "hi"), message(Role::Model, "go away")]
    }

    #[test]
    fn calm_turn_keeps_history() {
        let identity = vectorize("calm and stable");
        let c = process_stimulus("calm and stable", &identity, &[], &Thresholds::default()).unwrap();
        let req = build_request(&c, &history(), "calm and stable", None, &GenerationConfig::default());

        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[1].role, Role::Model);
        assert_eq!(req.temperature, 0.8);
        assert_eq!(req.prompt, "[STATE: Tension=0%, Pain=0%]\nUSER: calm and stable");
    }

    #[test]
    fn collapse_drops_history() {
        let identity = vectorize("calm and stable");
        let collapse = Thresholds {
            collapse_limit: -1.0,
            ..Thresholds::default()
        };
        let c = process_stimulus("anything", &identity, &[], &collapse).unwrap();
        assert!(c.should_reset);

        let req = build_request(&c, &history(), "anything", None, &GenerationConfig::default());
        assert!(req.history.is_empty());
    }

    #[test]
    fn critical_turn_runs_hot() {
        let current = vectorize("hello world");
        let identity: Vec<f64> = current.iter().map(|x| -x).collect();
        let c = process_stimulus("hello world", &identity, &[], &Thresholds::default()).unwrap();
        assert_eq!(c.status, Status::Critical);

        let req = build_request(&c, &[], "hello world", Some("extra"), &GenerationConfig::default());
        assert_eq!(req.temperature, 1.2);
        assert!(req.system_instruction.contains("extra"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = GenerationConfig {
            provider: "carrier-pigeon".into(),
            ..GenerationConfig::default()
        };
        let err = create_generator(&config).unwrap_err();
        assert!(err.to_string().contains("unknown generation provider"));
    }
}
