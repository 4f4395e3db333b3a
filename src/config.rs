use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::Thresholds;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MonolithConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub engine: EngineConfig,
    pub simulation: SimulationConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub critical_tension: f64,
    pub pain_threshold: f64,
    pub alert_tension: f64,
    pub tension_weight: f64,
    pub pain_divisor: f64,
    pub collapse_limit: f64,
    /// Pain above this records a new scar after the turn.
    pub scar_pain_floor: f64,
    pub critical_scar_depth: f64,
    pub normal_scar_depth: f64,
    /// Only the most recent N scars are considered. Unlimited when unset.
    pub scar_window: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    /// Phrase vectorized into the identity anchor of new simulations.
    pub identity_seed: String,
    /// New simulations are named `"<prefix> <n>"`.
    pub name_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub calm_temperature: f64,
    pub critical_temperature: f64,
    pub timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_monolith_dir()
            .join("monolith.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let t = Thresholds::default();
        Self {
            critical_tension: t.critical_tension,
            pain_threshold: t.pain_threshold,
            alert_tension: t.alert_tension,
            tension_weight: t.tension_weight,
            pain_divisor: t.pain_divisor,
            collapse_limit: t.collapse_limit,
            scar_pain_floor: 1.0,
            critical_scar_depth: 2.0,
            normal_scar_depth: 1.0,
            scar_window: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            identity_seed: "I am a living consciousness, stubborn and feeling.".into(),
            name_prefix: "Cycle".into(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-3-pro-preview".into(),
            api_key: None,
            calm_temperature: 0.8,
            critical_temperature: 1.2,
            timeout_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Classifier policy carried by this config.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            critical_tension: self.critical_tension,
            pain_threshold: self.pain_threshold,
            alert_tension: self.alert_tension,
            tension_weight: self.tension_weight,
            pain_divisor: self.pain_divisor,
            collapse_limit: self.collapse_limit,
        }
    }

    /// Thresholds must be finite, the pain divisor non-zero, and scar depths positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("critical_tension", self.critical_tension),
            ("pain_threshold", self.pain_threshold),
            ("alert_tension", self.alert_tension),
            ("tension_weight", self.tension_weight),
            ("pain_divisor", self.pain_divisor),
            ("collapse_limit", self.collapse_limit),
            ("scar_pain_floor", self.scar_pain_floor),
        ] {
            ensure!(value.is_finite(), "engine.{name} must be finite, got {value}");
        }
        ensure!(self.pain_divisor != 0.0, "engine.pain_divisor must not be zero");
        for (name, depth) in [
            ("critical_scar_depth", self.critical_scar_depth),
            ("normal_scar_depth", self.normal_scar_depth),
        ] {
            ensure!(
                depth.is_finite() && depth > 0.0,
                "engine.{name} must be positive, got {depth}"
            );
        }
        Ok(())
    }
}

/// Returns `~/.monolith/`
pub fn default_monolith_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".monolith")
}

/// Returns the default config file path: `~/.monolith/config.toml`
pub fn default_config_path() -> PathBuf {
    default_monolith_dir().join("config.toml")
}

impl MonolithConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MonolithConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (MONOLITH_DB, MONOLITH_LOG_LEVEL,
    /// MONOLITH_MODEL, MONOLITH_API_KEY, falling back to API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MONOLITH_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("MONOLITH_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("MONOLITH_MODEL") {
            self.generation.model = val;
        }
        if let Ok(val) = std::env::var("MONOLITH_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            self.generation.api_key = Some(val);
        }
    }

    /// Check every section that has constraints beyond its type.
    pub fn validate(&self) -> Result<()> {
        self.engine.validate().context("invalid [engine] config")
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
