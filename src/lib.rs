//! Affective-state engine for persona chat simulations.
//!
//! Monolith turns each incoming stimulus into a 128-dimension character-bag vector and
//! measures it two ways:
//!
//! | Signal | Against | Meaning |
//! |--------|---------|---------|
//! | **Pain** | every recorded scar | inverse-square repulsion from past wounds |
//! | **Tension** | the simulation's identity vector | drift away from "self", `0..=1` |
//!
//! The two fold into a status (`RELAXED`, `ALERT`, `PAIN`, `CRITICAL`) and a collapse
//! decision that tells the caller to drop conversational history for the turn. Stimuli
//! that hurt enough are written back as new scars.
//!
//! # Architecture
//!
//! - **Engine**: pure, synchronous, configuration-free math
//! - **Storage**: SQLite for simulations, the append-only scar ledger, and transcripts
//! - **Generation**: one `generateContent` call per turn with a hidden status header
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization, schema, migrations, and health checks
//! - [`engine`]: Vectorizer, metrics, scar potential, tension, and the state classifier
//! - [`generation`]: Request assembly and the text-generation client
//! - [`ledger`]: Simulation, scar, and message records
//! - [`turn`]: One chat turn end to end

pub mod config;
pub mod db;
pub mod engine;
pub mod generation;
pub mod ledger;
pub mod turn;
