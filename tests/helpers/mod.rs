#![allow(dead_code)]

use anyhow::Result;
use monolith::db;
use monolith::engine::DIMENSIONS;
use monolith::generation::{GenerationRequest, TextGenerator};
use monolith::ledger::simulations;
use monolith::ledger::types::Simulation;
use rusqlite::Connection;
use std::sync::Mutex;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Create a simulation anchored on `seed`.
pub fn test_simulation(conn: &Connection, seed: &str) -> Simulation {
    simulations::create_simulation(conn, "Cycle 1", seed, None).unwrap()
}

/// Unit vector along axis `i`.
pub fn axis(i: usize) -> Vec<f64> {
    let mut v = vec![0.0; DIMENSIONS];
    v[i % DIMENSIONS] = 1.0;
    v
}

/// Generator that replays a fixed reply (or fails) and records every request.
pub struct ScriptedGenerator {
    reply: Option<String>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("backend unavailable"),
        }
    }
}
