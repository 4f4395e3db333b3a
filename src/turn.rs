//! One chat turn, end to end.
//!
//! [`take_turn`] loads the simulation and its scars, classifies the stimulus, sends the
//! generation request, then writes back the reply, the state snapshot, and (when the
//! stimulus hurt enough) a new scar. [`probe`] runs only the classification.

use anyhow::{ensure, Result};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::{EngineConfig, MonolithConfig};
use crate::engine::{process_stimulus, Classification, NeuralState, Scar, Status};
use crate::generation::{build_request, TextGenerator};
use crate::ledger::types::{ChatMessage, Role};
use crate::ledger::{messages, scars, simulations};

/// Prefix stored on replies generated after a collapse.
pub const COLLAPSE_BANNER: &str = "[COLLAPSE EVENT DETECTED - REBIRTH INITIATED]";

/// What a completed turn produced.
#[derive(Debug, Serialize)]
pub struct TurnOutcome {
    pub reply: ChatMessage,
    pub state: NeuralState,
    pub collapsed: bool,
    /// Scar recorded by this turn, if any.
    pub scar: Option<Scar>,
}

/// Depth of the scar this classification leaves behind, or `None` if pain stayed at or
/// below the floor.
pub fn scar_depth(classification: &Classification, engine: &EngineConfig) -> Option<f64> {
    if classification.pain <= engine.scar_pain_floor {
        return None;
    }
    Some(if classification.status == Status::Critical {
        engine.critical_scar_depth
    } else {
        engine.normal_scar_depth
    })
}

/// Classify `stimulus` against a stored simulation without writing anything.
pub fn probe(
    conn: &Connection,
    engine: &EngineConfig,
    simulation_id: &str,
    stimulus: &str,
) -> Result<Classification> {
    let simulation = simulations::get_simulation(conn, simulation_id)?;
    let scar_set = scars::scars_for_simulation(conn, simulation_id, engine.scar_window)?;
    Ok(process_stimulus(
        stimulus,
        &simulation.identity_vector,
        &scar_set,
        &engine.thresholds(),
    )?)
}

/// Run one turn.
///
/// The user message is saved before generation. If generation fails no reply and no
/// scar are written. The writes after generation share one transaction.
pub async fn take_turn<G: TextGenerator>(
    conn: &Connection,
    generator: &G,
    config: &MonolithConfig,
    simulation_id: &str,
    stimulus: &str,
) -> Result<TurnOutcome> {
    ensure!(!stimulus.trim().is_empty(), "stimulus must not be empty");
    config.engine.validate()?;

    let simulation = simulations::get_simulation(conn, simulation_id)?;
    let history = messages::messages_for_simulation(conn, simulation_id)?;
    messages::save_message(conn, simulation_id, Role::User, stimulus, None)?;

    let scar_set = scars::scars_for_simulation(conn, simulation_id, config.engine.scar_window)?;
    let classification = process_stimulus(
        stimulus,
        &simulation.identity_vector,
        &scar_set,
        &config.engine.thresholds(),
    )?;

    tracing::info!(
        simulation = simulation_id,
        scars = scar_set.len(),
        pain = classification.pain,
        tension = classification.tension,
        residue = classification.residue,
        status = %classification.status,
        collapse = classification.should_reset,
        "stimulus classified"
    );

    let request = build_request(
        &classification,
        &history,
        stimulus,
        simulation.custom_instructions.as_deref(),
        &config.generation,
    );
    let text = generator.generate(&request).await?;

    let content = if classification.should_reset {
        tracing::warn!(simulation = simulation_id, "collapse: history dropped for this turn");
        format!("{COLLAPSE_BANNER}\n\n{text}")
    } else {
        text
    };
    let state = classification.state();

    // Post-generation writes commit as one unit.
    let tx = conn.unchecked_transaction()?;
    let scar = scar_depth(&classification, &config.engine)
        .map(|depth| scars::record_scar(&tx, simulation_id, &classification.vector, depth, stimulus))
        .transpose()?;
    let reply = messages::save_message(&tx, simulation_id, Role::Model, &content, Some(state))?;
    simulations::touch_simulation(&tx, simulation_id)?;
    tx.commit()?;

    Ok(TurnOutcome {
        reply,
        state,
        collapsed: classification.should_reset,
        scar,
    })
}
