//! Simulation records: create, upsert, read, list, touch, and cascade delete.

use anyhow::{anyhow, bail, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::types::Simulation;
use super::{now_timestamp, vector_from_blob, vector_to_blob};
use crate::engine::vectorize;

const SELECT_COLUMNS: &str =
    "SELECT id, name, identity, custom_instructions, created_at, last_active FROM simulations";

/// Result returned from [`delete_simulation`].
#[derive(Debug, Serialize)]
pub struct DeleteSimulationResult {
    pub id: String,
    pub scars_removed: u64,
    pub messages_removed: u64,
}

/// Create a simulation whose identity anchor is `vectorize(seed)`.
pub fn create_simulation(
    conn: &Connection,
    name: &str,
    seed: &str,
    custom_instructions: Option<&str>,
) -> Result<Simulation> {
    let now = now_timestamp();
    let simulation = Simulation {
        id: uuid::Uuid::now_v7().to_string(),
        name: name.to_string(),
        identity_vector: vectorize(seed),
        custom_instructions: custom_instructions.map(str::to_string),
        created_at: now.clone(),
        last_active: now,
    };
    save_simulation(conn, &simulation)?;

    tracing::info!(id = %simulation.id, name = %simulation.name, "simulation created");
    Ok(simulation)
}

/// Insert or update a simulation.
///
/// On conflict the name, custom instructions, and last-active time are replaced. The
/// identity vector and creation time are kept from the original row.
pub fn save_simulation(conn: &Connection, simulation: &Simulation) -> Result<()> {
    conn.execute(
        "INSERT INTO simulations (id, name, identity, custom_instructions, created_at, last_active) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(id) DO UPDATE SET \
            name = excluded.name, \
            custom_instructions = excluded.custom_instructions, \
            last_active = excluded.last_active",
        params![
            simulation.id,
            simulation.name,
            vector_to_blob(&simulation.identity_vector),
            simulation.custom_instructions,
            simulation.created_at,
            simulation.last_active,
        ],
    )?;
    Ok(())
}

/// Fetch one simulation by ID.
pub fn get_simulation(conn: &Connection, id: &str) -> Result<Simulation> {
    let raw = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            RawSimulation::from_row,
        )
        .optional()?
        .ok_or_else(|| anyhow!("simulation not found: {id}"))?;
    raw.decode()
}

/// All simulations, most recently active first.
pub fn list_simulations(conn: &Connection) -> Result<Vec<Simulation>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY last_active DESC, rowid DESC"))?;
    let rows = stmt
        .query_map([], RawSimulation::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(RawSimulation::decode).collect()
}

/// Bump `last_active` to now.
pub fn touch_simulation(conn: &Connection, id: &str) -> Result<()> {
    let rows = conn.execute(
        "UPDATE simulations SET last_active = ?1 WHERE id = ?2",
        params![now_timestamp(), id],
    )?;
    if rows == 0 {
        bail!("simulation not found: {id}");
    }
    Ok(())
}

/// Delete a simulation. Its scars and messages go with it via `ON DELETE CASCADE`.
pub fn delete_simulation(conn: &mut Connection, id: &str) -> Result<DeleteSimulationResult> {
    let tx = conn.transaction()?;

    let scars: i64 = tx.query_row(
        "SELECT COUNT(*) FROM scars WHERE simulation_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    let messages: i64 = tx.query_row(
        "SELECT COUNT(*) FROM messages WHERE simulation_id = ?1",
        params![id],
        |row| row.get(0),
    )?;

    let rows = tx.execute("DELETE FROM simulations WHERE id = ?1", params![id])?;
    if rows == 0 {
        bail!("simulation not found: {id}");
    }
    tx.commit()?;

    tracing::info!(id, scars, messages, "simulation deleted");
    Ok(DeleteSimulationResult {
        id: id.to_string(),
        scars_removed: scars as u64,
        messages_removed: messages as u64,
    })
}

/// Row as read from SQLite, before the identity blob is decoded.
struct RawSimulation {
    id: String,
    name: String,
    identity: Vec<u8>,
    custom_instructions: Option<String>,
    created_at: String,
    last_active: String,
}

impl RawSimulation {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            identity: row.get(2)?,
            custom_instructions: row.get(3)?,
            created_at: row.get(4)?,
            last_active: row.get(5)?,
        })
    }

    fn decode(self) -> Result<Simulation> {
        let identity_vector = vector_from_blob(&self.identity)
            .map_err(|e| anyhow!("simulation {}: {e}", self.id))?;
        Ok(Simulation {
            id: self.id,
            name: self.name,
            identity_vector,
            custom_instructions: self.custom_instructions,
            created_at: self.created_at,
            last_active: self.last_active,
        })
    }
}
