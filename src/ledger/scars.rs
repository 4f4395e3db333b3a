//! Append-only scar ledger.
//!
//! Scars are written once and never updated. They disappear only when their simulation
//! is deleted.

use anyhow::{anyhow, ensure, Result};
use rusqlite::{params, Connection};

use super::{now_timestamp, vector_from_blob, vector_to_blob};
use crate::engine::Scar;

/// Maximum length of a scar description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// First [`DESCRIPTION_MAX_CHARS`] characters of `text`.
pub fn truncate_description(text: &str) -> String {
    text.chars().take(DESCRIPTION_MAX_CHARS).collect()
}

/// Append a scar to a simulation's ledger.
pub fn record_scar(
    conn: &Connection,
    simulation_id: &str,
    vector: &[f64],
    depth: f64,
    description: &str,
) -> Result<Scar> {
    ensure!(depth > 0.0, "scar depth must be positive, got {depth}");

    let scar = Scar {
        id: uuid::Uuid::now_v7().to_string(),
        simulation_id: simulation_id.to_string(),
        vector: vector.to_vec(),
        depth,
        created_at: now_timestamp(),
        description: truncate_description(description),
    };

    conn.execute(
        "INSERT INTO scars (id, simulation_id, vector, depth, description, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            scar.id,
            scar.simulation_id,
            vector_to_blob(&scar.vector),
            scar.depth,
            scar.description,
            scar.created_at,
        ],
    )?;

    tracing::info!(id = %scar.id, simulation = simulation_id, depth, "scar recorded");
    Ok(scar)
}

/// Scars of one simulation in creation order.
///
/// With `window = Some(n)` only the `n` most recent scars are returned.
pub fn scars_for_simulation(
    conn: &Connection,
    simulation_id: &str,
    window: Option<usize>,
) -> Result<Vec<Scar>> {
    // SQLite treats a negative LIMIT as unbounded.
    let limit = window.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

    let mut stmt = conn.prepare(
        "SELECT id, simulation_id, vector, depth, created_at, description FROM scars \
         WHERE simulation_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
    )?;

    let rows: Vec<(String, String, Vec<u8>, f64, String, String)> = stmt
        .query_map(params![simulation_id, limit], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut scars = rows
        .into_iter()
        .map(|(id, simulation_id, blob, depth, created_at, description)| -> Result<Scar> {
            let vector = vector_from_blob(&blob).map_err(|e| anyhow!("scar {id}: {e}"))?;
            Ok(Scar {
                id,
                simulation_id,
                vector,
                depth,
                created_at,
                description,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    scars.reverse();
    Ok(scars)
}
