//! Transcript storage.

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

use super::now_timestamp;
use super::types::{ChatMessage, Role};
use crate::engine::NeuralState;

/// Build and persist a message stamped with the current time.
pub fn save_message(
    conn: &Connection,
    simulation_id: &str,
    role: Role,
    content: &str,
    state: Option<NeuralState>,
) -> Result<ChatMessage> {
    let message = ChatMessage {
        id: uuid::Uuid::now_v7().to_string(),
        simulation_id: simulation_id.to_string(),
        role,
        content: content.to_string(),
        created_at: now_timestamp(),
        state,
    };
    let state_json = message.state.as_ref().map(serde_json::to_string).transpose()?;

    conn.execute(
        "INSERT INTO messages (id, simulation_id, role, content, state, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            message.id,
            message.simulation_id,
            message.role.as_str(),
            message.content,
            state_json,
            message.created_at,
        ],
    )?;

    tracing::debug!(id = %message.id, role = %role, "message saved");
    Ok(message)
}

/// Full transcript of a simulation, oldest first.
pub fn messages_for_simulation(conn: &Connection, simulation_id: &str) -> Result<Vec<ChatMessage>> {
    let mut stmt = conn.prepare(
        "SELECT id, simulation_id, role, content, state, created_at FROM messages \
         WHERE simulation_id = ?1 ORDER BY created_at, rowid",
    )?;

    let rows: Vec<(String, String, String, String, Option<String>, String)> = stmt
        .query_map(params![simulation_id], |row| {
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

    rows.into_iter()
        .map(|(id, simulation_id, role, content, state, created_at)| -> Result<ChatMessage> {
            let role = role.parse::<Role>().map_err(|e| anyhow!("message {id}: {e}"))?;
            let state = state
                .map(|s| serde_json::from_str::<NeuralState>(&s))
                .transpose()?;
            Ok(ChatMessage {
                id,
                simulation_id,
                role,
                content,
                created_at,
                state,
            })
        })
        .collect()
}
