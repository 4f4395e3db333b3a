//! SQL DDL for all Monolith tables.
//!
//! Defines `simulations`, `scars`, `messages`, and `schema_meta`. Scars and messages
//! cascade with their simulation. All DDL uses `IF NOT EXISTS` for idempotent
//! initialization.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
-- One row per simulation; identity is a little-endian f64 blob
CREATE TABLE IF NOT EXISTS simulations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    identity BLOB NOT NULL,
    custom_instructions TEXT,
    created_at TEXT NOT NULL,
    last_active TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_simulations_last_active ON simulations(last_active);

-- Append-only scar ledger
CREATE TABLE IF NOT EXISTS scars (
    id TEXT PRIMARY KEY,
    simulation_id TEXT NOT NULL REFERENCES simulations(id) ON DELETE CASCADE,
    vector BLOB NOT NULL,
    depth REAL NOT NULL CHECK(depth > 0.0),
    description TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scars_simulation ON scars(simulation_id);

-- Chat transcript
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    simulation_id TEXT NOT NULL REFERENCES simulations(id) ON DELETE CASCADE,
    role TEXT NOT NULL CHECK(role IN ('user','model')),
    content TEXT NOT NULL,
    state TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_simulation ON messages(simulation_id);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
