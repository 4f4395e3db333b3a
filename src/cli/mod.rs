pub mod chat;
pub mod doctor;
pub mod probe;
pub mod scars;
pub mod simulation;

use anyhow::Result;
use rusqlite::Connection;

use monolith::config::MonolithConfig;
use monolith::db;
use monolith::engine::VECTORIZER_ID;

/// Open the configured database, warning when its stored vectors came from a different
/// vectorizer.
fn open(config: &MonolithConfig) -> Result<Connection> {
    let conn = db::open_database(config.resolved_db_path())?;
    if let Some(stored) = db::vectorizer_mismatch(&conn)? {
        tracing::warn!(
            stored = %stored,
            built_in = VECTORIZER_ID,
            "vectorizer changed: identity and scar vectors will not line up with new stimuli"
        );
    }
    Ok(conn)
}
