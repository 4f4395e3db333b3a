//! Schema versioning.
//!
//! `schema_meta` is a small key/value table. The `schema_version` key drives the upgrade
//! loop in [`run_migrations`]; the `vectorizer` key records which vectorizer wrote the
//! stored identity and scar vectors.

use rusqlite::{Connection, OptionalExtension};

use crate::engine::VECTORIZER_ID;

/// Version this build writes and expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const VERSION_KEY: &str = "schema_version";
const VECTORIZER_KEY: &str = "vectorizer";

fn read_meta(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row("SELECT value FROM schema_meta WHERE key = ?1", [key], |row| row.get(0))
        .optional()
}

fn write_meta(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO schema_meta (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

/// Stored schema version. A missing or unparsable value reads as 0.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    Ok(read_meta(conn, VERSION_KEY)?
        .and_then(|v| v.parse().ok())
        .unwrap_or(0))
}

/// Vectorizer recorded for this database, `None` before the v2 migration.
pub fn get_vectorizer(conn: &Connection) -> rusqlite::Result<Option<String>> {
    read_meta(conn, VECTORIZER_KEY)
}

/// Step the database up to [`CURRENT_SCHEMA_VERSION`], one transaction per version.
pub fn run_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    let start = get_schema_version(conn)?;
    if start >= CURRENT_SCHEMA_VERSION {
        tracing::debug!(schema_version = start, "schema up to date");
        return Ok(());
    }

    for next in (start + 1)..=CURRENT_SCHEMA_VERSION {
        tracing::info!(from = next - 1, to = next, "migrating schema");

        let tx = conn.transaction()?;
        match next {
            // Version 1 is the base DDL from `init_schema`.
            1 => {}
            2 => stamp_vectorizer(&tx)?,
            _ => unreachable!("no migration defined for schema version {next}"),
        }
        write_meta(&tx, VERSION_KEY, &next.to_string())?;
        tx.commit()?;
    }

    Ok(())
}

/// v2: databases created before the vectorizer was recorded get the current one.
fn stamp_vectorizer(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES (?1, ?2)",
        [VECTORIZER_KEY, VECTORIZER_ID],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::schema::init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn base_schema_is_version_one() {
        let conn = base_schema();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
        assert!(get_vectorizer(&conn).unwrap().is_none());
    }

    #[test]
    fn upgrade_stamps_vectorizer() {
        let mut conn = base_schema();
        run_migrations(&mut conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        assert_eq!(get_vectorizer(&conn).unwrap().as_deref(), Some(VECTORIZER_ID));
    }

    #[test]
    fn rerun_is_a_no_op() {
        let mut conn = base_schema();
        run_migrations(&mut conn).unwrap();
        write_meta(&conn, VECTORIZER_KEY, "char-bag-256-v2").unwrap();

        run_migrations(&mut conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        assert_eq!(get_vectorizer(&conn).unwrap().as_deref(), Some("char-bag-256-v2"));
    }

    #[test]
    fn garbage_version_reads_as_zero() {
        let conn = base_schema();
        write_meta(&conn, VERSION_KEY, "not-a-number").unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }
}
