//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use monolith::config::MonolithConfig;
use monolith::db;
use monolith::engine::VECTORIZER_ID;

pub fn doctor(config: &MonolithConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `monolith sim new` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Monolith Health Report");
    println!("======================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Vectorizer:");
    println!("  Stored:          {}", report.vectorizer.as_deref().unwrap_or("(not set)"));
    println!("  Built in:        {VECTORIZER_ID}");
    if let Some(ref stored) = report.vectorizer {
        if stored != VECTORIZER_ID {
            println!("  WARNING: stored vectors came from a different vectorizer.");
        } else {
            println!("  Status:          OK (match)");
        }
    }
    println!();
    println!("Row counts:");
    println!("  Simulations:     {}", report.simulation_count);
    println!("  Scars:           {}", report.scar_count);
    println!("  Messages:        {}", report.message_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
