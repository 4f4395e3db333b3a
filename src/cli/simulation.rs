//! CLI `sim` commands: create, list, and delete simulations.

use anyhow::Result;

use monolith::config::MonolithConfig;
use monolith::ledger::simulations;

pub fn create(
    config: &MonolithConfig,
    name: Option<&str>,
    seed: Option<&str>,
    instructions: Option<&str>,
) -> Result<()> {
    let conn = super::open(config)?;

    let name = match name {
        Some(n) => n.to_string(),
        None => {
            let existing = simulations::list_simulations(&conn)?.len();
            format!("{} {}", config.simulation.name_prefix, existing + 1)
        }
    };
    let seed = seed.unwrap_or(&config.simulation.identity_seed);

    let sim = simulations::create_simulation(&conn, &name, seed, instructions)?;
    println!("Created simulation {} ({})", sim.name, sim.id);
    Ok(())
}

pub fn list(config: &MonolithConfig) -> Result<()> {
    let conn = super::open(config)?;
    let sims = simulations::list_simulations(&conn)?;

    if sims.is_empty() {
        println!("No simulations. Create one with `monolith sim new`.");
        return Ok(());
    }

    println!("{:<38} {:<20} {}", "ID", "NAME", "LAST ACTIVE");
    for sim in &sims {
        println!("{:<38} {:<20} {}", sim.id, sim.name, sim.last_active);
    }
    Ok(())
}

pub fn delete(config: &MonolithConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let result = simulations::delete_simulation(&mut conn, id)?;
    println!(
        "Deleted simulation {} ({} scars, {} messages)",
        result.id, result.scars_removed, result.messages_removed
    );
    Ok(())
}
