use anyhow::Result;

use monolith::config::MonolithConfig;
use monolith::ledger::{scars, simulations};

/// Print every scar of a simulation, oldest first.
pub fn scars(config: &MonolithConfig, id: &str) -> Result<()> {
    let conn = super::open(config)?;
    let sim = simulations::get_simulation(&conn, id)?;
    let ledger = scars::scars_for_simulation(&conn, id, None)?;

    println!("Scar ledger: {} ({} scars)", sim.name, ledger.len());
    println!("{}", "=".repeat(50));
    for scar in &ledger {
        println!("  {} depth {:.1}  {}", scar.created_at, scar.depth, scar.description);
    }
    Ok(())
}
