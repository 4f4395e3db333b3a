//! CLI `chat` and `history` commands.

use anyhow::Result;

use monolith::config::MonolithConfig;
use monolith::generation::create_generator;
use monolith::ledger::types::Role;
use monolith::ledger::{messages, simulations};

/// Run one turn against the configured backend and print the reply.
pub async fn chat(config: &MonolithConfig, id: &str, text: &str) -> Result<()> {
    let generator = create_generator(&config.generation)?;
    let conn = super::open(config)?;

    let outcome = monolith::turn::take_turn(&conn, &generator, config, id, text).await?;

    println!("{}", outcome.reply.content);
    eprintln!(
        "[{}] tension {:.2}, pain {:.2}{}{}",
        outcome.state.status,
        outcome.state.tension,
        outcome.state.pain,
        if outcome.collapsed { ", collapsed" } else { "" },
        if outcome.scar.is_some() { ", scarred" } else { "" },
    );
    Ok(())
}

/// Print a simulation's transcript with per-turn state.
pub fn history(config: &MonolithConfig, id: &str) -> Result<()> {
    let conn = super::open(config)?;
    let sim = simulations::get_simulation(&conn, id)?;
    let transcript = messages::messages_for_simulation(&conn, id)?;

    println!("Simulation: {} ({})", sim.name, sim.id);
    println!("{}", "=".repeat(50));
    for msg in &transcript {
        let who = match msg.role {
            Role::User => "you",
            Role::Model => "them",
        };
        match msg.state {
            Some(state) => println!(
                "{} {who} [{} t={:.2} p={:.2}]",
                msg.created_at, state.status, state.tension, state.pain
            ),
            None => println!("{} {who}", msg.created_at),
        }
        println!("  {}", msg.content.replace('\n', "\n  "));
    }
    Ok(())
}
