//! CLI `probe` command: classify a stimulus and print the result as JSON.

use anyhow::Result;

use monolith::config::MonolithConfig;
use monolith::engine::{process_stimulus, vectorize};

pub fn probe(
    config: &MonolithConfig,
    text: &str,
    sim: Option<&str>,
    seed: Option<&str>,
) -> Result<()> {
    let classification = match sim {
        Some(id) => {
            let conn = super::open(config)?;
            monolith::turn::probe(&conn, &config.engine, id, text)?
        }
        None => {
            let seed = seed.unwrap_or(&config.simulation.identity_seed);
            process_stimulus(text, &vectorize(seed), &[], &config.engine.thresholds())?
        }
    };

    let json = serde_json::json!({
        "classification": classification,
        "header": classification.prompt_header(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
