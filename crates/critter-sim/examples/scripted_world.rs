//! Run a short scripted pet world and print what happened.
//!
//! ```text
//! cargo run --example scripted_world -- [config.json]
//! RUST_LOG=critter_sim=debug cargo run --example scripted_world
//! ```
//!
//! The optional argument is a (partial) `SimConfig` JSON document.

use anyhow::Context;
use critter_sim::prelude::*;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

fn pet(nickname: &str) -> Request {
    Request::CreatePet {
        nickname: nickname.into(),
    }
}

fn buy(item: &str) -> Request {
    Request::BuyItem { item: item.into() }
}

/// One inner vec per tick.
fn script() -> Vec<Vec<(&'static str, Request)>> {
    vec![
        vec![("ada", Request::CreatePlayer), ("bob", Request::CreatePlayer)],
        vec![("ada", pet("Manny")), ("ada", pet("Luna")), ("bob", pet("Rex"))],
        vec![("ada", buy("Ball")), ("ada", buy("Sponge")), ("bob", buy("Apple"))],
        vec![
            (
                "ada",
                Request::Play {
                    nickname: "Manny".into(),
                    item: "Ball".into(),
                },
            ),
            (
                "ada",
                Request::Play {
                    nickname: "Manny".into(),
                    item: "Ball".into(),
                },
            ),
            (
                "bob",
                Request::Feed {
                    nickname: "Rex".into(),
                    item: "Apple".into(),
                },
            ),
            (
                "bob",
                Request::Breed {
                    mother: "Manny".into(),
                    father: "Luna".into(),
                    child: "Pip".into(),
                },
            ),
        ],
        vec![
            (
                "ada",
                Request::Bathe {
                    nickname: "Luna".into(),
                    item: "Sponge".into(),
                },
            ),
            ("ada", Request::Sleep { nickname: "Manny".into() }),
        ],
    ]
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            SimConfig::from_json_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => SimConfig::default(),
    };
    let mut sim = Simulation::new(config)?;

    for batch in script() {
        for (persona, request) in batch {
            sim.submit(persona, request)?;
        }
        for receipt in sim.tick() {
            let kind = receipt.kind.to_string();
            let outcome = match &receipt.result {
                Ok(reply) => format!("ok   {}", serde_json::to_string(reply)?),
                Err(e) => format!("fail {e}"),
            };
            println!("tick {:>3} {:<8} {kind:<13} {outcome}", receipt.tick, receipt.persona_tag);
        }
    }

    // Run past the first leaderboard pass.
    sim.run_ticks(60);

    println!("\nafter {} ticks ({:.0} simulated seconds):", sim.current_tick(), sim.sim_time());
    for pet in sim.pets()? {
        println!("{}", serde_json::to_string(&pet)?);
    }
    let board: Vec<_> = sim.leaderboard()?.into_iter().map(|p| (p.nickname, p.level)).collect();
    println!("leaderboard: {board:?}");
    println!("events: {}", sim.drain_events().len());
    println!("state hash: {}", sim.state_hash()?);
    Ok(())
}
