//! Dice Tower Demo
//!
//! Runs two scripted rolls against the built-in stand-in simulator:
//! prepare, release, tick until resolved, reset, repeat. Resolved
//! outcomes are printed as JSON lines for downstream consumption.

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use dice_tower::{
    roll::RollEventData, DiceTower, KinematicSim, RecordingScene, TowerConfig, FIXED_DT, TICK_RATE,
    VERSION,
};

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Dice Tower v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let tower_id = [42u8; 16];
    info!("Tower ID: {}", hex::encode(tower_id));

    let mut tower = DiceTower::new(
        KinematicSim::new(),
        RecordingScene::new(),
        TowerConfig::default(),
        tower_id,
    );

    for roll in 1..=2 {
        info!("=== Roll {} ===", roll);
        roll_once(&mut tower);
        tower.reset();
    }
}

/// Prepare, release, and tick one roll to completion.
fn roll_once(tower: &mut DiceTower<KinematicSim, RecordingScene>) {
    let die = tower.prepare_die();
    tower.release();

    // Generous deadline: default config retries for minutes before
    // abandoning, but an unkicked stand-in drop settles within seconds
    let deadline = tower.current_tick() + 30 * TICK_RATE;

    while tower.current_tick() < deadline {
        let result = tower.tick(FIXED_DT);

        for event in &result.events {
            if let RollEventData::DieResolved { value } = event.data {
                // Machine-readable result sink
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(err) => warn!("failed to encode result event: {err}"),
                }
                info!(die = die.0, value, tick = event.tick, "roll complete");
            }
        }

        if result.resolved.is_some() {
            return;
        }
    }

    warn!(die = die.0, "roll did not resolve before the demo deadline");
}
