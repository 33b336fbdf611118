//! # engine_demo
//!
//! Spawns a handful of entities into column storage and runs a fixed number
//! of movement ticks over them. Systems only ever see component groups.
//!
//! Configured through `DEMO_ENTITIES`, `DEMO_TICKS` and
//! `ENGINE_REGISTRY_CAPACITY`. Log output follows `RUST_LOG`.

mod components;
mod config;
mod systems;
mod world;

use anyhow::Result;
use engine_component::Registry;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use components::{Name, Position, Velocity};
use config::DemoConfig;
use world::DemoWorld;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_demo=info".parse()?))
        .init();

    let config = DemoConfig::from_env()?;
    info!(entities = config.entities, ticks = config.ticks, "engine demo starting");

    let mut world = DemoWorld::new();
    for i in 0..config.entities {
        // Every third entity stays put.
        let velocity = (i % 3 != 0).then(|| Velocity::from_xy(i as f32, 1.0));
        let row = world.spawn(
            Name::new(format!("entity-{i}")),
            Position::new(0.0, i as f32),
            velocity,
        );
        debug!(row, signature = ?world.signature(row), "spawned entity");
    }
    if world.is_empty() {
        warn!("no entities spawned, nothing to simulate");
    }

    for tick in 1..=config.ticks {
        let moved = systems::tick(&mut world, config.dt);
        info!(tick, moved, "tick complete");
    }

    for view in world.views() {
        info!(
            entity = systems::label(view.erase()),
            distance = systems::distance_from_origin(view),
            "final position"
        );
    }

    let snapshot = serde_json::to_string(&Registry::global().snapshot())?;
    debug!(registry = %snapshot, "component registry");

    info!("engine demo finished");
    Ok(())
}
