//! Demo configuration.

use anyhow::{Context, Result};

/// Configuration for a demo run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Number of entities to spawn.
    pub entities: usize,
    /// Number of ticks to simulate.
    pub ticks: u64,
    /// Seconds per tick.
    pub dt: f32,
}

impl DemoConfig {
    /// Build the default config, then apply `DEMO_ENTITIES` and `DEMO_TICKS`
    /// if set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(entities) = read_env("DEMO_ENTITIES")? {
            config = config.with_entities(entities);
        }
        if let Some(ticks) = read_env("DEMO_TICKS")? {
            config = config.with_ticks(ticks);
        }
        Ok(config)
    }

    /// Override the entity count.
    #[must_use]
    pub fn with_entities(mut self, entities: usize) -> Self {
        self.entities = entities;
        self
    }

    /// Override the tick count.
    #[must_use]
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            entities: 6,
            ticks: 3,
            dt: 1.0 / 60.0,
        }
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {key}: {raw:?}")),
        Err(_) => Ok(None),
    }
}
