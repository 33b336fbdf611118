//! Registry configuration.

use tracing::warn;

/// Environment variable overriding [`RegistryConfig::capacity`] for the
/// global registry.
pub const CAPACITY_ENV: &str = "ENGINE_REGISTRY_CAPACITY";

/// Upper bound on [`RegistryConfig::shard_amount`].
pub const MAX_SHARDS: usize = 1 << 16;

/// Sizing knobs for the maps backing a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of component types to reserve room for up front.
    pub capacity: usize,
    /// Number of lock shards in each map. Rounded up to a power of two between
    /// 2 and [`MAX_SHARDS`]. `None` lets `dashmap` pick based on the available
    /// parallelism.
    pub shard_amount: Option<usize>,
}

impl RegistryConfig {
    /// Create a config with the default capacity and shard count.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: 64,
            shard_amount: None,
        }
    }

    /// Build the default config, then apply `ENGINE_REGISTRY_CAPACITY` if set.
    ///
    /// An unparsable value is logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::new();
        match std::env::var(CAPACITY_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(capacity) => config.with_capacity(capacity),
                Err(err) => {
                    warn!(
                        var = CAPACITY_ENV,
                        value = %raw,
                        error = %err,
                        "ignoring invalid registry capacity"
                    );
                    config
                }
            },
            Err(_) => config,
        }
    }

    /// Override the initial capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Override the shard count.
    #[must_use]
    pub fn with_shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = Some(shard_amount);
        self
    }

    /// The shard count actually handed to `dashmap`, which panics unless it is
    /// a power of two greater than one. Clamped to [`MAX_SHARDS`].
    pub(crate) fn effective_shard_amount(&self) -> Option<usize> {
        self.shard_amount
            .map(|n| n.clamp(2, MAX_SHARDS).next_power_of_two())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.shard_amount, None);
        assert_eq!(config.effective_shard_amount(), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RegistryConfig::new().with_capacity(8).with_shard_amount(4);
        assert_eq!(config.capacity, 8);
        assert_eq!(config.shard_amount, Some(4));
    }

    #[test]
    fn test_shard_amount_rounded_to_power_of_two() {
        assert_eq!(
            RegistryConfig::new()
                .with_shard_amount(0)
                .effective_shard_amount(),
            Some(2)
        );
        assert_eq!(
            RegistryConfig::new()
                .with_shard_amount(5)
                .effective_shard_amount(),
            Some(8)
        );
        assert_eq!(
            RegistryConfig::new()
                .with_shard_amount(16)
                .effective_shard_amount(),
            Some(16)
        );
    }

    #[test]
    fn test_huge_shard_amount_is_clamped() {
        let config = RegistryConfig::new().with_shard_amount(usize::MAX);
        assert_eq!(config.effective_shard_amount(), Some(MAX_SHARDS));

        let config = RegistryConfig::new().with_shard_amount(MAX_SHARDS + 1);
        assert_eq!(config.effective_shard_amount(), Some(MAX_SHARDS));
    }
}
