//! # Node Configuration
//!
//! Runtime parameters with sane defaults and environment overrides.

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Consensus engine configuration.
    pub engine: EngineConfig,
    /// Event bus configuration.
    pub bus: BusConfig,
}

/// Consensus engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether the node runs the sprint engine. Without it, every
    /// milestone call is rejected up front.
    pub sprint: bool,
    /// Longest block range the root oracle will compute over.
    pub max_root_range: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sprint: true,
            max_root_range: 4096,
        }
    }
}

/// Event bus configuration.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Broadcast channel capacity; slow subscribers past this lag.
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Load configuration from defaults and environment overrides.
#[must_use]
pub fn load_config() -> NodeConfig {
    let mut config = NodeConfig::default();

    if let Ok(v) = std::env::var("SC_SPRINT_ENGINE") {
        config.engine.sprint = v != "0" && !v.eq_ignore_ascii_case("false");
    }
    if let Ok(v) = std::env::var("SC_MAX_ROOT_RANGE") {
        if let Ok(n) = v.parse() {
            config.engine.max_root_range = n;
        }
    }
    if let Ok(v) = std::env::var("SC_BUS_CAPACITY") {
        if let Ok(n) = v.parse() {
            config.bus.channel_capacity = n;
        }
    }

    config
}
