use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConatusConfig {
    pub actor: ActorConfig,
    pub run: RunDefaults,
}

impl ConatusConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: ConatusConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse("CONATUS_DECAY_RATE") {
            self.actor.decay_rate = v;
        }
        if let Some(v) = env_parse("CONATUS_EXTRA_SLOTS") {
            self.actor.extra_slots = v;
        }
        if let Some(v) = env_parse("CONATUS_N_FEATURES") {
            self.run.n_features = v;
        }
        if let Some(v) = env_parse("CONATUS_STEPS") {
            self.run.steps = v;
        }
        if let Some(v) = env_parse("CONATUS_SEED") {
            self.run.seed = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Policy constants of the goal selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Fraction of every outstanding goal that evaporates at the start of
    /// each `choose`. Range [0.0, 1.0]. Default: 0.2.
    pub decay_rate: f32,
    /// Reserved slots appended after the addressable features (null goal,
    /// terminal/reset signal). Default: 2.
    pub extra_slots: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.2,
            extra_slots: 2,
        }
    }
}

/// Defaults for the stepping loop that drives the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub n_features: usize,
    pub steps: u64,
    /// Seed for the tie-break RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            n_features: 8,
            steps: 100,
            seed: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
