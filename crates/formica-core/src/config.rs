//! Simulation configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `formica.ron` file (if exists)
//! 3. Environment variables prefixed with `FORMICA__`
//!
//! Example environment variable: `FORMICA__RUN__MAX_INTERACTIONS=400`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use formica_trail::{BoundsMode, TrailLoader};

/// Main simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub trail: TrailConfig,
}

/// Per-run limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// State-changing actions allowed per run
    pub max_interactions: u32,
    /// Consecutive routine invocations without an interaction before a run
    /// is abandoned as stalled (None = never give up)
    #[serde(default = "default_idle_routine_limit")]
    pub idle_routine_limit: Option<u32>,
}

fn default_idle_routine_limit() -> Option<u32> {
    Some(1024)
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_interactions: 600,
            idle_routine_limit: default_idle_routine_limit(),
        }
    }
}

/// Trail loading settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailConfig {
    /// How movement bounds are derived from the trail text
    #[serde(default)]
    pub bounds: BoundsMode,
}

impl TrailConfig {
    pub fn loader(&self) -> TrailLoader {
        TrailLoader::new(self.bounds)
    }
}

impl SimConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `formica.ron` file (if exists)
    /// 3. Environment variables prefixed with `FORMICA__` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("run.max_interactions", 600_i64)?
            .set_default("trail.bounds", "exact")?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("formica")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (FORMICA__RUN__MAX_INTERACTIONS, etc.)
            .add_source(Environment::with_prefix("FORMICA").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Parse a configuration from RON text; missing sections use defaults
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).context("Failed to parse RON configuration")
    }
}
