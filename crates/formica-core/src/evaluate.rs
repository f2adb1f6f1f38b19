//! Routine evaluation
//!
//! An [`Evaluator`] holds one parsed trail and the run limits, and builds a
//! fresh [`Simulator`] per evaluation. Every simulator shares the same
//! pristine trail, so independent evaluations never see each other's state.
//! Fitness shaping (size penalties and the like) belongs to the caller; the
//! evaluator only reports what happened on the trail.

use std::path::Path;
use std::sync::Arc;

use formica_trail::TrailDefinition;

use crate::{Routine, RunConfig, RunReport, SimConfig, SimError, Simulator};

#[derive(Debug, Clone)]
pub struct Evaluator {
    definition: Arc<TrailDefinition>,
    config: RunConfig,
}

impl Evaluator {
    pub fn new(definition: TrailDefinition, config: RunConfig) -> Result<Self, SimError> {
        if config.max_interactions == 0 {
            return Err(SimError::ZeroBudget);
        }
        Ok(Self {
            definition: Arc::new(definition),
            config,
        })
    }

    /// Parse `text` using the trail settings of `config`
    pub fn from_trail_str(config: &SimConfig, text: &str) -> Result<Self, SimError> {
        let definition = config.trail.loader().parse_str(text)?;
        Self::new(definition, config.run.clone())
    }

    /// Load a trail file using the trail settings of `config`
    pub fn load(config: &SimConfig, path: impl AsRef<Path>) -> Result<Self, SimError> {
        let definition = config.trail.loader().load_path(path)?;
        Self::new(definition, config.run.clone())
    }

    pub fn definition(&self) -> &Arc<TrailDefinition> {
        &self.definition
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// A fresh simulator over the shared trail, for callers that want to
    /// attach watchers or drive primitives directly
    pub fn simulator(&self) -> Simulator {
        Simulator::from_validated(self.definition.clone(), &self.config)
    }

    /// Run `routine` once on a fresh simulator
    pub fn evaluate<R: Routine + ?Sized>(&self, routine: &mut R) -> RunReport {
        self.simulator().run(routine)
    }
}
