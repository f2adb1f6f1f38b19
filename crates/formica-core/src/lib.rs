//! Ant trail simulation engine for Formica
//!
//! A single ant walks a fixed trail grid collecting food, driven by an
//! externally supplied routine and limited by a budget of state-changing
//! actions. This crate implements:
//! - The agent pose and the interaction budget
//! - The action dispatcher (interactions are counted, observations are free)
//! - Watchers notified after every primitive call
//! - The simulator (reset, run, primitives) and an evaluator factory
//! - Layered configuration

pub mod action;
pub mod agent;
pub mod budget;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod simulator;
pub mod state;
pub mod watcher;

// Re-export trail types so callers only need this crate
pub use formica_trail::{
    BoundsMode, Cell, Heading, SANTA_FE, Trail, TrailDefinition, TrailError, TrailLoader,
};

pub use action::{Interaction, Observation, Primitive};
pub use agent::Agent;
pub use budget::InteractionBudget;
pub use config::{RunConfig, SimConfig, TrailConfig};
pub use error::SimError;
pub use evaluate::Evaluator;
pub use simulator::{Routine, RunOutcome, RunReport, Simulator};
pub use state::{RunPhase, SimState};
pub use watcher::{
    EventRecorder, LogWatcher, NullWatcher, SimEvent, Watcher, WatcherHandle, WatcherRegistry,
};
