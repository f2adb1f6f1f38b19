//! Watchers: read-only subscribers to simulation progress
//!
//! The simulator notifies every registered watcher, in registration order,
//! after each observation (once its result is known) and after each
//! permitted interaction (once its effect is applied). Watchers receive the
//! state by shared reference and cannot influence the run.
//!
//! Both hooks default to no-ops, so implementors only override what they need.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use formica_trail::Heading;

use crate::{Interaction, Observation, SimState};

pub trait Watcher {
    /// Called after a sensing call, with the value it is about to return
    fn on_observation(&mut self, _observation: Observation, _found: bool, _state: &SimState) {}

    /// Called after a permitted interaction has changed the state
    fn on_interaction(&mut self, _interaction: Interaction, _state: &SimState) {}
}

/// Shared handle to a registered watcher.
/// Callers keep their own clone to read the watcher back after a run.
pub type WatcherHandle = Rc<RefCell<dyn Watcher>>;

/// Insertion-ordered watcher subscriptions.
/// The same handle may be registered more than once.
#[derive(Default)]
pub struct WatcherRegistry {
    watchers: Vec<WatcherHandle>,
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, watcher: WatcherHandle) {
        self.watchers.push(watcher);
    }

    /// Remove the first registration of `watcher` (by identity).
    /// Returns false, and does nothing, if it was not registered.
    pub fn unregister<W: Watcher + ?Sized>(&mut self, watcher: &Rc<RefCell<W>>) -> bool {
        let target = Rc::as_ptr(watcher);
        match self
            .watchers
            .iter()
            .position(|registered| std::ptr::addr_eq(Rc::as_ptr(registered), target))
        {
            Some(index) => {
                self.watchers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    pub(crate) fn notify_observation(
        &self,
        observation: Observation,
        found: bool,
        state: &SimState,
    ) {
        for watcher in &self.watchers {
            watcher
                .borrow_mut()
                .on_observation(observation, found, state);
        }
    }

    pub(crate) fn notify_interaction(&self, interaction: Interaction, state: &SimState) {
        for watcher in &self.watchers {
            watcher.borrow_mut().on_interaction(interaction, state);
        }
    }
}

impl fmt::Debug for WatcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherRegistry")
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

/// A watcher that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWatcher;

impl Watcher for NullWatcher {}

/// Emits one log record per notification
#[derive(Debug, Clone, Copy)]
pub struct LogWatcher {
    level: log::Level,
}

impl LogWatcher {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogWatcher {
    fn default() -> Self {
        Self::new(log::Level::Debug)
    }
}

impl Watcher for LogWatcher {
    fn on_observation(&mut self, observation: Observation, found: bool, state: &SimState) {
        log::log!(
            self.level,
            "{:?} -> {} at {} facing {}",
            observation,
            found,
            state.position(),
            state.heading()
        );
    }

    fn on_interaction(&mut self, interaction: Interaction, state: &SimState) {
        log::log!(
            self.level,
            "{:?} [{}/{}] -> at {} facing {}, reward {}",
            interaction,
            state.interactions_used(),
            state.max_interactions(),
            state.position(),
            state.heading(),
            state.reward()
        );
    }
}

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Observation {
        observation: Observation,
        found: bool,
        position: IVec2,
        heading: Heading,
    },
    Interaction {
        interaction: Interaction,
        position: IVec2,
        heading: Heading,
        reward: u32,
        interactions_used: u32,
    },
}

/// Records every notification in the order it fired
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    events: Vec<SimEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn observations(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SimEvent::Observation { .. }))
            .count()
    }

    pub fn interactions(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SimEvent::Interaction { .. }))
            .count()
    }

    /// Positions visited by moves, in order
    pub fn path(&self) -> Vec<IVec2> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Interaction {
                    interaction: Interaction::MoveForward,
                    position,
                    ..
                } => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Watcher for EventRecorder {
    fn on_observation(&mut self, observation: Observation, found: bool, state: &SimState) {
        self.events.push(SimEvent::Observation {
            observation,
            found,
            position: state.position(),
            heading: state.heading(),
        });
    }

    fn on_interaction(&mut self, interaction: Interaction, state: &SimState) {
        self.events.push(SimEvent::Interaction {
            interaction,
            position: state.position(),
            heading: state.heading(),
            reward: state.reward(),
            interactions_used: state.interactions_used(),
        });
    }
}
