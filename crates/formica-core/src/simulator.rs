//! Simulator - one ant, one trail, one run at a time
//!
//! All five primitives go through the dispatcher pair:
//! - [`Simulator::perform`] charges the interaction budget, applies the
//!   effect, then notifies watchers. Once the budget is spent it does nothing.
//! - [`Simulator::observe`] computes the sensing result, notifies watchers,
//!   then returns the result. It never touches the budget.
//!
//! [`Simulator::run`] resets and then invokes the routine until the budget
//! is spent, so a routine can look unbounded while the run stays finite.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use formica_trail::{Heading, Trail, TrailDefinition};

use crate::{
    Interaction, Observation, Primitive, RunConfig, RunPhase, SimError, SimState, Watcher,
    WatcherHandle, WatcherRegistry,
};

/// A compiled control program.
///
/// Each `step` is one invocation of the whole program; it drives the ant by
/// calling primitives on the simulator. Any `FnMut(&mut Simulator)` closure
/// is a routine.
pub trait Routine {
    fn step(&mut self, sim: &mut Simulator);
}

impl<F> Routine for F
where
    F: FnMut(&mut Simulator),
{
    fn step(&mut self, sim: &mut Simulator) {
        self(sim)
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The interaction budget was used up (the normal end of a run)
    Exhausted,
    /// Too many consecutive routine invocations spent no interaction
    Stalled,
}

/// Result of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Food eaten during the run
    pub reward: u32,
    pub interactions_used: u32,
    pub max_interactions: u32,
    /// Number of routine invocations
    pub routine_calls: u64,
    /// Food on the pristine trail that lies inside the movement bounds
    pub food_available: usize,
    pub outcome: RunOutcome,
}

impl RunReport {
    /// Share of the trail's food that was eaten (0.0 - 1.0)
    pub fn completion(&self) -> f32 {
        if self.food_available == 0 {
            0.0
        } else {
            self.reward as f32 / self.food_available as f32
        }
    }
}

pub struct Simulator {
    /// Live trail, ant and counters
    state: SimState,

    /// Pristine trail and start pose, shared between simulators
    definition: Arc<TrailDefinition>,

    watchers: WatcherRegistry,

    idle_routine_limit: Option<u32>,
}

impl Simulator {
    /// Create a simulator with the given interaction budget and no idle limit
    pub fn new(definition: TrailDefinition, max_interactions: u32) -> Result<Self, SimError> {
        Self::with_config(
            Arc::new(definition),
            &RunConfig {
                max_interactions,
                idle_routine_limit: None,
            },
        )
    }

    /// Create a simulator over a shared trail definition
    pub fn with_config(
        definition: Arc<TrailDefinition>,
        config: &RunConfig,
    ) -> Result<Self, SimError> {
        if config.max_interactions == 0 {
            return Err(SimError::ZeroBudget);
        }
        Ok(Self::from_validated(definition, config))
    }

    /// Build from a config whose budget is already known to be positive
    pub(crate) fn from_validated(definition: Arc<TrailDefinition>, config: &RunConfig) -> Self {
        Self {
            state: SimState::new(&definition, config.max_interactions),
            definition,
            watchers: WatcherRegistry::new(),
            idle_routine_limit: config.idle_routine_limit,
        }
    }

    /// Parse `text` with the default loader and build a simulator
    pub fn from_trail_str(text: &str, max_interactions: u32) -> Result<Self, SimError> {
        Self::new(text.parse()?, max_interactions)
    }

    pub fn set_idle_routine_limit(&mut self, limit: Option<u32>) {
        self.idle_routine_limit = limit;
    }

    // ========================================================================
    // Run control
    // ========================================================================

    /// Restore the start pose, zero the counters and restore the live trail
    pub fn reset(&mut self) {
        self.state.reset(&self.definition);
    }

    /// Reset, then invoke `routine` until the interaction budget is spent
    pub fn run<R: Routine + ?Sized>(&mut self, routine: &mut R) -> RunReport {
        self.reset();

        let mut routine_calls = 0u64;
        let mut idle_calls = 0u32;
        let mut outcome = RunOutcome::Exhausted;

        while !self.state.is_exhausted() {
            let used_before = self.state.interactions_used();
            routine.step(self);
            routine_calls += 1;

            if self.state.interactions_used() != used_before {
                idle_calls = 0;
                continue;
            }

            idle_calls += 1;
            if let Some(limit) = self.idle_routine_limit
                && idle_calls >= limit
            {
                log::warn!(
                    "Routine stalled: {} consecutive calls without an interaction ({}/{} used)",
                    idle_calls,
                    self.state.interactions_used(),
                    self.state.max_interactions()
                );
                outcome = RunOutcome::Stalled;
                break;
            }
        }

        let report = RunReport {
            reward: self.state.reward(),
            interactions_used: self.state.interactions_used(),
            max_interactions: self.state.max_interactions(),
            routine_calls,
            food_available: self.definition.trail().reachable_food_count(),
            outcome,
        };
        log::debug!(
            "Run finished ({:?}): reward {}/{}, {} routine calls",
            report.outcome,
            report.reward,
            report.food_available,
            report.routine_calls
        );
        report
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    /// Apply a state-changing action if budget remains.
    /// Returns whether the action was permitted; a refused action has no
    /// effect and notifies nobody.
    pub fn perform(&mut self, interaction: Interaction) -> bool {
        if !self.state.budget.try_consume() {
            return false;
        }
        self.state.apply(interaction);
        log::trace!(
            "{:?} -> {} facing {}",
            interaction,
            self.state.position(),
            self.state.heading()
        );
        self.watchers.notify_interaction(interaction, &self.state);
        true
    }

    /// Evaluate a sensing action, notify watchers, and return its result
    pub fn observe(&mut self, observation: Observation) -> bool {
        let found = match observation {
            Observation::FoodAhead => self.state.food_ahead(),
            Observation::FoodAround => self.state.food_around(),
        };
        self.watchers
            .notify_observation(observation, found, &self.state);
        found
    }

    /// Invoke a primitive by value: `Some(found)` for observations, `None` for interactions
    pub fn invoke(&mut self, primitive: Primitive) -> Option<bool> {
        match primitive {
            Primitive::Interaction(interaction) => {
                self.perform(interaction);
                None
            }
            Primitive::Observation(observation) => Some(self.observe(observation)),
        }
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    pub fn turn_left(&mut self) {
        self.perform(Interaction::TurnLeft);
    }

    pub fn turn_right(&mut self) {
        self.perform(Interaction::TurnRight);
    }

    pub fn move_forward(&mut self) {
        self.perform(Interaction::MoveForward);
    }

    pub fn food_ahead(&mut self) -> bool {
        self.observe(Observation::FoodAhead)
    }

    pub fn food_around(&mut self) -> bool {
        self.observe(Observation::FoodAround)
    }

    // ========================================================================
    // Watchers
    // ========================================================================

    pub fn register_watcher(&mut self, watcher: WatcherHandle) {
        self.watchers.register(watcher);
    }

    /// Remove one registration of `watcher`; a no-op if it is not registered
    pub fn unregister_watcher<W: Watcher + ?Sized>(
        &mut self,
        watcher: &Rc<RefCell<W>>,
    ) -> bool {
        self.watchers.unregister(watcher)
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn definition(&self) -> &Arc<TrailDefinition> {
        &self.definition
    }

    pub fn position(&self) -> IVec2 {
        self.state.position()
    }

    pub fn heading(&self) -> Heading {
        self.state.heading()
    }

    /// The live trail
    pub fn trail(&self) -> &Trail {
        self.state.trail()
    }

    pub fn next_location(&self) -> IVec2 {
        self.state.next_location()
    }

    pub fn reward(&self) -> u32 {
        self.state.reward()
    }

    pub fn interactions_used(&self) -> u32 {
        self.state.interactions_used()
    }

    pub fn max_interactions(&self) -> u32 {
        self.state.max_interactions()
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase()
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.state)
            .field("watchers", &self.watchers)
            .field("idle_routine_limit", &self.idle_routine_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, EventRecorder, SimEvent};

    fn sim(text: &str, max_interactions: u32) -> Simulator {
        Simulator::from_trail_str(text, max_interactions).unwrap()
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = Simulator::from_trail_str(">#\n", 0).unwrap_err();
        assert!(matches!(err, SimError::ZeroBudget));
    }

    #[test]
    fn test_trail_error_propagates() {
        let err = Simulator::from_trail_str("...\n", 5).unwrap_err();
        assert!(matches!(err, SimError::Trail(formica_trail::TrailError::NoStart)));
    }

    #[test]
    fn test_phase_transitions() {
        let mut sim = sim(">..\n", 2);
        assert_eq!(sim.phase(), RunPhase::Idle);
        sim.food_ahead();
        assert_eq!(sim.phase(), RunPhase::Idle);
        sim.turn_left();
        assert_eq!(sim.phase(), RunPhase::Running);
        sim.turn_left();
        assert_eq!(sim.phase(), RunPhase::Exhausted);
        sim.reset();
        assert_eq!(sim.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_perform_reports_refusal() {
        let mut sim = sim(">..\n", 1);
        assert!(sim.perform(Interaction::MoveForward));
        assert!(!sim.perform(Interaction::MoveForward));
        assert_eq!(sim.position(), IVec2::new(1, 0));
    }

    #[test]
    fn test_invoke() {
        let mut sim = sim(">#.\n", 5);
        assert_eq!(
            sim.invoke(Primitive::Observation(Observation::FoodAhead)),
            Some(true)
        );
        assert_eq!(
            sim.invoke(Primitive::Interaction(Interaction::MoveForward)),
            None
        );
        assert_eq!(sim.reward(), 1);
        assert_eq!(sim.trail().cell(IVec2::new(1, 0)), Cell::Empty);
    }

    #[test]
    fn test_watcher_sees_post_action_state() {
        let mut sim = sim(">#.\n", 5);
        let recorder = Rc::new(RefCell::new(EventRecorder::new()));
        sim.register_watcher(recorder.clone());

        sim.move_forward();

        assert_eq!(
            recorder.borrow().events(),
            &[SimEvent::Interaction {
                interaction: Interaction::MoveForward,
                position: IVec2::new(1, 0),
                heading: Heading::Right,
                reward: 1,
                interactions_used: 1,
            }]
        );
    }

    #[test]
    fn test_run_counts_routine_calls() {
        let mut sim = sim(">...\n", 6);
        let mut routine = |sim: &mut Simulator| {
            sim.move_forward();
            sim.turn_left();
        };
        let report = sim.run(&mut routine);
        assert_eq!(report.outcome, RunOutcome::Exhausted);
        assert_eq!(report.routine_calls, 3);
        assert_eq!(report.interactions_used, 6);
        assert_eq!(report.max_interactions, 6);
    }

    #[test]
    fn test_run_stops_stalled_routine() {
        let mut sim = sim(">#\n", 10);
        sim.set_idle_routine_limit(Some(5));
        let mut routine = |sim: &mut Simulator| {
            sim.food_ahead();
        };
        let report = sim.run(&mut routine);
        assert_eq!(report.outcome, RunOutcome::Stalled);
        assert_eq!(report.routine_calls, 5);
        assert_eq!(report.interactions_used, 0);
    }

    #[test]
    fn test_idle_counter_resets_on_progress() {
        let mut sim = sim(">....\n", 3);
        sim.set_idle_routine_limit(Some(2));
        // Acts on every other call: never two idle calls in a row
        let mut tick = 0u32;
        let mut routine = |sim: &mut Simulator| {
            tick += 1;
            if tick % 2 == 0 {
                sim.move_forward();
            }
        };
        let report = sim.run(&mut routine);
        assert_eq!(report.outcome, RunOutcome::Exhausted);
        assert_eq!(report.routine_calls, 6);
    }

    #[test]
    fn test_completion() {
        let mut sim = sim(">##..\n", 2);
        let mut routine = |sim: &mut Simulator| sim.move_forward();
        let report = sim.run(&mut routine);
        assert_eq!(report.reward, 2);
        assert_eq!(report.food_available, 2);
        assert_eq!(report.completion(), 1.0);
    }

    #[test]
    fn test_completion_ignores_unreachable_food() {
        // Legacy bounds leave the bottom row out of reach
        let definition = formica_trail::TrailLoader::new(formica_trail::BoundsMode::Legacy)
            .parse_str(">#.\n..#\n")
            .unwrap();
        let mut sim = Simulator::new(definition, 2).unwrap();
        let mut routine = |sim: &mut Simulator| sim.move_forward();
        let report = sim.run(&mut routine);
        assert_eq!(report.reward, 1);
        assert_eq!(report.food_available, 1);
        assert_eq!(report.completion(), 1.0);
    }
}
