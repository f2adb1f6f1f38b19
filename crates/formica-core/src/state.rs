//! Simulation state and its read-only surface
//!
//! Watchers and renderers get a `&SimState` and nothing else, so they can
//! inspect every part of the run but never change it.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::iter;

use formica_trail::{Cell, Heading, Trail, TrailDefinition};

use crate::{Agent, Interaction, InteractionBudget};

/// Per-run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Freshly reset, no interaction spent yet
    #[default]
    Idle,
    /// At least one interaction spent, budget remaining
    Running,
    /// Budget used up; interactions are no-ops from here on
    Exhausted,
}

/// Live trail, ant pose and run counters
#[derive(Debug, Clone)]
pub struct SimState {
    pub(crate) trail: Trail,
    pub(crate) agent: Agent,
    pub(crate) budget: InteractionBudget,
    pub(crate) reward: u32,
    pub(crate) phase: RunPhase,
}

impl SimState {
    pub(crate) fn new(definition: &TrailDefinition, max_interactions: u32) -> Self {
        Self {
            trail: definition.trail().clone(),
            agent: Agent::new(definition.start(), definition.heading()),
            budget: InteractionBudget::new(max_interactions),
            reward: 0,
            phase: RunPhase::Idle,
        }
    }

    /// Put everything back to the start of a run
    pub(crate) fn reset(&mut self, definition: &TrailDefinition) {
        self.trail.restore_from(definition.trail());
        self.agent = Agent::new(definition.start(), definition.heading());
        self.budget.reset();
        self.reward = 0;
        self.phase = RunPhase::Idle;
    }

    /// Effect of a permitted interaction; the budget has already been charged
    pub(crate) fn apply(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::TurnLeft => self.agent.turn_left(),
            Interaction::TurnRight => self.agent.turn_right(),
            Interaction::MoveForward => {
                let next = self.agent.next_location(&self.trail);
                self.agent.position = next;
                if self.trail.take_food(next) {
                    self.reward += 1;
                }
            }
        }

        self.phase = if self.budget.is_exhausted() {
            RunPhase::Exhausted
        } else {
            RunPhase::Running
        };
    }

    pub(crate) fn food_ahead(&self) -> bool {
        self.trail.is_food(self.next_location())
    }

    /// Probe the four neighbours in successive left-turn order
    pub(crate) fn food_around(&self) -> bool {
        iter::successors(Some(self.agent.heading.turn_left()), |h| Some(h.turn_left()))
            .take(4)
            .any(|heading| {
                self.trail
                    .is_food(self.agent.location_towards(heading, &self.trail))
            })
    }

    /// The live trail (food already eaten this run is gone)
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn position(&self) -> IVec2 {
        self.agent.position
    }

    pub fn heading(&self) -> Heading {
        self.agent.heading
    }

    pub fn width(&self) -> i32 {
        self.trail.width()
    }

    pub fn height(&self) -> i32 {
        self.trail.height()
    }

    pub fn cell_at(&self, pos: IVec2) -> Cell {
        self.trail.cell(pos)
    }

    /// Where a forward move would land
    pub fn next_location(&self) -> IVec2 {
        self.agent.next_location(&self.trail)
    }

    /// Food eaten so far this run
    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn interactions_used(&self) -> u32 {
        self.budget.used()
    }

    pub fn max_interactions(&self) -> u32 {
        self.budget.max()
    }

    pub fn remaining_interactions(&self) -> u32 {
        self.budget.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }
}
