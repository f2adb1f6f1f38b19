//! Interaction budget
//!
//! Caps the number of state-changing actions in one run. Exhausting the
//! budget is how every run ends; it is never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionBudget {
    used: u32,
    max: u32,
}

impl InteractionBudget {
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    /// Spend one interaction. Returns false (and spends nothing) once exhausted.
    pub fn try_consume(&mut self) -> bool {
        if self.used < self.max {
            self.used += 1;
            true
        } else {
            false
        }
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.max - self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
