//! Ant pose

use glam::IVec2;
use serde::{Deserialize, Serialize};

use formica_trail::{Heading, Trail};

/// Position and heading of the single ant on a trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub position: IVec2,
    pub heading: Heading,
}

impl Agent {
    pub fn new(position: IVec2, heading: Heading) -> Self {
        Self { position, heading }
    }

    pub fn turn_left(&mut self) {
        self.heading = self.heading.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }

    /// Cell the ant would move into, clamped to the trail bounds
    pub fn next_location(&self, trail: &Trail) -> IVec2 {
        self.location_towards(self.heading, trail)
    }

    /// One step from the current position towards `heading`, clamped to the trail bounds
    pub fn location_towards(&self, heading: Heading, trail: &Trail) -> IVec2 {
        trail.clamp(self.position + heading.delta())
    }
}
