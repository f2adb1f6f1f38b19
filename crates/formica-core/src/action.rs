//! Primitive vocabulary
//!
//! Every primitive the simulator exposes is either an [`Interaction`]
//! (changes state, costs one unit of budget) or an [`Observation`]
//! (read-only, free). [`Primitive`] names both kinds with the short names
//! program compilers bind as terminals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SimError;

/// State-changing action, counted against the interaction budget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interaction {
    TurnLeft,
    TurnRight,
    MoveForward,
}

/// Read-only sensing action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observation {
    /// Food in the cell the ant would move into
    FoodAhead,
    /// Food in any of the four neighbouring cells
    FoodAround,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Interaction(Interaction),
    Observation(Observation),
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::Interaction(Interaction::MoveForward),
        Primitive::Interaction(Interaction::TurnLeft),
        Primitive::Interaction(Interaction::TurnRight),
        Primitive::Observation(Observation::FoodAhead),
        Primitive::Observation(Observation::FoodAround),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Interaction(Interaction::MoveForward) => "fwd",
            Primitive::Interaction(Interaction::TurnLeft) => "left",
            Primitive::Interaction(Interaction::TurnRight) => "right",
            Primitive::Observation(Observation::FoodAhead) => "ahead",
            Primitive::Observation(Observation::FoodAround) => "around",
        }
    }

    pub fn is_interaction(self) -> bool {
        matches!(self, Primitive::Interaction(_))
    }
}

impl From<Interaction> for Primitive {
    fn from(interaction: Interaction) -> Self {
        Primitive::Interaction(interaction)
    }
}

impl From<Observation> for Primitive {
    fn from(observation: Observation) -> Self {
        Primitive::Observation(observation)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::ALL
            .into_iter()
            .find(|primitive| primitive.name() == s)
            .ok_or_else(|| SimError::UnknownPrimitive(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for primitive in Primitive::ALL {
            assert_eq!(primitive.name().parse::<Primitive>().unwrap(), primitive);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "jump".parse::<Primitive>().unwrap_err();
        assert!(matches!(err, SimError::UnknownPrimitive(name) if name == "jump"));
    }

    #[test]
    fn test_kinds() {
        assert!(Primitive::from(Interaction::TurnLeft).is_interaction());
        assert!(!Primitive::from(Observation::FoodAround).is_interaction());
    }
}
