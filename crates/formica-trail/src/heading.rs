//! Agent headings
//!
//! The trail grid is y-down: row 0 is the top row, so `Up` is `(0, -1)`.
//! Rotation uses the quarter-turn formulas of the trail model:
//! - left:  `(dx, dy) -> (-dy, dx)`
//! - right: `(dx, dy) -> (dy, -dx)`
//!
//! On a y-down grid the "left" formula turns clockwise on screen, so
//! `Up.turn_left()` is `Right`. Existing evolved programs depend on this.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four unit headings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Unit vector for this heading
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Right => IVec2::new(1, 0),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
        }
    }

    /// Quarter turn `(dx, dy) -> (-dy, dx)`
    pub fn turn_left(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Quarter turn `(dx, dy) -> (dy, -dx)`
    pub fn turn_right(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    /// Parse a start marker glyph (`^ > v <`)
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '^' => Some(Heading::Up),
            '>' => Some(Heading::Right),
            'v' => Some(Heading::Down),
            '<' => Some(Heading::Left),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Heading::Up => '^',
            Heading::Right => '>',
            Heading::Down => 'v',
            Heading::Left => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::Up => "up",
            Heading::Right => "right",
            Heading::Down => "down",
            Heading::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_match_rotation_formulas() {
        for heading in Heading::ALL {
            let d = heading.delta();
            assert_eq!(heading.turn_left().delta(), IVec2::new(-d.y, d.x));
            assert_eq!(heading.turn_right().delta(), IVec2::new(d.y, -d.x));
        }
    }

    #[test]
    fn test_left_then_right_is_identity() {
        for heading in Heading::ALL {
            assert_eq!(heading.turn_left().turn_right(), heading);
        }
    }

    #[test]
    fn test_four_turns_restore_heading() {
        for heading in Heading::ALL {
            let left = (0..4).fold(heading, |h, _| h.turn_left());
            let right = (0..4).fold(heading, |h, _| h.turn_right());
            assert_eq!(left, heading);
            assert_eq!(right, heading);
        }
    }

    #[test]
    fn test_glyphs() {
        for heading in Heading::ALL {
            assert_eq!(Heading::from_glyph(heading.glyph()), Some(heading));
        }
        assert_eq!(Heading::from_glyph('#'), None);
        assert_eq!(Heading::from_glyph('V'), None);
    }
}
