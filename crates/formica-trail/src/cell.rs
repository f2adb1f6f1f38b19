//! Cell contents

use serde::{Deserialize, Serialize};

/// Contents of a single trail cell
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Open floor
    #[default]
    Empty,
    /// A food marker, consumed when the ant steps on it
    Food,
}

impl Cell {
    /// Glyph used for food in trail definitions
    pub const FOOD_GLYPH: char = '#';
    /// Glyph used for open floor when a trail is written back out
    pub const EMPTY_GLYPH: char = '.';

    /// Map a trail definition character to a cell.
    /// Anything that is not `#` is open floor, heading glyphs included.
    pub fn from_glyph(glyph: char) -> Self {
        if glyph == Self::FOOD_GLYPH {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY_GLYPH,
            Cell::Food => Self::FOOD_GLYPH,
        }
    }

    pub fn is_food(self) -> bool {
        self == Cell::Food
    }
}
