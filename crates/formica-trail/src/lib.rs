//! Trail grid data and text loading for Formica
//!
//! This crate provides the foundational data types for the ant simulation:
//! - Cell contents (Cell)
//! - Agent headings and quarter-turn rotation (Heading)
//! - The dense trail grid and its movement bounds (Trail, BoundsMode)
//! - The text trail loader (TrailLoader, TrailDefinition, TrailError)

mod cell;
mod error;
mod heading;
mod loader;
mod trail;

pub use cell::Cell;
pub use error::TrailError;
pub use heading::Heading;
pub use loader::{TrailDefinition, TrailLoader};
pub use trail::{BoundsMode, Trail};

/// The Santa Fe trail: 32x32 cells, 89 food, ant starts at the top-left corner facing right
pub const SANTA_FE: &str = include_str!("../trails/santa_fe.txt");
