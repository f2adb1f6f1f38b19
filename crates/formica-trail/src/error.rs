//! Trail loading errors

use glam::IVec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrailError {
    /// A second start marker was found
    #[error("multiple start positions in trail: {first} and {second}")]
    MultipleStarts { first: IVec2, second: IVec2 },

    /// No `^ > v <` marker anywhere in the trail
    #[error("no starting position found in trail")]
    NoStart,

    /// A serialized trail whose cell buffer does not match its extent
    #[error("trail cell buffer holds {found} cells, expected {expected} cells")]
    CellCount { expected: usize, found: usize },

    #[error("failed to read trail definition")]
    Io(#[from] std::io::Error),
}
