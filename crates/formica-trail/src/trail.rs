//! Dense trail grid
//!
//! Cells are stored row-major over the full parsed extent (`columns` x `rows`).
//! Movement is limited to the `width` x `height` bounds, which never exceed
//! the storage extent.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Cell, TrailError};

/// How movement bounds are derived from a parsed trail
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsMode {
    /// Bounds cover every parsed row and column
    #[default]
    Exact,
    /// Bounds are the last loop indices seen while parsing: the last character
    /// index of the last row (line terminator included) and the last row index.
    /// Matches trail files tuned against older tooling, where the bottom row
    /// is unreachable.
    Legacy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrailRepr")]
pub struct Trail {
    columns: usize,
    rows: usize,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Trail {
    /// Build a trail from row-major cells with bounds equal to the storage extent.
    /// Missing cells are padded with `Empty`, extra cells are dropped.
    pub fn new(columns: usize, rows: usize, mut cells: Vec<Cell>) -> Self {
        cells.resize(columns * rows, Cell::Empty);
        Self {
            columns,
            rows,
            width: columns as i32,
            height: rows as i32,
            cells,
        }
    }

    /// An all-empty trail
    pub fn empty(columns: usize, rows: usize) -> Self {
        Self::new(columns, rows, Vec::new())
    }

    /// Narrow the movement bounds (capped to the storage extent)
    pub fn with_bounds(mut self, width: i32, height: i32) -> Self {
        self.width = width.clamp(0, self.columns as i32);
        self.height = height.clamp(0, self.rows as i32);
        self
    }

    /// Movement bound along x
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Movement bound along y
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Stored columns (longest parsed row)
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Stored rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.columns && y < self.rows).then_some(y * self.columns + x)
    }

    /// Cell at `pos`, or `None` outside the stored extent
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Cell at `pos`; anything outside the stored extent reads as `Empty`
    pub fn cell(&self, pos: IVec2) -> Cell {
        self.get(pos).unwrap_or_default()
    }

    pub fn is_food(&self, pos: IVec2) -> bool {
        self.cell(pos).is_food()
    }

    /// Overwrite a cell. Returns false if `pos` is outside the stored extent.
    pub fn set(&mut self, pos: IVec2, cell: Cell) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Consume the food at `pos`, leaving open floor.
    /// Returns true if there was food to take.
    pub fn take_food(&mut self, pos: IVec2) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i].is_food() => {
                self.cells[i] = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    /// Clamp each axis independently into `[0, bound - 1]`.
    /// A zero bound pins that axis to 0.
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            pos.x.min(self.width - 1).max(0),
            pos.y.min(self.height - 1).max(0),
        )
    }

    /// Whether `pos` lies inside the movement bounds
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn food_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_food()).count()
    }

    /// Food the ant can actually reach, i.e. inside the movement bounds
    pub fn reachable_food_count(&self) -> usize {
        self.food_positions().filter(|&pos| self.contains(pos)).count()
    }

    pub fn food_positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_food())
            .map(move |(i, _)| IVec2::new((i % columns) as i32, (i / columns) as i32))
    }

    /// Copy `source` into this trail, reusing the cell allocation
    pub fn restore_from(&mut self, source: &Trail) {
        self.columns = source.columns;
        self.rows = source.rows;
        self.width = source.width;
        self.height = source.height;
        self.cells.clone_from(&source.cells);
    }
}

/// Unchecked serialized form; converted through [`Trail::try_from`]
#[derive(Deserialize)]
struct TrailRepr {
    columns: usize,
    rows: usize,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TryFrom<TrailRepr> for Trail {
    type Error = TrailError;

    /// Rejects a cell buffer that does not match the extent and caps the bounds to it
    fn try_from(repr: TrailRepr) -> Result<Self, Self::Error> {
        let expected = repr.columns.saturating_mul(repr.rows);
        if repr.cells.len() != expected {
            return Err(TrailError::CellCount {
                expected,
                found: repr.cells.len(),
            });
        }
        Ok(Trail::new(repr.columns, repr.rows, repr.cells).with_bounds(repr.width, repr.height))
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
