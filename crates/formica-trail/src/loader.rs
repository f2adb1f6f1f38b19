//! Text trail loader
//!
//! Format: one row per line, top row first.
//! - `#` is food
//! - `^ > v <` marks the ant start and heading (the cell itself is open floor)
//! - anything else is open floor
//!
//! Exactly one start marker is required.

use glam::IVec2;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::{BoundsMode, Cell, Heading, Trail, TrailError};

/// A parsed trail together with the ant's start pose.
/// Only produced by a successful load, so it always has exactly one start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailDefinition {
    trail: Trail,
    start: IVec2,
    heading: Heading,
}

impl TrailDefinition {
    /// The pristine grid, as parsed
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl FromStr for TrailDefinition {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrailLoader::default().parse_str(s)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TrailLoader {
    bounds: BoundsMode,
}

impl TrailLoader {
    pub fn new(bounds: BoundsMode) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> BoundsMode {
        self.bounds
    }

    /// Parse rows of a trail definition.
    ///
    /// Lines may still carry their `\n` / `\r\n` terminator; terminators never
    /// become cells, but `BoundsMode::Legacy` counts them when deriving the width.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<TrailDefinition, TrailError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        let mut start: Option<(IVec2, Heading)> = None;
        let mut last_column = 0usize;

        for (y, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let glyphs = line.trim_end_matches(['\n', '\r']);

            let mut row = Vec::with_capacity(glyphs.len());
            for (x, glyph) in glyphs.chars().enumerate() {
                if let Some(heading) = Heading::from_glyph(glyph) {
                    let pos = IVec2::new(x as i32, y as i32);
                    if let Some((first, _)) = start {
                        return Err(TrailError::MultipleStarts { first, second: pos });
                    }
                    start = Some((pos, heading));
                }
                row.push(Cell::from_glyph(glyph));
            }

            // An empty line leaves the previous row's last index in place
            if let Some(index) = line.chars().count().checked_sub(1) {
                last_column = index;
            }
            rows.push(row);
        }

        let Some((start, heading)) = start else {
            return Err(TrailError::NoStart);
        };

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(columns * row_count);
        for mut row in rows {
            row.resize(columns, Cell::Empty);
            cells.extend(row);
        }

        let trail = Trail::new(columns, row_count, cells);
        let trail = match self.bounds {
            BoundsMode::Exact => trail,
            BoundsMode::Legacy => trail.with_bounds(last_column as i32, row_count as i32 - 1),
        };

        log::debug!(
            "Parsed trail: {}x{} cells, bounds {}x{}, {} food, start {} facing {}",
            columns,
            row_count,
            trail.width(),
            trail.height(),
            trail.food_count(),
            start,
            heading
        );

        Ok(TrailDefinition {
            trail,
            start,
            heading,
        })
    }

    pub fn parse_str(&self, text: &str) -> Result<TrailDefinition, TrailError> {
        self.parse_lines(text.split_inclusive('\n'))
    }

    pub fn read(&self, mut reader: impl Read) -> Result<TrailDefinition, TrailError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_str(&text)
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<TrailDefinition, TrailError> {
        let path = path.as_ref();
        log::info!("Loading trail from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        self.parse_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SANTA_FE;
    use proptest::prelude::*;

    #[test]
    fn test_heading_glyphs() {
        let cases = [
            ('^', Heading::Up),
            ('>', Heading::Right),
            ('v', Heading::Down),
            ('<', Heading::Left),
        ];
        for (glyph, heading) in cases {
            let text = format!("..#\n.{glyph}.\n...\n");
            let def: TrailDefinition = text.parse().expect("single start should load");
            assert_eq!(def.heading(), heading);
            assert_eq!(def.start(), IVec2::new(1, 1));
            assert_eq!(def.trail().cell(def.start()), Cell::Empty);
        }
    }

    #[test]
    fn test_multiple_starts() {
        let err = "^..\n..<\n".parse::<TrailDefinition>().unwrap_err();
        match err {
            TrailError::MultipleStarts { first, second } => {
                assert_eq!(first, IVec2::new(0, 0));
                assert_eq!(second, IVec2::new(2, 1));
            }
            other => panic!("expected MultipleStarts, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_starts_same_row() {
        let err = "^>\n".parse::<TrailDefinition>().unwrap_err();
        assert!(matches!(err, TrailError::MultipleStarts { .. }));
    }

    #[test]
    fn test_no_start() {
        let err = "###\n...\n".parse::<TrailDefinition>().unwrap_err();
        assert!(matches!(err, TrailError::NoStart));
    }

    #[test]
    fn test_empty_input() {
        let err = "".parse::<TrailDefinition>().unwrap_err();
        assert!(matches!(err, TrailError::NoStart));
    }

    #[test]
    fn test_exact_bounds() {
        let def: TrailDefinition = ">.#.\n....\n..#.\n".parse().unwrap();
        assert_eq!(def.trail().width(), 4);
        assert_eq!(def.trail().height(), 3);
        assert_eq!(def.trail().food_count(), 2);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let def: TrailDefinition = ">#\n.\n...#\n".parse().unwrap();
        let trail = def.trail();
        assert_eq!(trail.columns(), 4);
        assert_eq!(trail.rows(), 3);
        assert_eq!(trail.cell(IVec2::new(3, 1)), Cell::Empty);
        assert_eq!(trail.cell(IVec2::new(3, 2)), Cell::Food);
    }

    #[test]
    fn test_crlf_terminators_are_not_cells() {
        let def: TrailDefinition = ">.#\r\n...\r\n".parse().unwrap();
        assert_eq!(def.trail().columns(), 3);
        assert_eq!(def.trail().food_count(), 1);
    }

    #[test]
    fn test_legacy_bounds_with_trailing_newline() {
        let loader = TrailLoader::new(BoundsMode::Legacy);
        let def = loader.parse_str(">.#.\n....\n..#.\n").unwrap();
        // Last row "..#.\n" ends at index 4, last row index is 2
        assert_eq!(def.trail().width(), 4);
        assert_eq!(def.trail().height(), 2);
        // Storage still holds the unreachable bottom row
        assert_eq!(def.trail().food_count(), 2);
    }

    #[test]
    fn test_legacy_bounds_without_trailing_newline() {
        let loader = TrailLoader::new(BoundsMode::Legacy);
        let def = loader.parse_str(">.#.\n....\n..#.").unwrap();
        assert_eq!(def.trail().width(), 3);
        assert_eq!(def.trail().height(), 2);
    }

    #[test]
    fn test_legacy_bounds_capped_for_crlf() {
        let loader = TrailLoader::new(BoundsMode::Legacy);
        let def = loader.parse_str(">..\r\n...\r\n").unwrap();
        assert_eq!(def.trail().width(), 3);
    }

    #[test]
    fn test_parse_lines_without_terminators() {
        let def = TrailLoader::default()
            .parse_lines(["#v#", "###"])
            .unwrap();
        assert_eq!(def.heading(), Heading::Down);
        assert_eq!(def.trail().food_count(), 5);
    }

    #[test]
    fn test_read() {
        let def = TrailLoader::default()
            .read(std::io::Cursor::new(b"<#\n".to_vec()))
            .unwrap();
        assert_eq!(def.start(), IVec2::ZERO);
        assert_eq!(def.heading(), Heading::Left);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TrailLoader::default()
            .load_path("this/trail/does/not/exist.txt")
            .unwrap_err();
        assert!(matches!(err, TrailError::Io(_)));
    }

    #[test]
    fn test_santa_fe() {
        let def: TrailDefinition = SANTA_FE.parse().unwrap();
        assert_eq!(def.trail().width(), 32);
        assert_eq!(def.trail().height(), 32);
        assert_eq!(def.trail().food_count(), 89);
        assert_eq!(def.start(), IVec2::ZERO);
        assert_eq!(def.heading(), Heading::Right);
    }

    proptest! {
        #[test]
        fn prop_single_start_loads_anywhere(
            columns in 1usize..12,
            rows in 1usize..12,
            sx in 0usize..12,
            sy in 0usize..12,
            glyph_index in 0usize..4,
        ) {
            let sx = sx % columns;
            let sy = sy % rows;
            let heading = Heading::ALL[glyph_index];

            let mut text = String::new();
            for y in 0..rows {
                for x in 0..columns {
                    text.push(if (x, y) == (sx, sy) { heading.glyph() } else { '#' });
                }
                text.push('\n');
            }

            let def: TrailDefinition = text.parse().unwrap();
            prop_assert_eq!(def.start(), IVec2::new(sx as i32, sy as i32));
            prop_assert_eq!(def.heading(), heading);
            prop_assert_eq!(def.trail().food_count(), columns * rows - 1);
        }
    }
}
