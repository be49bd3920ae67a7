use crate::{Error, Result};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

const LIVE_CHAR: char = '#';
const DEAD_CHAR: char = '.';

/// Square grid of live/dead cells. Never mutated once built; each generation
/// of an automaton run is a new `Grid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    dimension: usize,
}

impl Grid {
    /// All-dead grid.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::from_fn(dimension, |_loc| false)
    }

    /// Builds a grid by asking `fill` for each cell, in row-major order.
    pub fn from_fn<F>(dimension: usize, mut fill: F) -> Result<Self>
    where
        F: FnMut(Loc) -> bool,
    {
        let mut cells = Self::reserve_cells(dimension)?;
        for row in 0..dimension {
            for col in 0..dimension {
                cells.push(fill(Loc::new(row, col)));
            }
        }
        Ok(Self { cells, dimension })
    }

    pub(crate) fn from_cells(dimension: usize, cells: Vec<bool>) -> Self {
        debug_assert!(dimension > 0);
        debug_assert_eq!(cells.len(), dimension * dimension);
        Self { cells, dimension }
    }

    /// Empty cell buffer sized for a `dimension` x `dimension` grid. Zero, an
    /// overflowing cell count, or a buffer that cannot be allocated is an
    /// invalid dimension.
    fn reserve_cells(dimension: usize) -> Result<Vec<bool>> {
        let num_cells = match dimension.checked_mul(dimension) {
            Some(num_cells) if num_cells > 0 => num_cells,
            _ => return Err(Error::InvalidDimension(dimension)),
        };
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(num_cells)
            .map_err(|_| Error::InvalidDimension(dimension))?;
        Ok(cells)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Panics if the cell is off the grid; see `get_bounded` for the
    /// forgiving version.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self[Loc::new(row, col)]
    }

    /// Reads a cell by signed coordinates. Anything outside the grid is dead.
    pub fn get_bounded(&self, row: isize, col: isize) -> bool {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => self.cell(Loc::new(row, col)).unwrap_or(false),
            _ => false,
        }
    }

    pub fn cell(&self, loc: Loc) -> Option<bool> {
        loc.grid_index(self.dimension)
            .map(|index| self.cells[index])
    }

    pub fn count_live(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[bool]> + Clone {
        self.cells.chunks_exact(self.dimension)
    }
}

impl Index<Loc> for Grid {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        loc.grid_index(self.dimension)
            .map(|index| &self.cells[index])
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|&alive| if alive { LIVE_CHAR } else { DEAD_CHAR })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(Error::MalformedGrid("no rows".to_string()));
        }

        let dimension = lines.len();
        let mut cells = Self::reserve_cells(dimension)?;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != dimension {
                return Err(Error::MalformedGrid(format!(
                    "row {row} has {width} cells, expected {dimension}"
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    LIVE_CHAR => true,
                    DEAD_CHAR => false,
                    other => {
                        return Err(Error::MalformedGrid(format!(
                            "unexpected {other:?} at row {row}, col {col}"
                        )));
                    }
                });
            }
        }
        Ok(Self::from_cells(dimension, cells))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: usize,
    pub col: usize,
}

impl Loc {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, dimension: usize) -> Option<usize> {
        if self.row < dimension && self.col < dimension {
            Some(self.row * dimension + self.col)
        } else {
            None
        }
    }
}
