use crate::{Grid, Loc};

const OFFSETS: [isize; 3] = [-1, 0, 1];

/// The 3x3 block of cells centered on one grid cell. `cell(1, 1)` is the
/// center. Positions past the edge of the grid read as dead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    cells: [[bool; 3]; 3],
}

impl Neighborhood {
    pub fn new(grid: &Grid, center: Loc) -> Self {
        let mut cells = [[false; 3]; 3];
        for (row, d_row) in OFFSETS.iter().enumerate() {
            for (col, d_col) in OFFSETS.iter().enumerate() {
                cells[row][col] = grid.get_bounded(
                    center.row as isize + d_row,
                    center.col as isize + d_col,
                );
            }
        }
        Self { cells }
    }

    pub fn from_cells(cells: [[bool; 3]; 3]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[bool; 3]; 3] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub fn center(&self) -> bool {
        self.cells[1][1]
    }

    /// Live cells in the whole block, center included.
    pub fn count_live(&self) -> u32 {
        self.cells.iter().flatten().filter(|&&alive| alive).count() as u32
    }

    pub fn diagonal_cells(&self) -> [bool; 4] {
        [
            self.cells[0][0],
            self.cells[0][2],
            self.cells[2][0],
            self.cells[2][2],
        ]
    }
}
