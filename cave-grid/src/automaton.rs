use crate::{Error, Grid, Loc, Neighborhood, Result, Rule, StateHistory};
use log::{debug, trace};
use rayon::prelude::*;

/// How a generation's cells are visited. Both modes read only the previous
/// grid, so they produce identical results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scan {
    #[default]
    Sequential,
    /// One rayon task per row.
    Parallel,
}

#[derive(Clone, Debug)]
pub struct Automaton<R: Rule> {
    rule: R,
    scan: Scan,
}

impl<R: Rule> Automaton<R> {
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            scan: Scan::default(),
        }
    }

    pub fn with_scan(mut self, scan: Scan) -> Self {
        self.scan = scan;
        self
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn scan(&self) -> Scan {
        self.scan
    }

    /// Runs `iterations` steps from `initial` and returns all `iterations + 1`
    /// grids. A negative count is rejected before any scanning.
    pub fn run(&self, initial: Grid, iterations: i64) -> Result<StateHistory> {
        let iterations =
            usize::try_from(iterations).map_err(|_| Error::InvalidIterationCount(iterations))?;

        trace!("{:?} scan of {} generations", self.scan, iterations);
        let mut history = StateHistory::with_capacity(initial, iterations.saturating_add(1));
        for generation in 1..=iterations {
            let next = self.step(history.latest());
            debug!("generation {}: {} live cells", generation, next.count_live());
            history.push(next);
        }
        Ok(history)
    }

    /// Computes one synchronous generation: every cell of the result is
    /// decided from `grid` alone.
    pub fn step(&self, grid: &Grid) -> Grid {
        let dimension = grid.dimension();
        let mut next_cells = vec![false; grid.num_cells()];
        match self.scan {
            Scan::Sequential => {
                for (row, next_row) in next_cells.chunks_exact_mut(dimension).enumerate() {
                    self.update_row(grid, row, next_row);
                }
            }
            Scan::Parallel => {
                next_cells
                    .par_chunks_exact_mut(dimension)
                    .enumerate()
                    .for_each(|(row, next_row)| self.update_row(grid, row, next_row));
            }
        }
        Grid::from_cells(dimension, next_cells)
    }

    fn update_row(&self, grid: &Grid, row: usize, next_row: &mut [bool]) {
        for (col, next_cell) in next_row.iter_mut().enumerate() {
            *next_cell = self.update_cell(grid, Loc::new(row, col));
        }
    }

    fn update_cell(&self, grid: &Grid, loc: Loc) -> bool {
        let neighborhood = Neighborhood::new(grid, loc);
        self.rule.apply(&neighborhood)
    }
}

/// Shorthand for `Automaton::new(rule).run(initial, iterations)`.
pub fn run_automaton<R: Rule>(initial: Grid, rule: R, iterations: i64) -> Result<StateHistory> {
    Automaton::new(rule).run(initial, iterations)
}
