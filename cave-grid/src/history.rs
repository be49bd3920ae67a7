use crate::Grid;
use std::ops::Index;
use std::slice::Iter;

/// Every generation of a run, in order. Index 0 is the initial grid and
/// index `i` is the grid after `i` steps. Only the engine appends to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateHistory {
    states: Vec<Grid>,
}

const MAX_RESERVED_STATES: usize = 1024;

#[allow(clippy::len_without_is_empty)]
impl StateHistory {
    /// Reserves room for up to `capacity` states; larger runs grow as they go.
    pub(crate) fn with_capacity(initial: Grid, capacity: usize) -> Self {
        let mut states = Vec::with_capacity(capacity.clamp(1, MAX_RESERVED_STATES));
        states.push(initial);
        Self { states }
    }

    pub(crate) fn push(&mut self, grid: Grid) {
        debug_assert_eq!(grid.dimension(), self.dimension());
        self.states.push(grid);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Number of steps taken, i.e. `len() - 1`.
    pub fn generations(&self) -> usize {
        self.states.len() - 1
    }

    pub fn dimension(&self) -> usize {
        self.initial().dimension()
    }

    pub fn initial(&self) -> &Grid {
        &self.states[0]
    }

    pub fn latest(&self) -> &Grid {
        &self.states[self.states.len() - 1]
    }

    pub fn get(&self, generation: usize) -> Option<&Grid> {
        self.states.get(generation)
    }

    pub fn iter(&self) -> Iter<'_, Grid> {
        self.states.iter()
    }

    /// Live cell count per generation.
    pub fn live_cell_counts(&self) -> Vec<usize> {
        self.states.iter().map(Grid::count_live).collect()
    }

    pub fn into_states(self) -> Vec<Grid> {
        self.states
    }
}

impl Index<usize> for StateHistory {
    type Output = Grid;

    fn index(&self, generation: usize) -> &Self::Output {
        &self.states[generation]
    }
}

impl<'a> IntoIterator for &'a StateHistory {
    type Item = &'a Grid;
    type IntoIter = Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl IntoIterator for StateHistory {
    type Item = Grid;
    type IntoIter = std::vec::IntoIter<Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}
