use crate::{Error, Grid, Random, Result};
use rand_distr::Bernoulli;

/// Random starting grid: each cell is independently alive with probability
/// `density`. Inputs are checked before any sampling.
pub fn noisy_grid(dimension: usize, density: f64, rand: &mut Random) -> Result<Grid> {
    if dimension == 0 {
        return Err(Error::InvalidDimension(dimension));
    }
    let cell_alive = Bernoulli::new(density).map_err(|_| Error::InvalidDensity(density))?;
    Grid::from_fn(dimension, |_loc| rand.sample(cell_alive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_density() {
        let mut rand = Random::from_seed(1);
        for density in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                noisy_grid(4, density, &mut rand),
                Err(Error::InvalidDensity(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_grid() {
        let mut rand = Random::from_seed(1);
        assert_eq!(
            noisy_grid(0, 0.5, &mut rand),
            Err(Error::InvalidDimension(0))
        );
    }

    #[test]
    fn extreme_densities_are_uniform() {
        let mut rand = Random::from_seed(7);
        assert_eq!(noisy_grid(6, 0.0, &mut rand).unwrap().count_live(), 0);
        assert_eq!(noisy_grid(6, 1.0, &mut rand).unwrap().count_live(), 36);
    }

    #[test]
    fn same_seed_same_grid() {
        let first = noisy_grid(20, 0.47, &mut Random::from_seed(42)).unwrap();
        let second = noisy_grid(20, 0.47, &mut Random::from_seed(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn density_is_roughly_respected() {
        let grid = noisy_grid(100, 0.47, &mut Random::from_seed(3)).unwrap();
        let fraction = grid.count_live() as f64 / grid.num_cells() as f64;
        assert!((0.42..0.52).contains(&fraction), "live fraction {fraction}");
    }
}
