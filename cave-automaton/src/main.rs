#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod analysis;

use anyhow::{Context, Result};
use cave_grid::{Automaton, Random, RuleKind, Scan, StateHistory, noisy_grid};
use cave_pixels_support::{Playback, animate};
use clap::Parser;
use log::info;
use std::time::Duration;

const DIMENSION: usize = 100;
const DENSITY: f64 = 0.47;
const ITERATIONS: i64 = 8;
const FRAME_MILLIS: u64 = 180;
const REPEAT_DELAY_MILLIS: u64 = 2000;
const CHART_WIDTH: usize = 60;

/// Grow a cave-like map from random noise with a cellular automaton.
#[derive(Debug, Parser)]
#[command(name = "cave-automaton")]
struct Args {
    /// Side length of the square grid.
    #[arg(long, default_value_t = DIMENSION)]
    dimension: usize,

    /// Probability that a starting cell is alive, in [0, 1].
    #[arg(long, default_value_t = DENSITY)]
    density: f64,

    /// `majority[:threshold]` (alias `mostly-walls`) or `diagonal` (alias `sides`).
    #[arg(long, default_value_t = RuleKind::default())]
    rule: RuleKind,

    #[arg(long, default_value_t = ITERATIONS, allow_negative_numbers = true)]
    iterations: i64,

    /// Seed for the starting noise; random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Compute rows of each generation in parallel.
    #[arg(long)]
    parallel: bool,

    /// Skip the animation window.
    #[arg(long)]
    headless: bool,

    /// Print every generation as text.
    #[arg(long)]
    print_frames: bool,

    /// Time each generation stays on screen.
    #[arg(long, default_value_t = FRAME_MILLIS, value_parser = clap::value_parser!(u64).range(1..))]
    frame_millis: u64,

    /// Time the last generation stays on screen before looping.
    #[arg(long, default_value_t = REPEAT_DELAY_MILLIS, value_parser = clap::value_parser!(u64).range(1..))]
    repeat_delay_millis: u64,
}

impl Args {
    fn random(&self) -> Random {
        self.seed.map_or_else(Random::new, Random::from_seed)
    }

    fn scan(&self) -> Scan {
        if self.parallel {
            Scan::Parallel
        } else {
            Scan::Sequential
        }
    }

    fn playback(&self) -> Playback {
        Playback {
            frame_interval: Duration::from_millis(self.frame_millis),
            repeat_delay: Duration::from_millis(self.repeat_delay_millis),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    info!("{args:?}");

    let history = run(&args)?;

    if args.print_frames {
        for (generation, grid) in history.iter().enumerate() {
            println!("Generation {generation}\n{grid}");
        }
    }
    print!(
        "{}",
        analysis::live_cell_chart(&history.live_cell_counts(), CHART_WIDTH)
    );

    if !args.headless {
        animate(history, args.playback()).context("Failed to run the animation window")?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<StateHistory> {
    let initial = noisy_grid(args.dimension, args.density, &mut args.random())
        .context("Failed to create the initial grid")?;

    println!("Running program for {} iterations.", args.iterations);
    Automaton::new(args.rule)
        .with_scan(args.scan())
        .run(initial, args.iterations)
        .context("Failed to run the automaton")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_grid::Error;

    fn parse(extra: &[&str]) -> Args {
        let argv = std::iter::once("cave-automaton").chain(extra.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_run() {
        let args = parse(&[]);
        assert_eq!(args.dimension, 100);
        assert_eq!(args.density, 0.47);
        assert_eq!(args.rule, RuleKind::default());
        assert_eq!(args.iterations, 8);
        assert_eq!(args.playback(), Playback::default());
        assert_eq!(args.scan(), Scan::Sequential);
    }

    #[test]
    fn parses_rule_and_flags() {
        let args = parse(&["--rule", "sides", "--parallel", "--seed", "5"]);
        assert_eq!(args.rule, "diagonal".parse::<RuleKind>().unwrap());
        assert_eq!(args.scan(), Scan::Parallel);
        assert_eq!(args.seed, Some(5));
    }

    #[test]
    fn rejects_unknown_rule_at_parse_time() {
        let argv = ["cave-automaton", "--rule", "life"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn rejects_zero_playback_durations() {
        for flag in ["--frame-millis", "--repeat-delay-millis"] {
            let argv = ["cave-automaton", flag, "0"];
            assert!(Args::try_parse_from(argv).is_err(), "{flag} 0 accepted");
        }
        let args = parse(&["--frame-millis", "1", "--repeat-delay-millis", "1"]);
        assert_eq!(args.playback().frame_interval, Duration::from_millis(1));
    }

    #[test]
    fn seeded_runs_repeat() {
        let args = parse(&["--dimension", "12", "--iterations", "3", "--seed", "11"]);
        let first = run(&args).unwrap();
        let second = run(&args).unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn negative_iterations_abort_the_run() {
        let args = parse(&["--dimension", "4", "--iterations", "-1", "--seed", "1"]);
        let err = run(&args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidIterationCount(-1))
        );
    }

    #[test]
    fn bad_density_aborts_the_run() {
        let args = parse(&["--density", "1.5", "--seed", "1"]);
        let err = run(&args).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::InvalidDensity(1.5)));
    }
}
