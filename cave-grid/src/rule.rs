use crate::{Error, Neighborhood};
use std::fmt;
use std::str::FromStr;

/// Decides the next state of a neighborhood's center cell. Implementations
/// must be deterministic; they are called concurrently by parallel scans.
pub trait Rule: Send + Sync {
    fn apply(&self, neighborhood: &Neighborhood) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&Neighborhood) -> bool + Send + Sync,
{
    fn apply(&self, neighborhood: &Neighborhood) -> bool {
        self(neighborhood)
    }
}

/// Alive iff at least `threshold` of the nine cells, center included, are
/// alive. Smooths noise into cave-like walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MajorityThreshold {
    threshold: u32,
}

impl MajorityThreshold {
    pub const DEFAULT_THRESHOLD: u32 = 5;

    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for MajorityThreshold {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl Rule for MajorityThreshold {
    fn apply(&self, neighborhood: &Neighborhood) -> bool {
        neighborhood.count_live() >= self.threshold
    }
}

/// Alive iff any of the four diagonal neighbors is alive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiagonalAdjacency;

impl Rule for DiagonalAdjacency {
    fn apply(&self, neighborhood: &Neighborhood) -> bool {
        neighborhood.diagonal_cells().contains(&true)
    }
}

/// The built-in rules, selectable by name.
///
/// Accepted names: `majority` (alias `mostly-walls`), optionally followed by
/// `:<threshold>`, and `diagonal` (alias `sides`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Majority(MajorityThreshold),
    Diagonal(DiagonalAdjacency),
}

impl Default for RuleKind {
    fn default() -> Self {
        RuleKind::Majority(MajorityThreshold::default())
    }
}

impl Rule for RuleKind {
    fn apply(&self, neighborhood: &Neighborhood) -> bool {
        match self {
            RuleKind::Majority(rule) => rule.apply(neighborhood),
            RuleKind::Diagonal(rule) => rule.apply(neighborhood),
        }
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownRule(text.to_string());
        let (name, threshold) = match text.trim().split_once(':') {
            Some((name, threshold)) => (name, Some(threshold)),
            None => (text.trim(), None),
        };
        match (name.to_ascii_lowercase().as_str(), threshold) {
            ("majority" | "mostly-walls", None) => Ok(Self::default()),
            ("majority" | "mostly-walls", Some(threshold)) => threshold
                .trim()
                .parse()
                .map(|threshold| RuleKind::Majority(MajorityThreshold::new(threshold)))
                .map_err(|_| unknown()),
            ("diagonal" | "sides", None) => Ok(RuleKind::Diagonal(DiagonalAdjacency)),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Majority(rule) => write!(f, "majority:{}", rule.threshold()),
            RuleKind::Diagonal(_) => write!(f, "diagonal"),
        }
    }
}
