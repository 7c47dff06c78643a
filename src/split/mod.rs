//! Split strategies: given a node, choose `(dimension, threshold)`.
//!
//! Every strategy implements [`SplitStrategy`] and is picked at build time through
//! [`StrategyKind`]. Randomized strategies draw from the generator passed in by the caller;
//! none of them touch global random state.
//!
//! | Strategy | Module | Candidate coordinates from |
//! |---|---|---|
//! | Exhaustive mistake minimization | [`mistakes`] | centers + points |
//! | Range-weighted random threshold | [`range_weighted`] | centers |
//! | Pairwise bounding-box sampling | [`pairwise_box`] | centers |

pub mod mistakes;
pub mod pairwise_box;
pub mod range_weighted;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClusteringError, InvariantViolation, Result};
use crate::metric::{Norm, Point};
use crate::node::{ClusterNode, Split, WorkingSet};

pub use mistakes::{count_mistakes, MistakeMinimizing};
pub use pairwise_box::PairwiseBox;
pub use range_weighted::RangeWeighted;

/// Upper bound on resampling when a randomized draw lands on a degenerate threshold.
pub const MAX_SPLIT_ATTEMPTS: usize = 32;

pub trait SplitStrategy {
    fn name(&self) -> &'static str;

    /// Entities the strategy draws candidate coordinates from.
    fn working_set(&self) -> WorkingSet;

    /// Chooses a split that leaves at least one center on each side.
    fn find_split(&self, node: &ClusterNode, rng: &mut dyn RngCore) -> Result<Split>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    #[serde(alias = "imm")]
    MistakeMinimizing,
    #[serde(alias = "esfandiari")]
    RangeWeighted,
    #[serde(alias = "makarychev")]
    PairwiseBox,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::MistakeMinimizing,
        StrategyKind::RangeWeighted,
        StrategyKind::PairwiseBox,
    ];

    pub fn build(&self, norm: Norm) -> Box<dyn SplitStrategy> {
        match self {
            StrategyKind::MistakeMinimizing => Box::new(MistakeMinimizing),
            StrategyKind::RangeWeighted => Box::new(RangeWeighted),
            StrategyKind::PairwiseBox => Box::new(PairwiseBox::new(norm)),
        }
    }

    pub fn is_randomized(&self) -> bool {
        !matches!(self, StrategyKind::MistakeMinimizing)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::MistakeMinimizing => write!(f, "mistake-minimizing"),
            StrategyKind::RangeWeighted => write!(f, "range-weighted"),
            StrategyKind::PairwiseBox => write!(f, "pairwise-box"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mistake-minimizing" | "imm" => Ok(StrategyKind::MistakeMinimizing),
            "range-weighted" | "esfandiari" => Ok(StrategyKind::RangeWeighted),
            "pairwise-box" | "makarychev" => Ok(StrategyKind::PairwiseBox),
            other => Err(ClusteringError::InvalidConfig(format!(
                "unsupported split strategy '{other}'"
            ))),
        }
    }
}

/// Rejects nodes no strategy should ever be asked to split.
pub(crate) fn ensure_splittable(node: &ClusterNode) -> Result<()> {
    match node.num_centers() {
        0 => Err(InvariantViolation::EmptyNode.into()),
        1 => Err(InvariantViolation::SplitOfHomogeneousNode.into()),
        _ => Ok(()),
    }
}

/// `[min, max]` of the center coordinates along `dimension`.
pub(crate) fn center_range(centers: &[Point], dimension: usize) -> (f64, f64) {
    centers.iter().map(|c| c.coord(dimension)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), x| (lo.min(x), hi.max(x)),
    )
}

/// True when `split` puts at least one center on each side.
pub(crate) fn separates(centers: &[Point], split: Split) -> bool {
    let left = centers.iter().filter(|c| split.goes_left(c)).count();
    left > 0 && left < centers.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!(
            "imm".parse::<StrategyKind>().unwrap(),
            StrategyKind::MistakeMinimizing
        );
        assert_eq!(
            "Makarychev".parse::<StrategyKind>().unwrap(),
            StrategyKind::PairwiseBox
        );
        assert!("greedy".parse::<StrategyKind>().is_err());

        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.build(Norm::L1).name(), kind.to_string());
        }
    }

    #[test]
    fn test_center_range_and_separation() {
        let centers = vec![
            Point::new(vec![1.0, 5.0]),
            Point::new(vec![3.0, 5.0]),
            Point::new(vec![2.0, 5.0]),
        ];
        assert_eq!(center_range(&centers, 0), (1.0, 3.0));
        assert_eq!(center_range(&centers, 1), (5.0, 5.0));

        assert!(separates(&centers, Split::new(0, 1.5)));
        assert!(!separates(&centers, Split::new(0, 3.0)));
        assert!(!separates(&centers, Split::new(1, 5.0)));
    }
}
