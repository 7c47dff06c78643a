//! Randomized range-weighted split (Esfandiari et al.).
//!
//! 1. For each dimension i compute the center range `R_i = max_c c_i - min_c c_i`.
//! 2. Sample dimension r with probability `R_r / Σ R_i`. Zero-range axes get zero weight.
//! 3. Sample `t` uniformly in `[min_c c_r, max_c c_r]`.
//!
//! Drawing `t = max` would leave the right side empty; such draws are resampled, at most
//! [`MAX_SPLIT_ATTEMPTS`] times. A span that overflows `f64` (centers near `±f64::MAX`) is
//! reported as invalid input.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use super::{center_range, ensure_splittable, separates, SplitStrategy, MAX_SPLIT_ATTEMPTS};
use crate::error::{InputError, InvariantViolation, Result};
use crate::metric::Point;
use crate::node::{ClusterNode, Split, WorkingSet};

#[derive(Clone, Copy, Debug, Default)]
pub struct RangeWeighted;

impl SplitStrategy for RangeWeighted {
    fn name(&self) -> &'static str {
        "range-weighted"
    }

    fn working_set(&self) -> WorkingSet {
        WorkingSet::CentersOnly
    }

    fn find_split(&self, node: &ClusterNode, rng: &mut dyn RngCore) -> Result<Split> {
        ensure_splittable(node)?;

        let centers: Vec<Point> = node.members(self.working_set()).cloned().collect();
        let ranges: Vec<(f64, f64)> = (0..node.dimension())
            .map(|i| center_range(&centers, i))
            .collect();
        let weights: Vec<f64> = ranges.iter().map(|(lo, hi)| hi - lo).collect();
        // The sampler needs a finite total as well as finite weights.
        if !weights.iter().sum::<f64>().is_finite() {
            return Err(InputError::NumericOverflow {
                quantity: "center coordinate span",
            }
            .into());
        }

        // Fails iff every weight is zero, i.e. all centers coincide.
        let axis = WeightedIndex::new(&weights).map_err(|_| InvariantViolation::NoSplitCandidates {
            strategy: self.name(),
        })?;

        for attempt in 0..MAX_SPLIT_ATTEMPTS {
            let dimension = axis.sample(rng);
            let (lo, hi) = ranges[dimension];
            let split = Split::new(dimension, rng.gen_range(lo..=hi));
            if separates(&centers, split) {
                return Ok(split);
            }
            tracing::trace!(attempt, %split, "range-weighted draw separated nothing, resampling");
        }

        Err(InvariantViolation::RetriesExhausted {
            strategy: self.name(),
            attempts: MAX_SPLIT_ATTEMPTS,
        }
        .into())
    }
}
