//! Randomized pairwise bounding-box split (Makarychev et al.).
//!
//! For every pair of distinct centers, take the axis-aligned box they span and its measure
//! `μ = Σ_i (max_i - min_i)`. Let `D` be the largest pairwise center distance and `k'` the
//! node's center count. Boxes with `μ <= D / k'³` are dropped as negligible.
//!
//! The kept boxes are laid end to end, each side of each box contributing a segment as long
//! as its extent. A uniform `z` over the total length picks a box, then a side (dimension),
//! then an offset into that side: the threshold is the box's lower corner on that dimension
//! plus the offset. The drawn threshold lies in `[lo, hi)` of a box spanned by two centers,
//! so those two centers always end up on different sides.
//!
//! Unordered pairs are used: ordered pairs list every box twice, which leaves the sampling
//! distribution unchanged.
//!
//! Coordinates far enough apart to overflow the diameter or the laid-out length are reported
//! as [`InputError::NumericOverflow`].

use rand::{Rng, RngCore};

use super::{ensure_splittable, separates, SplitStrategy, MAX_SPLIT_ATTEMPTS};
use crate::error::{InputError, InvariantViolation, Result};
use crate::metric::{Norm, Point};
use crate::node::{ClusterNode, Split, WorkingSet};

#[derive(Clone, Copy, Debug, Default)]
pub struct PairwiseBox {
    norm: Norm,
}

/// Box spanned by two centers.
#[derive(Clone, Debug, PartialEq)]
pub struct PairBox {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl PairBox {
    pub fn spanned_by(a: &Point, b: &Point) -> Self {
        let (lower, upper) = a
            .coords()
            .iter()
            .zip(b.coords())
            .map(|(&x, &y)| (x.min(y), x.max(y)))
            .unzip();
        Self { lower, upper }
    }

    /// Sum of side lengths.
    pub fn measure(&self) -> f64 {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| hi - lo)
            .sum()
    }

    /// Maps an offset in `[0, measure)` to a threshold on one side of the box.
    fn locate(&self, mut offset: f64) -> Option<Split> {
        for (dimension, (lo, hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            let extent = hi - lo;
            if extent <= 0.0 {
                continue;
            }
            if offset < extent {
                return Some(Split::new(dimension, lo + offset));
            }
            offset -= extent;
        }
        None
    }
}

impl PairwiseBox {
    pub fn new(norm: Norm) -> Self {
        Self { norm }
    }

    /// The boxes that survive the `D / k'³` cut, in pair order.
    pub fn large_boxes(&self, centers: &[Point]) -> Result<Vec<PairBox>> {
        let k = centers.len();
        let mut diameter = 0.0_f64;
        let mut boxes = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for i in 0..k {
            for j in (i + 1)..k {
                diameter = diameter.max(self.norm.distance(&centers[i], &centers[j]));
                boxes.push(PairBox::spanned_by(&centers[i], &centers[j]));
            }
        }
        if !diameter.is_finite() {
            return Err(InputError::NumericOverflow {
                quantity: "center diameter",
            }
            .into());
        }
        if diameter <= 0.0 {
            return Ok(Vec::new());
        }

        let cut = diameter / (k as f64).powi(3);
        boxes.retain(|b| b.measure() > cut);
        Ok(boxes)
    }
}

impl SplitStrategy for PairwiseBox {
    fn name(&self) -> &'static str {
        "pairwise-box"
    }

    fn working_set(&self) -> WorkingSet {
        WorkingSet::CentersOnly
    }

    fn find_split(&self, node: &ClusterNode, rng: &mut dyn RngCore) -> Result<Split> {
        ensure_splittable(node)?;

        let centers: Vec<Point> = node.members(self.working_set()).cloned().collect();
        let boxes = self.large_boxes(&centers)?;
        if boxes.is_empty() {
            return Err(InvariantViolation::NoSplitCandidates {
                strategy: self.name(),
            }
            .into());
        }

        // cumulative[b] = total measure of boxes[..=b]
        let cumulative: Vec<f64> = boxes
            .iter()
            .scan(0.0, |acc, b| {
                *acc += b.measure();
                Some(*acc)
            })
            .collect();
        let total = cumulative[cumulative.len() - 1];
        if !total.is_finite() {
            return Err(InputError::NumericOverflow {
                quantity: "total box measure",
            }
            .into());
        }

        for attempt in 0..MAX_SPLIT_ATTEMPTS {
            let z = rng.gen_range(0.0..total);
            let idx = cumulative
                .partition_point(|&end| end <= z)
                .min(boxes.len() - 1);
            let start = if idx == 0 { 0.0 } else { cumulative[idx - 1] };

            match boxes[idx].locate(z - start) {
                Some(split) if separates(&centers, split) => return Ok(split),
                drawn => {
                    tracing::trace!(attempt, ?drawn, "pairwise-box draw was degenerate, resampling");
                }
            }
        }

        Err(InvariantViolation::RetriesExhausted {
            strategy: self.name(),
            attempts: MAX_SPLIT_ATTEMPTS,
        }
        .into())
    }
}
