//! Exhaustive mistake minimization (IMM).
//!
//! A *mistake* of split `x[i] <= t` is a (center, point) pair of the node that lands on
//! opposite sides of `t`. The strategy tries every candidate threshold in every dimension
//! and keeps the first minimum in dimension-major, threshold-ascending order.
//!
//! ## Candidates
//!
//! Along dimension i, let `[l, r]` be the range of the node's center coordinates. The
//! candidate coordinates are the coordinates of the working set (centers and points) inside
//! `[l, r]`, deduplicated. Thresholds are the midpoints of consecutive candidates, so each
//! one lies strictly inside `(l, r)` and separates at least one center to each side.
//! Restricting the working set to the centers alone only keeps the midpoints between
//! centers, a coarser search.
//!
//! ## Counting
//!
//! Pair (c, p) is a mistake at `t` iff `min(c_i, p_i) <= t < max(c_i, p_i)`. With the pair
//! starts and ends sorted, a single sweep over ascending thresholds yields every count in
//! O((n + m) log(n + m)) per dimension instead of O(n · m) for the brute-force scan.
//! [`count_mistakes`] keeps the brute-force definition around for verification.

use ordered_float::OrderedFloat;
use rand::RngCore;

use super::{center_range, ensure_splittable, SplitStrategy};
use crate::error::{InvariantViolation, Result};
use crate::node::{ClusterNode, Split, WorkingSet};

#[derive(Clone, Copy, Debug, Default)]
pub struct MistakeMinimizing;

impl SplitStrategy for MistakeMinimizing {
    fn name(&self) -> &'static str {
        "mistake-minimizing"
    }

    fn working_set(&self) -> WorkingSet {
        WorkingSet::CentersAndPoints
    }

    fn find_split(&self, node: &ClusterNode, _rng: &mut dyn RngCore) -> Result<Split> {
        ensure_splittable(node)?;

        let mut best: Option<(usize, Split)> = None;
        for dimension in 0..node.dimension() {
            if let Some((mistakes, threshold)) = best_in_dimension(node, dimension) {
                if best.map_or(true, |(fewest, _)| mistakes < fewest) {
                    best = Some((mistakes, Split::new(dimension, threshold)));
                }
            }
        }

        best.map(|(_, split)| split).ok_or_else(|| {
            InvariantViolation::NoSplitCandidates {
                strategy: self.name(),
            }
            .into()
        })
    }
}

/// Brute-force mistake count of `split` over all (center, point) pairs of `node`.
pub fn count_mistakes(node: &ClusterNode, split: Split) -> usize {
    node.clusters()
        .clusters()
        .iter()
        .map(|cluster| {
            let center_left = split.goes_left(&cluster.center);
            cluster
                .points
                .iter()
                .filter(|p| split.goes_left(p) != center_left)
                .count()
        })
        .sum()
}

/// All candidate thresholds of `node` along `dimension`, ascending.
pub fn candidate_thresholds(node: &ClusterNode, dimension: usize) -> Vec<f64> {
    thresholds_from(node, dimension, MistakeMinimizing.working_set())
}

/// Midpoints between consecutive distinct `working_set` coordinates inside the center range.
pub fn thresholds_from(node: &ClusterNode, dimension: usize, working_set: WorkingSet) -> Vec<f64> {
    let (lo, hi) = center_range(&node.centers(), dimension);
    if lo >= hi {
        return Vec::new();
    }

    let mut coords: Vec<f64> = node
        .members(working_set)
        .map(|p| p.coord(dimension))
        .filter(|&x| lo <= x && x <= hi)
        .collect();
    coords.sort_by_key(|&x| OrderedFloat(x));
    coords.dedup();

    coords.windows(2).map(|w| midpoint(w[0], w[1])).collect()
}

fn midpoint(a: f64, b: f64) -> f64 {
    let mid = (a + b) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        a / 2.0 + b / 2.0
    }
}

/// Fewest mistakes along `dimension` and the first threshold achieving it.
fn best_in_dimension(node: &ClusterNode, dimension: usize) -> Option<(usize, f64)> {
    let thresholds = candidate_thresholds(node, dimension);
    if thresholds.is_empty() {
        return None;
    }

    let mut starts = Vec::new();
    let mut ends = Vec::new();
    for cluster in node.clusters().clusters() {
        let c = cluster.center.coord(dimension);
        for p in &cluster.points {
            let x = p.coord(dimension);
            if x != c {
                starts.push(OrderedFloat(x.min(c)));
                ends.push(OrderedFloat(x.max(c)));
            }
        }
    }
    starts.sort_unstable();
    ends.sort_unstable();

    let (mut opened, mut closed) = (0usize, 0usize);
    let mut best: Option<(usize, f64)> = None;
    for &t in &thresholds {
        let t_key = OrderedFloat(t);
        while opened < starts.len() && starts[opened] <= t_key {
            opened += 1;
        }
        while closed < ends.len() && ends[closed] <= t_key {
            closed += 1;
        }
        let mistakes = opened - closed;
        if best.map_or(true, |(fewest, _)| mistakes < fewest) {
            best = Some((mistakes, t));
        }
    }
    best
}
