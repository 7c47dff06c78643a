//! Child construction shared by every split strategy.
//!
//! Given a node and a split `x[i] <= t`:
//! - centers with `c_i <= t` go left, the others right;
//! - every point follows its center to that center's side, then all points of a side are
//!   re-assigned to the nearest center *on that side*, since the centers they could belong
//!   to have changed;
//! - the left box gets upper bound `t` on axis i, the right box lower bound `t`.
//!
//! A point may therefore sit outside its child's box: its center crossed the threshold
//! without it. Such points are exactly the mistakes of the split.
//!
//! The parent is left untouched; two new nodes are returned.

use crate::error::{InputError, InvariantViolation, Result};
use crate::instance::Clustering;
use crate::metric::Norm;
use crate::node::{ClusterNode, Split};

pub fn split_node(
    node: &ClusterNode,
    split: Split,
    norm: Norm,
) -> Result<(ClusterNode, ClusterNode)> {
    if split.dimension >= node.dimension() {
        return Err(InputError::DimensionMismatch {
            expected: node.dimension(),
            found: split.dimension + 1,
        }
        .into());
    }

    let (mut left_centers, mut right_centers) = (Vec::new(), Vec::new());
    let (mut left_points, mut right_points) = (Vec::new(), Vec::new());
    for cluster in node.clusters().clusters() {
        let (centers, points) = if split.goes_left(&cluster.center) {
            (&mut left_centers, &mut left_points)
        } else {
            (&mut right_centers, &mut right_points)
        };
        centers.push(cluster.center.clone());
        points.extend(cluster.points.iter().cloned());
    }
    if left_centers.is_empty() || right_centers.is_empty() {
        return Err(InvariantViolation::EmptySplitSide {
            dimension: split.dimension,
            threshold: split.threshold,
        }
        .into());
    }

    let left = ClusterNode::new(
        Clustering::from_centers(&left_points, left_centers, norm),
        node.bounds().below(split),
    )?;
    let right = ClusterNode::new(
        Clustering::from_centers(&right_points, right_centers, norm),
        node.bounds().above(split),
    )?;
    Ok((left, right))
}
