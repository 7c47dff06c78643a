//! Turns a finished tree into a clustering of the original instance.
//!
//! For every leaf a representative is computed from the points the leaf holds (medoid or
//! coordinate-wise median). Two costs are reported:
//! - `cost`: each instance point re-assigned to its nearest representative;
//! - `tree_cost`: each instance point charged to the representative of the leaf the tree
//!   routes it to, i.e. the cost of the explainable clustering itself.

use serde::Serialize;

use crate::builder::ExplainableTree;
use crate::error::{InvariantViolation, Result};
use crate::instance::Clustering;
use crate::metric::{Norm, Point};
use crate::representative::Representative;

#[derive(Clone, Debug, Serialize)]
pub struct ExplainableClustering {
    /// Representative -> instance points nearest to it.
    pub clustering: Clustering,
    /// One representative per leaf, in leaf order.
    pub representatives: Vec<Point>,
    pub cost: f64,
    pub tree_cost: f64,
    pub norm: Norm,
    pub representative: Representative,
}

impl ExplainableClustering {
    pub fn assemble(
        points: &[Point],
        tree: &ExplainableTree,
        norm: Norm,
        representative: Representative,
    ) -> Result<Self> {
        let representatives = tree
            .leaves()
            .iter()
            .map(|leaf| {
                representative
                    .of(&leaf.points(), norm)
                    .or_else(|| leaf.center().cloned())
                    .ok_or(InvariantViolation::EmptyNode)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let clustering = Clustering::from_centers(points, representatives.clone(), norm);
        let cost = clustering.cost(norm);
        let tree_cost = points
            .iter()
            .map(|p| norm.distance(p, &representatives[tree.leaf_index_for(p)]))
            .sum();

        Ok(Self {
            clustering,
            representatives,
            cost,
            tree_cost,
            norm,
            representative,
        })
    }

    pub fn num_clusters(&self) -> usize {
        self.representatives.len()
    }
}
