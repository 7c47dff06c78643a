//! Recursive tree construction.
//!
//! ## Procedure
//!
//! ```text
//! grow(node):
//!     0 centers  -> invariant violation
//!     1 center   -> leaf
//!     otherwise  -> split = strategy.find_split(node, rng)
//!                   (left, right) = split_node(node, split)
//!                   node.into_split(split, grow(left), grow(right))
//! ```
//!
//! Every split leaves at least one center per side, so both children hold strictly fewer
//! centers than their parent and the recursion depth is bounded by the center count.
//!
//! The random generator is borrowed mutably for the whole build and consumed in
//! depth-first, left-before-right order. The same seed and reference clustering therefore
//! always reproduce the same tree.

use rand::RngCore;
use tracing::{debug, info};

use crate::error::{InvariantViolation, Result};
use crate::instance::Clustering;
use crate::metric::{Norm, Point};
use crate::node::{ClusterNode, Split};
use crate::split::SplitStrategy;
use crate::splitter::split_node;

pub struct TreeBuilder<'a> {
    strategy: &'a dyn SplitStrategy,
    norm: Norm,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(strategy: &'a dyn SplitStrategy, norm: Norm) -> Self {
        Self { strategy, norm }
    }

    pub fn build(&self, reference: Clustering, rng: &mut dyn RngCore) -> Result<ExplainableTree> {
        let root = ClusterNode::root(reference)?;
        let root = self.grow(root, rng)?;
        let tree = ExplainableTree { root };

        info!(
            strategy = self.strategy.name(),
            leaves = tree.num_leaves(),
            depth = tree.depth(),
            "built explainable tree"
        );
        Ok(tree)
    }

    fn grow(&self, node: ClusterNode, rng: &mut dyn RngCore) -> Result<ClusterNode> {
        match node.num_centers() {
            0 => Err(InvariantViolation::EmptyNode.into()),
            1 => Ok(node),
            parent_centers => {
                let split = self.strategy.find_split(&node, rng)?;
                let (left, right) = split_node(&node, split, self.norm)?;
                debug_assert_eq!(left.num_centers() + right.num_centers(), parent_centers);
                debug!(
                    strategy = self.strategy.name(),
                    %split,
                    centers = parent_centers,
                    left = left.num_centers(),
                    right = right.num_centers(),
                    "split node"
                );

                let left = self.grow(left, rng)?;
                let right = self.grow(right, rng)?;
                node.into_split(split, left, right)
            }
        }
    }
}

/// One threshold test taken while routing a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub split: Split,
    pub goes_left: bool,
}

/// A finished threshold tree. Every leaf holds exactly one reference center.
#[derive(Clone, Debug)]
pub struct ExplainableTree {
    root: ClusterNode,
}

impl ExplainableTree {
    pub fn root(&self) -> &ClusterNode {
        &self.root
    }

    pub fn into_root(self) -> ClusterNode {
        self.root
    }

    /// Homogeneous nodes in depth-first, left-before-right order.
    pub fn leaves(&self) -> Vec<&ClusterNode> {
        self.preorder().filter(|n| n.is_leaf()).collect()
    }

    /// Internal nodes in the same order, each carrying its split.
    pub fn split_nodes(&self) -> Vec<&ClusterNode> {
        self.preorder().filter(|n| !n.is_leaf()).collect()
    }

    pub fn splits(&self) -> Vec<Split> {
        self.preorder().filter_map(ClusterNode::split).collect()
    }

    pub fn num_leaves(&self) -> usize {
        self.preorder().filter(|n| n.is_leaf()).count()
    }

    /// Number of splits on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth_of(node: &ClusterNode) -> usize {
            match node.children() {
                Some((l, r)) => 1 + depth_of(l).max(depth_of(r)),
                None => 0,
            }
        }
        depth_of(&self.root)
    }

    /// Leaf whose box contains `point`.
    pub fn leaf_for(&self, point: &Point) -> &ClusterNode {
        let mut node = &self.root;
        while let (Some(split), Some((left, right))) = (node.split(), node.children()) {
            node = if split.goes_left(point) { left } else { right };
        }
        node
    }

    /// Position of [`leaf_for`](Self::leaf_for) within [`leaves`](Self::leaves).
    ///
    /// A subtree has one leaf per center it holds, so stepping right skips
    /// `left.num_centers()` leaves.
    pub fn leaf_index_for(&self, point: &Point) -> usize {
        let mut index = 0;
        let mut node = &self.root;
        while let (Some(split), Some((left, right))) = (node.split(), node.children()) {
            node = if split.goes_left(point) {
                left
            } else {
                index += left.num_centers();
                right
            };
        }
        index
    }

    /// The threshold tests that route `point` to its leaf.
    pub fn explain(&self, point: &Point) -> Vec<Decision> {
        let mut decisions = Vec::new();
        let mut node = &self.root;
        while let (Some(split), Some((left, right))) = (node.split(), node.children()) {
            let goes_left = split.goes_left(point);
            decisions.push(Decision { split, goes_left });
            node = if goes_left { left } else { right };
        }
        decisions
    }

    fn preorder(&self) -> impl Iterator<Item = &ClusterNode> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Cluster;
    use crate::split::{MistakeMinimizing, StrategyKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn p(x: f64, y: f64) -> Point {
        Point::new(vec![x, y])
    }

    fn line_of_clusters(k: usize) -> Clustering {
        let clusters = (0..k)
            .map(|i| {
                let x = i as f64 * 10.0;
                Cluster::new(p(x, 0.0), vec![p(x, 1.0), p(x + 1.0, 0.0), p(x - 1.0, 0.0)])
            })
            .collect();
        Clustering::new(clusters)
    }

    #[test]
    fn test_single_center_is_root_leaf() {
        let strategy = MistakeMinimizing;
        let builder = TreeBuilder::new(&strategy, Norm::L1);
        let reference = Clustering::new(vec![Cluster::new(p(0.0, 0.0), vec![p(1.0, 1.0)])]);
        let tree = builder
            .build(reference, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();

        assert_eq!(tree.num_leaves(), 1);
        assert!(tree.split_nodes().is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.explain(&p(5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_every_strategy_yields_one_leaf_per_center() {
        for kind in StrategyKind::ALL {
            let strategy = kind.build(Norm::L1);
            let builder = TreeBuilder::new(strategy.as_ref(), Norm::L1);
            let tree = builder
                .build(line_of_clusters(6), &mut ChaCha8Rng::seed_from_u64(1))
                .unwrap();

            assert_eq!(tree.num_leaves(), 6, "{kind}");
            assert_eq!(tree.split_nodes().len(), 5, "{kind}");
            assert!(tree.leaves().iter().all(|l| l.is_homogeneous()));
            assert!(tree.split_nodes().iter().all(|n| n.split().is_some()));
        }
    }

    #[test]
    fn test_leaf_for_matches_explain() {
        let strategy = MistakeMinimizing;
        let tree = TreeBuilder::new(&strategy, Norm::L1)
            .build(line_of_clusters(4), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();

        for x in [-3.0, 4.0, 14.0, 26.0, 31.0] {
            let query = p(x, 0.0);
            let leaf = tree.leaf_for(&query);
            assert!(leaf.is_homogeneous());
            assert!(leaf.bounds().contains(&query));

            let decisions = tree.explain(&query);
            assert_eq!(!decisions.is_empty(), tree.depth() > 0);
            assert!(decisions
                .iter()
                .all(|d| d.split.goes_left(&query) == d.goes_left));
            assert!(std::ptr::eq(
                tree.leaves()[tree.leaf_index_for(&query)],
                leaf
            ));
        }
    }

    #[test]
    fn test_leaf_index_for_every_leaf() {
        let strategy = StrategyKind::RangeWeighted.build(Norm::L1);
        let tree = TreeBuilder::new(strategy.as_ref(), Norm::L1)
            .build(line_of_clusters(7), &mut ChaCha8Rng::seed_from_u64(4))
            .unwrap();

        for (i, leaf) in tree.leaves().iter().enumerate() {
            let center = leaf.center().unwrap();
            assert_eq!(tree.leaf_index_for(center), i);
            assert!(std::ptr::eq(tree.leaf_for(center), *leaf));
        }
    }

    #[test]
    fn test_leaves_come_in_left_to_right_order() {
        let strategy = MistakeMinimizing;
        let tree = TreeBuilder::new(&strategy, Norm::L1)
            .build(line_of_clusters(5), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();

        // Splits along x only, so depth-first left-first order sorts centers by x.
        let xs: Vec<f64> = tree
            .leaves()
            .iter()
            .map(|l| l.center().unwrap().coord(0))
            .collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(tree.splits().len(), 4);
    }
}
