//! End-to-end pipeline: reference clustering -> threshold tree -> explainable clustering.
//!
//! ```text
//! instance --provider--> reference clustering
//!          --TreeBuilder(strategy, rng)--> ExplainableTree
//!          --assemble(representative)--> ExplainableClustering
//! ```
//!
//! The split generator is a `ChaCha8Rng` seeded from [`SolverConfig::seed`], created fresh for
//! every solve, so solving the same instance twice with the same configuration yields the
//! same tree.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::assemble::ExplainableClustering;
use crate::builder::{ExplainableTree, TreeBuilder};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::instance::{Clustering, Instance};
use crate::seeding::ReferenceProvider;

/// Generator used for randomized splits.
pub type SplitRng = ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct Solution {
    pub reference: Clustering,
    pub reference_cost: f64,
    pub tree: ExplainableTree,
    pub clustering: ExplainableClustering,
}

impl Solution {
    /// Ratio of the explainable tree cost to the reference cost. 1.0 when both are zero.
    pub fn price_of_explainability(&self) -> f64 {
        if self.reference_cost > 0.0 {
            self.clustering.tree_cost / self.reference_cost
        } else if self.clustering.tree_cost > 0.0 {
            f64::INFINITY
        } else {
            1.0
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExplainableSolver {
    config: SolverConfig,
}

impl ExplainableSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves with the k-median++ reference described by the configuration.
    pub fn solve(&self, instance: &Instance) -> Result<Solution> {
        self.solve_with(instance, &self.config.seeder())
    }

    pub fn solve_with(
        &self,
        instance: &Instance,
        provider: &dyn ReferenceProvider,
    ) -> Result<Solution> {
        self.config.validate_for(instance)?;
        let reference = provider.reference_clustering(instance, self.config.norm)?;
        info!(
            provider = provider.name(),
            centers = reference.num_centers(),
            points = reference.num_points(),
            "reference clustering ready"
        );
        self.explain(instance, reference)
    }

    /// Builds the tree and explainable clustering for an already computed reference.
    pub fn explain(&self, instance: &Instance, reference: Clustering) -> Result<Solution> {
        instance.validate()?;
        reference.validate_for(instance)?;

        let norm = self.config.norm;
        let reference_cost = reference.cost(norm);
        let strategy = self.config.strategy.build(norm);
        let mut rng = SplitRng::seed_from_u64(self.config.seed);

        let tree = TreeBuilder::new(strategy.as_ref(), norm).build(reference.clone(), &mut rng)?;
        let clustering = ExplainableClustering::assemble(
            instance.points(),
            &tree,
            norm,
            self.config.representative,
        )?;

        info!(
            strategy = %self.config.strategy,
            %norm,
            representative = %self.config.representative,
            reference_cost,
            cost = clustering.cost,
            tree_cost = clustering.tree_cost,
            "explainable clustering assembled"
        );
        Ok(Solution {
            reference,
            reference_cost,
            tree,
            clustering,
        })
    }
}
