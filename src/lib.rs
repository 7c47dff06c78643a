//! # explainable_kmedian: Threshold Trees for k-Median
//!
//! Builds *explainable* approximations of k-median clusterings. Starting from a reference
//! clustering (k centers, every point assigned to one of them), the crate grows a binary tree
//! of axis-aligned threshold tests `x[i] <= t` until every leaf holds exactly one reference
//! center. The leaves induce a clustering that can be read off as a short decision tree.
//!
//! ## Purpose
//!
//! - **Explainability:** every cluster is a box described by at most k - 1 threshold tests
//! - **Cost tracking:** reports the reference cost next to the cost of the tree clustering
//! - **Interchangeable split policies:** one exhaustive, two randomized
//!
//! ## Algorithm Overview
//!
//! 1. **Reference clustering**: supplied by the caller or computed by k-median++ seeding
//!    with Lloyd refinement ([`seeding`]).
//! 2. **Root**: one node holding every center, every point, and the unbounded box.
//! 3. **Split**: while a node holds more than one center, a [`SplitStrategy`] picks a
//!    dimension and threshold that separates at least one center to each side.
//! 4. **Children**: the splitter partitions the centers, routes each point by its own
//!    coordinate, re-assigns it to the nearest center on its side, and narrows the box.
//! 5. **Assemble**: one representative (medoid or coordinate-wise median) per leaf; every
//!    instance point is charged to its nearest representative.
//!
//! ## Split Strategies
//!
//! ### Mistake minimization ([`split::MistakeMinimizing`])
//! - A *mistake* is a point sent to the other side than its own center
//! - Every dimension, every midpoint between consecutive candidate coordinates
//! - Counts are computed with one sorted sweep per dimension: O(n log n) per dimension
//! - Ties keep the first minimum in (dimension, threshold) order
//!
//! ### Range-weighted ([`split::RangeWeighted`])
//! - Dimension drawn with probability proportional to the span of center coordinates
//! - Threshold uniform in that span
//! - Zero-span dimensions are never drawn
//!
//! ### Pairwise box ([`split::PairwiseBox`])
//! - One box per pair of centers, measure = sum of side lengths
//! - Boxes with measure `<= D / k'^3` are dropped, D the largest center distance
//! - Threshold sampled uniformly over the concatenated sides of the kept boxes
//!
//! ## Conventions
//!
//! - Ties go left: `x[i] <= t`
//! - Node boxes are products of half-open intervals `(lower, upper]`
//! - One [`Norm`] (L1 by default, or L2) per run, shared by seeding, splitting and cost
//! - Randomness flows through an explicit generator ([`SplitRng`]); equal seeds give equal trees
//!
//! ## Example
//!
//! ```
//! use explainable_kmedian::{ExplainableSolver, Instance, Point, SolverConfig, StrategyKind};
//!
//! let points = vec![
//!     Point::new(vec![0.0, 0.0]),
//!     Point::new(vec![0.5, 0.5]),
//!     Point::new(vec![10.0, 10.0]),
//!     Point::new(vec![10.5, 9.5]),
//! ];
//! let instance = Instance::new(points, 2)?;
//! let config = SolverConfig::default().with_strategy(StrategyKind::MistakeMinimizing);
//! let solution = ExplainableSolver::new(config).solve(&instance)?;
//!
//! assert_eq!(solution.tree.num_leaves(), 2);
//! # Ok::<(), explainable_kmedian::ClusteringError>(())
//! ```

pub mod assemble;
pub mod builder;
pub mod config;
pub mod error;
pub mod instance;
pub mod metric;
pub mod node;
pub mod representative;
pub mod seeding;
pub mod solver;
pub mod split;
pub mod splitter;
pub mod synthetic;

pub use assemble::ExplainableClustering;
pub use builder::{Decision, ExplainableTree, TreeBuilder};
pub use config::{SeedingConfig, SolverConfig};
pub use error::{ClusteringError, InputError, InvariantViolation, Result};
pub use instance::{Cluster, Clustering, Instance};
pub use metric::{Norm, Point};
pub use node::{Bounds, ClusterNode, Interval, Split, WorkingSet};
pub use representative::Representative;
pub use seeding::{FixedCenters, KMedianPlusPlus, ReferenceProvider};
pub use solver::{ExplainableSolver, Solution, SplitRng};
pub use split::{SplitStrategy, StrategyKind};
