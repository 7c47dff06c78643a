//! Reference clustering providers.
//!
//! The tree only needs a center -> points mapping that covers the instance. Two providers
//! ship with the crate:
//! - [`FixedCenters`]: nearest-center assignment for caller-chosen centers.
//! - [`KMedianPlusPlus`]: k-median++ seeding followed by Lloyd-style refinement.
//!
//! ## k-median++
//!
//! 1. First center uniformly among the instance points.
//! 2. Each further center drawn with probability proportional to `d(p)²`, the squared
//!    distance from p to its nearest chosen center. Already chosen points have weight 0.
//! 3. `iterations` rounds of: assign points to nearest centers, replace each center by its
//!    cluster's representative. Clusters that end up empty keep their center. Stops early
//!    once the centers no longer move.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{InputError, Result};
use crate::instance::{Clustering, Instance};
use crate::metric::{closest_center, Norm, Point};
use crate::representative::Representative;

pub trait ReferenceProvider {
    fn name(&self) -> &'static str;

    /// Clustering of `instance` under `norm`; every instance point appears exactly once.
    fn reference_clustering(&self, instance: &Instance, norm: Norm) -> Result<Clustering>;
}

/// Assigns instance points to a fixed list of centers.
#[derive(Clone, Debug)]
pub struct FixedCenters {
    centers: Vec<Point>,
}

impl FixedCenters {
    pub fn new(centers: Vec<Point>) -> Self {
        Self { centers }
    }
}

impl ReferenceProvider for FixedCenters {
    fn name(&self) -> &'static str {
        "fixed-centers"
    }

    fn reference_clustering(&self, instance: &Instance, norm: Norm) -> Result<Clustering> {
        instance.validate()?;
        if self.centers.is_empty() {
            return Err(InputError::EmptyClustering.into());
        }
        let dimension = instance.dimension();
        if let Some(c) = self.centers.iter().find(|c| c.dimension() != dimension) {
            return Err(InputError::DimensionMismatch {
                expected: dimension,
                found: c.dimension(),
            }
            .into());
        }
        if let Some(index) = self.centers.iter().position(|c| !c.is_finite()) {
            return Err(InputError::NonFiniteCenter { index }.into());
        }
        Ok(Clustering::from_centers(
            instance.points(),
            self.centers.clone(),
            norm,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct KMedianPlusPlus {
    pub iterations: usize,
    /// `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    pub representative: Representative,
}

impl Default for KMedianPlusPlus {
    fn default() -> Self {
        Self {
            iterations: 5,
            seed: Some(0),
            representative: Representative::Medoid,
        }
    }
}

impl KMedianPlusPlus {
    pub fn new(iterations: usize, seed: Option<u64>) -> Self {
        Self {
            iterations,
            seed,
            ..Self::default()
        }
    }

    /// Step 1 and 2: sampled initial centers.
    pub fn seed_centers<R: Rng + ?Sized>(
        &self,
        instance: &Instance,
        norm: Norm,
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        let points = instance.points();
        let k = instance.k();

        let mut centers = vec![points[rng.gen_range(0..points.len())].clone()];
        let mut nearest: Vec<f64> = points
            .iter()
            .map(|p| norm.distance(p, &centers[0]))
            .collect();

        while centers.len() < k {
            let weights: Vec<f64> = nearest.iter().map(|d| d * d).collect();
            let sampler = WeightedIndex::new(&weights).map_err(|_| {
                let distinct = points.iter().collect::<HashSet<_>>().len();
                InputError::TooFewDistinctPoints { k, distinct }
            })?;
            let chosen = points[sampler.sample(rng)].clone();
            for (d, p) in nearest.iter_mut().zip(points) {
                *d = d.min(norm.distance(p, &chosen));
            }
            centers.push(chosen);
        }
        Ok(centers)
    }

    /// Step 3: one Lloyd round. Returns the moved centers.
    pub fn lloyd_iteration(&self, points: &[Point], centers: &[Point], norm: Norm) -> Vec<Point> {
        let clustering = Clustering::from_centers(points, centers.to_vec(), norm);
        clustering
            .clusters()
            .iter()
            .map(|cluster| match self.representative.of(&cluster.points, norm) {
                Some(moved) => moved,
                None => {
                    warn!(center = %cluster.center, "empty cluster during refinement, keeping its center");
                    cluster.center.clone()
                }
            })
            .collect()
    }
}

impl ReferenceProvider for KMedianPlusPlus {
    fn name(&self) -> &'static str {
        "k-median++"
    }

    fn reference_clustering(&self, instance: &Instance, norm: Norm) -> Result<Clustering> {
        instance.validate()?;
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut centers = self.seed_centers(instance, norm, &mut rng)?;
        for iteration in 0..self.iterations {
            let moved = self.lloyd_iteration(instance.points(), &centers, norm);
            if moved == centers {
                debug!(iteration, "k-median++ refinement converged");
                break;
            }
            centers = moved;
        }

        let clustering = Clustering::from_centers(instance.points(), centers, norm);
        debug!(
            k = instance.k(),
            cost = clustering.cost(norm),
            "k-median++ reference clustering"
        );
        Ok(clustering)
    }
}

/// Cost of assigning every point of `instance` to its nearest center in `centers`.
pub fn assignment_cost(instance: &Instance, centers: &[Point], norm: Norm) -> f64 {
    instance
        .points()
        .iter()
        .filter_map(|p| closest_center(p, centers, norm).map(|(_, d)| d))
        .sum()
}
