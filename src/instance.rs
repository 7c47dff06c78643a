//! Problem instances and center-to-points clusterings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::metric::{closest_index, Norm, Point};

/// A k-median instance: points in R^d and the number of centers to open.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instance {
    points: Vec<Point>,
    k: usize,
}

impl Instance {
    /// Builds and validates an instance.
    pub fn new(points: Vec<Point>, k: usize) -> Result<Self> {
        let instance = Self { points, k };
        instance.validate()?;
        Ok(instance)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.points.first().map(Point::dimension).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        let first = self.points.first().ok_or(InputError::EmptyInstance)?;
        if self.k == 0 || self.k > self.points.len() {
            return Err(InputError::InvalidK {
                k: self.k,
                points: self.points.len(),
            }
            .into());
        }
        let dimension = first.dimension();
        if dimension == 0 {
            return Err(InputError::DimensionMismatch {
                expected: 1,
                found: 0,
            }
            .into());
        }
        for (index, p) in self.points.iter().enumerate() {
            if p.dimension() != dimension {
                return Err(InputError::DimensionMismatch {
                    expected: dimension,
                    found: p.dimension(),
                }
                .into());
            }
            if !p.is_finite() {
                return Err(InputError::NonFiniteCoordinate { index }.into());
            }
        }
        Ok(())
    }
}

/// One center and the points currently assigned to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub center: Point,
    pub points: Vec<Point>,
}

impl Cluster {
    pub fn new(center: Point, points: Vec<Point>) -> Self {
        Self { center, points }
    }

    pub fn cost(&self, norm: Norm) -> f64 {
        self.points
            .iter()
            .map(|p| norm.distance(p, &self.center))
            .sum()
    }
}

/// Center -> assigned points mapping.
///
/// Kept as an ordered list rather than a hash map: the order of centers drives tie-breaking
/// in nearest-center lookups and the traversal order of the tree, which must be reproducible.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    clusters: Vec<Cluster>,
}

impl Clustering {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    /// Assigns every point to its nearest center (first center wins ties).
    ///
    /// Centers without points are kept as empty clusters.
    pub fn from_centers(points: &[Point], centers: Vec<Point>, norm: Norm) -> Self {
        let mut assigned: Vec<Vec<Point>> = vec![Vec::new(); centers.len()];
        for p in points {
            if let Some((idx, _)) = closest_index(p, &centers, norm) {
                assigned[idx].push(p.clone());
            }
        }
        let clusters = centers
            .into_iter()
            .zip(assigned)
            .map(|(center, points)| Cluster::new(center, points))
            .collect();
        Self { clusters }
    }

    /// Builds a clustering from a keyed map, ordering centers by `center_order`.
    ///
    /// Map entries whose center is not listed in `center_order` are dropped.
    pub fn from_map(mut map: HashMap<Point, Vec<Point>>, center_order: &[Point]) -> Self {
        let clusters = center_order
            .iter()
            .filter_map(|c| map.remove(c).map(|points| Cluster::new(c.clone(), points)))
            .collect();
        Self { clusters }
    }

    /// Folds clusters whose centers coincide into the first of them.
    ///
    /// No threshold can separate two equal centers, so a tree keeps only one.
    pub fn merge_coincident_centers(self) -> Self {
        let mut merged: Vec<Cluster> = Vec::with_capacity(self.clusters.len());
        for cluster in self.clusters {
            match merged.iter_mut().find(|c| c.center == cluster.center) {
                Some(existing) => existing.points.extend(cluster.points),
                None => merged.push(cluster),
            }
        }
        Self { clusters: merged }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    pub fn centers(&self) -> Vec<Point> {
        self.clusters.iter().map(|c| c.center.clone()).collect()
    }

    pub fn num_centers(&self) -> usize {
        self.clusters.len()
    }

    pub fn num_points(&self) -> usize {
        self.clusters.iter().map(|c| c.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.clusters.iter().flat_map(|c| c.points.iter())
    }

    pub fn points_of(&self, center: &Point) -> Option<&[Point]> {
        self.clusters
            .iter()
            .find(|c| &c.center == center)
            .map(|c| c.points.as_slice())
    }

    pub fn to_map(&self) -> HashMap<Point, Vec<Point>> {
        self.clusters
            .iter()
            .map(|c| (c.center.clone(), c.points.clone()))
            .collect()
    }

    /// Sum of distances from each point to its own center.
    pub fn cost(&self, norm: Norm) -> f64 {
        self.clusters.iter().map(|c| c.cost(norm)).sum()
    }

    /// Checks that this clustering can seed a tree for `instance`.
    ///
    /// Every instance point must appear in some cluster, as many times as it occurs in the
    /// instance, all centers must be finite, and all centers and points must share the
    /// instance dimension.
    pub fn validate_for(&self, instance: &Instance) -> Result<()> {
        if self.clusters.is_empty() {
            return Err(InputError::EmptyClustering.into());
        }
        let dimension = instance.dimension();
        for (index, cluster) in self.clusters.iter().enumerate() {
            if !cluster.center.is_finite() {
                return Err(InputError::NonFiniteCenter { index }.into());
            }
            let found = std::iter::once(&cluster.center)
                .chain(cluster.points.iter())
                .map(Point::dimension)
                .find(|&d| d != dimension);
            if let Some(found) = found {
                return Err(InputError::DimensionMismatch {
                    expected: dimension,
                    found,
                }
                .into());
            }
        }

        let mut remaining: HashMap<&Point, usize> = HashMap::new();
        for p in self.points() {
            *remaining.entry(p).or_insert(0) += 1;
        }
        for (index, p) in instance.points().iter().enumerate() {
            match remaining.get_mut(p) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return Err(InputError::UncoveredPoint { index }.into()),
            }
        }
        Ok(())
    }
}
