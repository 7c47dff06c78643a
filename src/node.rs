//! Tree nodes of an explainable clustering.
//!
//! A [`ClusterNode`] owns the reference centers that survive in its region of space, the
//! points currently assigned to them, and the axis-aligned box that region covers.
//!
//! ## Conventions
//!
//! - A split `x[i] <= t` sends everything with coordinate `<= t` left, the rest right.
//! - Boxes are products of half-open intervals `(lower, upper]`, so the two children of a
//!   split partition the parent box exactly. The root box is `(-inf, +inf)` in every axis.
//! - A node is split at most once. Children are built as fresh values and attached with
//!   [`ClusterNode::into_split`] after both subtrees exist.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InputError, InvariantViolation, Result};
use crate::instance::Clustering;
use crate::metric::Point;

/// Half-open interval `(lower, upper]` along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub const UNBOUNDED: Interval = Interval {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    pub fn contains(&self, x: f64) -> bool {
        self.lower < x && x <= self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }
}

/// Per-dimension intervals describing the region a node owns.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    intervals: Vec<Interval>,
}

impl Bounds {
    pub fn unbounded(dimension: usize) -> Self {
        Self {
            intervals: vec![Interval::UNBOUNDED; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.intervals.len()
    }

    pub fn interval(&self, dimension: usize) -> Interval {
        self.intervals[dimension]
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.dimension() == self.dimension()
            && self
                .intervals
                .iter()
                .zip(point.coords())
                .all(|(iv, &x)| iv.contains(x))
    }

    /// Left-child box: upper bound of `dimension` lowered to `threshold`.
    pub fn below(&self, split: Split) -> Self {
        let mut intervals = self.intervals.clone();
        intervals[split.dimension].upper = split.threshold;
        Self { intervals }
    }

    /// Right-child box: lower bound of `dimension` raised to `threshold`.
    pub fn above(&self, split: Split) -> Self {
        let mut intervals = self.intervals.clone();
        intervals[split.dimension].lower = split.threshold;
        Self { intervals }
    }
}

/// A single-feature threshold test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub dimension: usize,
    pub threshold: f64,
}

impl Split {
    pub fn new(dimension: usize, threshold: f64) -> Self {
        Self {
            dimension,
            threshold,
        }
    }

    /// True when `point` belongs to the left (`<=`) side.
    pub fn goes_left(&self, point: &Point) -> bool {
        point.coord(self.dimension) <= self.threshold
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x[{}] <= {}", self.dimension, self.threshold)
    }
}

/// Which entities of a node a split strategy draws its candidate coordinates from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkingSet {
    #[default]
    CentersOnly,
    CentersAndPoints,
}

#[derive(Clone, Debug)]
pub struct ClusterNode {
    clusters: Clustering,
    bounds: Bounds,
    split: Option<Split>,
    children: Option<Box<[ClusterNode; 2]>>,
}

impl ClusterNode {
    /// Root node over a full reference clustering with an unbounded box.
    ///
    /// Coincident centers are merged first. Centers must have finite coordinates.
    pub fn root(clusters: Clustering) -> Result<Self> {
        let clusters = clusters.merge_coincident_centers();
        let dimension = clusters
            .clusters()
            .first()
            .map(|c| c.center.dimension())
            .ok_or(InputError::EmptyClustering)?;
        if let Some(index) = clusters.clusters().iter().position(|c| !c.center.is_finite()) {
            return Err(InputError::NonFiniteCenter { index }.into());
        }
        Self::new(clusters, Bounds::unbounded(dimension))
    }

    /// Node over `clusters` restricted to `bounds`.
    ///
    /// Fails when any center or point disagrees with the box dimension.
    pub fn new(clusters: Clustering, bounds: Bounds) -> Result<Self> {
        let expected = bounds.dimension();
        for cluster in clusters.clusters() {
            let mismatch = std::iter::once(&cluster.center)
                .chain(cluster.points.iter())
                .find(|p| p.dimension() != expected);
            if let Some(p) = mismatch {
                return Err(InputError::DimensionMismatch {
                    expected,
                    found: p.dimension(),
                }
                .into());
            }
        }
        Ok(Self {
            clusters,
            bounds,
            split: None,
            children: None,
        })
    }

    /// Attaches a split and its two finished subtrees.
    pub fn into_split(mut self, split: Split, left: ClusterNode, right: ClusterNode) -> Result<Self> {
        if self.is_homogeneous() || self.split.is_some() {
            return Err(InvariantViolation::SplitOfHomogeneousNode.into());
        }
        self.split = Some(split);
        self.children = Some(Box::new([left, right]));
        Ok(self)
    }

    pub fn clusters(&self) -> &Clustering {
        &self.clusters
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Centers, followed by the assigned points when `working_set` includes them.
    pub fn members(&self, working_set: WorkingSet) -> impl Iterator<Item = &Point> {
        let with_points = working_set == WorkingSet::CentersAndPoints;
        self.clusters
            .clusters()
            .iter()
            .map(|c| &c.center)
            .chain(self.clusters.points().filter(move |_| with_points))
    }

    pub fn split(&self) -> Option<Split> {
        self.split
    }

    pub fn children(&self) -> Option<(&ClusterNode, &ClusterNode)> {
        self.children.as_ref().map(|c| (&c[0], &c[1]))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_homogeneous(&self) -> bool {
        self.clusters.num_centers() == 1
    }

    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }

    pub fn num_centers(&self) -> usize {
        self.clusters.num_centers()
    }

    pub fn centers(&self) -> Vec<Point> {
        self.clusters.centers()
    }

    /// The single center of a homogeneous node.
    pub fn center(&self) -> Option<&Point> {
        match self.clusters.clusters() {
            [only] => Some(&only.center),
            _ => None,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        self.clusters.points().cloned().collect()
    }

    pub fn num_points(&self) -> usize {
        self.clusters.num_points()
    }
}
