//! Representative point of a cluster.
//!
//! The assembled clustering charges every point to a representative rather than to the
//! reference center, so the policy is visible in the reported cost and must stay fixed
//! for a run.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClusteringError;
use crate::metric::{Norm, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representative {
    /// Input point minimising the summed distance to all others. O(n²).
    #[default]
    Medoid,
    /// Per-dimension median; not necessarily one of the inputs.
    #[serde(alias = "median")]
    CoordinateMedian,
}

impl Representative {
    /// Representative of `points`, or `None` when the set is empty.
    pub fn of(&self, points: &[Point], norm: Norm) -> Option<Point> {
        match self {
            Representative::Medoid => medoid(points, norm).cloned(),
            Representative::CoordinateMedian => coordinate_median(points),
        }
    }
}

impl fmt::Display for Representative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representative::Medoid => write!(f, "medoid"),
            Representative::CoordinateMedian => write!(f, "coordinate-median"),
        }
    }
}

impl FromStr for Representative {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medoid" => Ok(Representative::Medoid),
            "median" | "coordinate-median" | "coordinate_median" => {
                Ok(Representative::CoordinateMedian)
            }
            other => Err(ClusteringError::InvalidConfig(format!(
                "unsupported representative '{other}'"
            ))),
        }
    }
}

/// Brute-force medoid. Ties go to the earliest point.
pub fn medoid(points: &[Point], norm: Norm) -> Option<&Point> {
    let mut best: Option<(&Point, f64)> = None;
    for candidate in points {
        let cost: f64 = points.iter().map(|p| norm.distance(candidate, p)).sum();
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((candidate, cost)),
        }
    }
    best.map(|(p, _)| p)
}

/// Coordinate-wise median.
///
/// For an even count the lower median is taken, so every coordinate is one that occurs in
/// the input. Any value between the two middle ones minimises the per-axis L1 cost equally.
pub fn coordinate_median(points: &[Point]) -> Option<Point> {
    let first = points.first()?;
    let dimension = first.dimension();
    let mid = (points.len() - 1) / 2;

    let coords = (0..dimension)
        .map(|i| {
            let mut axis: Vec<f64> = points.iter().map(|p| p.coord(i)).collect();
            axis.sort_by_key(|&c| OrderedFloat(c));
            axis[mid]
        })
        .collect();
    Some(Point::new(coords))
}
