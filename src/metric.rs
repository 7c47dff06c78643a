//! Point representation and distance functions.
//!
//! Points are compared by value: a center copied into a child node is still the same key
//! as the center in its parent. Equality and hashing go through [`OrderedFloat`] so that
//! points can be used as map keys and set members.

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ClusteringError;

/// An immutable d-dimensional coordinate vector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    coords: Vec<f64>,
}

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn coord(&self, dimension: usize) -> f64 {
        self.coords[dimension]
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }

    /// Uniform point in `[0, range)^dimension` drawn from the caller's generator.
    pub fn random<R: Rng + ?Sized>(dimension: usize, range: f64, rng: &mut R) -> Self {
        let coords = (0..dimension).map(|_| rng.gen::<f64>() * range).collect();
        Self { coords }
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| OrderedFloat(*a) == OrderedFloat(*b))
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coords.len().hash(state);
        for c in &self.coords {
            OrderedFloat(*c).hash(state);
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// The norm used for every distance in a run: seeding, splitting and cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L1,
    L2,
}

impl Norm {
    pub fn distance(&self, p: &Point, q: &Point) -> f64 {
        debug_assert_eq!(p.dimension(), q.dimension());
        let diffs = p.coords.iter().zip(q.coords.iter()).map(|(a, b)| a - b);
        match self {
            Norm::L1 => diffs.map(f64::abs).sum(),
            Norm::L2 => diffs.map(|d| d * d).sum::<f64>().sqrt(),
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Norm::L1 => write!(f, "l1"),
            Norm::L2 => write!(f, "l2"),
        }
    }
}

impl FromStr for Norm {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l1" | "manhattan" => Ok(Norm::L1),
            "l2" | "euclidean" => Ok(Norm::L2),
            other => Err(ClusteringError::InvalidConfig(format!(
                "unsupported norm '{other}'"
            ))),
        }
    }
}

/// Nearest center to `point` and the distance to it.
///
/// Ties go to the first center in `centers`. Returns `None` only for an empty slice.
pub fn closest_center<'a>(
    point: &Point,
    centers: &'a [Point],
    norm: Norm,
) -> Option<(&'a Point, f64)> {
    closest_index(point, centers, norm).map(|(idx, dist)| (&centers[idx], dist))
}

/// Index variant of [`closest_center`].
pub fn closest_index(point: &Point, centers: &[Point], norm: Norm) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, center) in centers.iter().enumerate() {
        let dist = norm.distance(point, center);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_l1_and_l2_distance() {
        let p1 = Point::new(vec![0.0, 0.0]);
        let p2 = Point::new(vec![3.0, 4.0]);
        assert!((Norm::L1.distance(&p1, &p2) - 7.0).abs() < 1e-10);
        assert!((Norm::L2.distance(&p1, &p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_value_identity() {
        let a = Point::new(vec![1.0, 2.0]);
        let b = a.clone();
        let c = Point::new(vec![1.0, 2.5]);

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
        assert_eq!(a, b);
    }

    #[test]
    fn test_closest_center_first_tie_wins() {
        let centers = vec![
            Point::new(vec![-1.0, 0.0]),
            Point::new(vec![1.0, 0.0]),
            Point::new(vec![5.0, 0.0]),
        ];
        let origin = Point::new(vec![0.0, 0.0]);

        let (center, dist) = closest_center(&origin, &centers, Norm::L1).unwrap();
        assert_eq!(center, &centers[0]);
        assert!((dist - 1.0).abs() < 1e-10);

        let far = Point::new(vec![4.0, 1.0]);
        let (idx, _) = closest_index(&far, &centers, Norm::L2).unwrap();
        assert_eq!(idx, 2);
    }

    #[test]
    fn test_closest_center_empty() {
        let origin = Point::new(vec![0.0]);
        assert!(closest_center(&origin, &[], Norm::L1).is_none());
    }

    #[test]
    fn test_norm_from_str() {
        assert_eq!("L1".parse::<Norm>().unwrap(), Norm::L1);
        assert_eq!("euclidean".parse::<Norm>().unwrap(), Norm::L2);
        assert!("chebyshev".parse::<Norm>().is_err());
    }
}
