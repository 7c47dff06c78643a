//! Synthetic instances with a known cluster structure.
//!
//! `k` centers sit on the roots of unity scaled by `radius` in the plane. Each center
//! contributes itself plus `cluster_size` points offset uniformly by `[0, spread)` per
//! coordinate. With `spread` well below the gap between neighbouring centers the reference
//! clustering is unambiguous, which makes these instances handy for tests and benches.

use rand::Rng;
use std::f64::consts::TAU;

use crate::error::{ClusteringError, InputError, Result};
use crate::instance::Instance;
use crate::metric::Point;

/// Centers of [`k_clusters`], in generation order.
pub fn ring_centers(k: usize, radius: f64) -> Vec<Point> {
    (0..k)
        .map(|i| {
            let angle = TAU * i as f64 / k as f64;
            Point::new(vec![radius * angle.cos(), radius * angle.sin()])
        })
        .collect()
}

pub fn k_clusters<R: Rng + ?Sized>(
    k: usize,
    cluster_size: usize,
    spread: f64,
    radius: f64,
    rng: &mut R,
) -> Result<Instance> {
    if k == 0 {
        return Err(InputError::InvalidK { k, points: 0 }.into());
    }
    if !(spread.is_finite() && radius.is_finite()) || spread < 0.0 {
        return Err(ClusteringError::InvalidConfig(format!(
            "synthetic instance needs finite radius and spread >= 0, got radius {radius}, spread {spread}"
        )));
    }

    let mut points = Vec::with_capacity(k * (cluster_size + 1));
    for center in ring_centers(k, radius) {
        for _ in 0..cluster_size {
            let coords = center
                .coords()
                .iter()
                .map(|&c| {
                    if spread > 0.0 {
                        c + rng.gen_range(0.0..spread)
                    } else {
                        c
                    }
                })
                .collect();
            points.push(Point::new(coords));
        }
        points.push(center);
    }
    Instance::new(points, k)
}
