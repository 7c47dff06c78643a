/// Mistake Minimization Optimality
///
/// The exhaustive strategy must never be beaten by any other threshold that separates the
/// node's centers. Checked against a brute-force scan of every midpoint between consecutive
/// coordinates (points and centers alike) plus random thresholds inside the center range.

use explainable_kmedian::split::mistakes::candidate_thresholds;
use explainable_kmedian::split::{count_mistakes, MistakeMinimizing};
use explainable_kmedian::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_node(seed: u64, n: usize, k: usize, dimension: usize) -> ClusterNode {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Point> = (0..n)
        .map(|_| Point::random(dimension, 50.0, &mut rng))
        .collect();
    let centers: Vec<Point> = (0..k)
        .map(|_| Point::random(dimension, 50.0, &mut rng))
        .collect();
    // A few points are deliberately mis-assigned so that zero-mistake splits are rare.
    let mut clustering = Clustering::from_centers(&points, centers.clone(), Norm::L1).into_clusters();
    for i in 0..clustering.len() {
        let stray = Point::random(dimension, 50.0, &mut rng);
        clustering[(i + 1) % k].points.push(stray);
    }
    ClusterNode::root(Clustering::new(clustering)).unwrap()
}

fn separates(node: &ClusterNode, split: Split) -> bool {
    let left = node.centers().iter().filter(|c| split.goes_left(c)).count();
    left > 0 && left < node.num_centers()
}

/// Every threshold worth trying: midpoints of all sorted distinct coordinates, plus random ones.
fn brute_force_thresholds(node: &ClusterNode, dimension: usize, rng: &mut ChaCha8Rng) -> Vec<f64> {
    let mut coords: Vec<f64> = node
        .centers()
        .iter()
        .chain(node.points().iter())
        .map(|p| p.coord(dimension))
        .collect();
    coords.sort_by(|a, b| a.partial_cmp(b).unwrap());
    coords.dedup();

    let mut thresholds: Vec<f64> = coords.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    thresholds.extend(coords.iter().copied());
    for _ in 0..50 {
        thresholds.push(rng.gen_range(0.0..50.0));
    }
    thresholds
}

#[test]
fn test_no_separating_threshold_beats_the_chosen_one() {
    println!("\n=== Mistake minimization vs brute force ===");

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for seed in 0..25 {
        let k = 2 + (seed as usize % 5);
        let node = random_node(seed, 40, k, 3);

        let chosen = MistakeMinimizing
            .find_split(&node, &mut rng)
            .expect("non-homogeneous node must split");
        assert!(separates(&node, chosen));
        let chosen_mistakes = count_mistakes(&node, chosen);

        let mut checked = 0;
        for dimension in 0..node.dimension() {
            for t in brute_force_thresholds(&node, dimension, &mut rng) {
                let candidate = Split::new(dimension, t);
                if !separates(&node, candidate) {
                    continue;
                }
                checked += 1;
                let mistakes = count_mistakes(&node, candidate);
                assert!(
                    chosen_mistakes <= mistakes,
                    "seed {seed}: {chosen} has {chosen_mistakes} mistakes, {candidate} has {mistakes}"
                );
            }
        }
        println!("seed {seed:>2} k={k}: {chosen} with {chosen_mistakes} mistakes ({checked} rivals)");
    }
}

#[test]
fn test_first_minimum_wins_ties() {
    // Dimension 0 and dimension 1 both separate the centers without mistakes.
    let reference = Clustering::new(vec![
        Cluster::new(Point::new(vec![0.0, 0.0]), vec![Point::new(vec![1.0, 1.0])]),
        Cluster::new(Point::new(vec![10.0, 10.0]), vec![Point::new(vec![9.0, 9.0])]),
    ]);
    let node = ClusterNode::root(reference).unwrap();
    let split = MistakeMinimizing
        .find_split(&node, &mut ChaCha8Rng::seed_from_u64(0))
        .unwrap();

    assert_eq!(split.dimension, 0);
    let first_zero = candidate_thresholds(&node, 0)
        .into_iter()
        .find(|&t| count_mistakes(&node, Split::new(0, t)) == 0)
        .unwrap();
    assert_eq!(split.threshold, first_zero);
    assert_eq!(split.threshold, 5.0);
}

#[test]
fn test_rng_is_ignored() {
    let node = random_node(3, 30, 4, 2);
    let a = MistakeMinimizing
        .find_split(&node, &mut ChaCha8Rng::seed_from_u64(1))
        .unwrap();
    let b = MistakeMinimizing
        .find_split(&node, &mut ChaCha8Rng::seed_from_u64(2))
        .unwrap();
    assert_eq!(a, b);
}
