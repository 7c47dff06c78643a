use explainable_kmedian::synthetic::k_clusters;
use explainable_kmedian::*;
use rand::SeedableRng;

fn main() -> Result<()> {
    println!("=== explainable_kmedian: Threshold Tree Examples ===\n");

    two_cluster_example()?;
    println!();
    strategy_comparison_example()?;
    println!();
    config_example()?;
    Ok(())
}

fn two_cluster_example() -> Result<()> {
    println!("1. Two Clusters, Fixed Centers");
    println!("------------------------------");

    let points = vec![
        Point::new(vec![0.2, 0.1]),
        Point::new(vec![0.5, 0.3]),
        Point::new(vec![0.1, 0.6]),
        Point::new(vec![10.2, 9.8]),
        Point::new(vec![9.6, 10.3]),
        Point::new(vec![10.4, 10.4]),
    ];
    let instance = Instance::new(points, 2)?;
    let provider = FixedCenters::new(vec![Point::new(vec![0.0, 0.0]), Point::new(vec![10.0, 10.0])]);

    let solution = ExplainableSolver::default().solve_with(&instance, &provider)?;

    println!("Splits:");
    for split in solution.tree.splits() {
        println!("  {split}");
    }
    println!("Leaves:");
    for (i, leaf) in solution.tree.leaves().iter().enumerate() {
        if let Some(center) = leaf.center() {
            println!(
                "  {i}: center {center}, {} points, representative {}",
                leaf.num_points(),
                solution.clustering.representatives[i]
            );
        }
    }

    let query = Point::new(vec![3.0, 2.0]);
    println!("Why does {query} land where it does?");
    for decision in solution.tree.explain(&query) {
        let side = if decision.goes_left { "yes" } else { "no" };
        println!("  {} ? {side}", decision.split);
    }
    println!(
        "Reference cost {:.3}, explainable cost {:.3}",
        solution.reference_cost, solution.clustering.tree_cost
    );
    Ok(())
}

fn strategy_comparison_example() -> Result<()> {
    println!("2. Strategy Comparison on a Ring of 8 Clusters");
    println!("----------------------------------------------");

    let mut rng = SplitRng::seed_from_u64(1);
    let instance = k_clusters(8, 40, 10.0, 100.0, &mut rng)?;

    for strategy in StrategyKind::ALL {
        let config = SolverConfig::default().with_strategy(strategy);
        let solution = ExplainableSolver::new(config).solve(&instance)?;
        println!(
            "  {strategy:>20}: depth {}, tree cost {:>9.2}, price of explainability {:.3}",
            solution.tree.depth(),
            solution.clustering.tree_cost,
            solution.price_of_explainability()
        );
    }
    Ok(())
}

fn config_example() -> Result<()> {
    println!("3. JSON Configuration");
    println!("---------------------");

    let config = SolverConfig::from_json(
        r#"{ "norm": "l2", "representative": "coordinate-median", "strategy": "makarychev", "seed": 3 }"#,
    )?;
    println!("{}", config.to_json()?);

    let mut rng = SplitRng::seed_from_u64(2);
    let instance = k_clusters(4, 25, 5.0, 50.0, &mut rng)?;
    let solution = ExplainableSolver::new(config).solve(&instance)?;
    println!(
        "{} leaves, cost {:.2}",
        solution.tree.num_leaves(),
        solution.clustering.cost
    );
    Ok(())
}
