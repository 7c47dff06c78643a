//! Run configuration.
//!
//! One norm is chosen per run and threaded through seeding, splitting and cost assembly.
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "norm": "l2",
//!   "representative": "coordinate-median",
//!   "strategy": "pairwise-box",
//!   "seed": 42,
//!   "seeding": { "iterations": 10, "seed": 7 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ClusteringError, Result};
use crate::instance::Instance;
use crate::metric::Norm;
use crate::representative::Representative;
use crate::seeding::KMedianPlusPlus;
use crate::split::StrategyKind;

/// Upper bound on Lloyd rounds after k-median++ seeding.
pub const MAX_SEEDING_ITERATIONS: usize = 1_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub norm: Norm,
    pub representative: Representative,
    pub strategy: StrategyKind,
    /// Seed for the split-sampling generator. Unused by the deterministic strategy.
    pub seed: u64,
    pub seeding: SeedingConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            norm: Norm::L1,
            representative: Representative::Medoid,
            strategy: StrategyKind::MistakeMinimizing,
            seed: 0,
            seeding: SeedingConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedingConfig {
    pub iterations: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            seed: Some(0),
        }
    }
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_representative(mut self, representative: Representative) -> Self {
        self.representative = representative;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that this configuration can run on `instance`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `seeding.iterations` exceeds [`MAX_SEEDING_ITERATIONS`];
    /// - `InvalidInput` if the instance itself fails validation.
    pub fn validate_for(&self, instance: &Instance) -> Result<()> {
        if self.seeding.iterations > MAX_SEEDING_ITERATIONS {
            return Err(ClusteringError::InvalidConfig(format!(
                "seeding.iterations must be <= {MAX_SEEDING_ITERATIONS}, got {}",
                self.seeding.iterations
            )));
        }
        instance.validate()
    }

    /// The k-median++ provider described by `seeding`.
    pub fn seeder(&self) -> KMedianPlusPlus {
        KMedianPlusPlus {
            iterations: self.seeding.iterations,
            seed: self.seeding.seed,
            representative: self.representative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Point;

    #[test]
    fn test_empty_json_is_default() {
        let config = SolverConfig::from_json("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.norm, Norm::L1);
        assert_eq!(config.seeding.iterations, 5);
        assert_eq!(config.seeding.seed, Some(0));
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "norm": "l2",
            "representative": "coordinate-median",
            "strategy": "makarychev",
            "seed": 42,
            "seeding": { "iterations": 10, "seed": null }
        }"#;
        let config = SolverConfig::from_json(json).unwrap();
        assert_eq!(config.norm, Norm::L2);
        assert_eq!(config.representative, Representative::CoordinateMedian);
        assert_eq!(config.strategy, StrategyKind::PairwiseBox);
        assert_eq!(config.seed, 42);
        assert_eq!(config.seeding.iterations, 10);
        assert_eq!(config.seeding.seed, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SolverConfig::from_json(r#"{ "nrom": "l2" }"#).unwrap_err();
        assert!(matches!(err, ClusteringError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_strategy_names() {
        let config = SolverConfig::default().with_strategy(StrategyKind::RangeWeighted);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"range-weighted\""));
        assert_eq!(SolverConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_for() {
        let instance = Instance::new(vec![Point::new(vec![0.0]), Point::new(vec![1.0])], 2).unwrap();
        assert!(SolverConfig::default().validate_for(&instance).is_ok());

        let mut config = SolverConfig::default();
        config.seeding.iterations = MAX_SEEDING_ITERATIONS + 1;
        assert!(matches!(
            config.validate_for(&instance),
            Err(ClusteringError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seeder_follows_config() {
        let config = SolverConfig::default().with_representative(Representative::CoordinateMedian);
        let seeder = config.seeder();
        assert_eq!(seeder.iterations, 5);
        assert_eq!(seeder.representative, Representative::CoordinateMedian);
    }
}
