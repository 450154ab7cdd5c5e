//! Driver-loop parameters for the RRT planners.
//!
//! Every knob of the planning loop is an explicit configuration input:
//! iteration budget, step-size bound, rewiring radius, sampling box. Nothing
//! is hardwired in the planners themselves.

use crate::error::{PlanningError, PlanningResult};
use config::Config;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlannerParams {
    /// Number of extension attempts before the grow loop gives up.
    pub iteration_budget: u64,
    /// Upper bound on the nominal extension length per iteration.
    pub max_step: f64,
    /// RRT* rewiring neighborhood radius, fixed for the whole run.
    pub near_radius: f64,
    /// Per-axis lower bound of the uniform sampling box.
    pub sample_min: f64,
    /// Per-axis upper bound of the uniform sampling box.
    pub sample_max: f64,
    /// Mean of the normal step-length multiplier.
    pub noise_mean: f64,
    /// Standard deviation of the normal step-length multiplier.
    pub noise_std: f64,
    /// Probability in [0, 1) of sampling the goal instead of the box.
    pub goal_bias: f64,
    /// When set, the grow loop terminates early once a node lands within
    /// this distance of the goal.
    pub goal_radius: Option<f64>,
    /// When true, a rewire is followed by a breadth-first cost refresh of
    /// the rewired node's subtree.
    pub propagate_rewires: bool,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            iteration_budget: 3333,
            max_step: 0.888,
            near_radius: 1.0,
            sample_min: -6.0,
            sample_max: 6.0,
            noise_mean: 0.777,
            noise_std: (0.9 - 0.5) / (2.0 * 0.675),
            goal_bias: 0.0,
            goal_radius: None,
            propagate_rewires: false,
            seed: None,
        }
    }
}

impl PlannerParams {
    pub fn validate(&self) -> PlanningResult<()> {
        if !(self.max_step > 0.0) {
            return Err(PlanningError::InvalidParams(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        if self.near_radius < 0.0 {
            return Err(PlanningError::InvalidParams(format!(
                "near_radius must be non-negative, got {}",
                self.near_radius
            )));
        }
        if !(self.sample_min < self.sample_max) {
            return Err(PlanningError::InvalidParams(format!(
                "sampling box is empty: [{}, {}]",
                self.sample_min, self.sample_max
            )));
        }
        if !(0.0..1.0).contains(&self.goal_bias) {
            return Err(PlanningError::InvalidParams(format!(
                "goal_bias must lie in [0, 1), got {}",
                self.goal_bias
            )));
        }
        if !(self.noise_std >= 0.0) {
            return Err(PlanningError::InvalidParams(format!(
                "noise_std must be non-negative, got {}",
                self.noise_std
            )));
        }
        if let Some(r) = self.goal_radius {
            if r < 0.0 {
                return Err(PlanningError::InvalidParams(format!(
                    "goal_radius must be non-negative, got {r}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_value(json: serde_json::Value) -> PlanningResult<Self> {
        let params: Self = serde_json::from_value(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_file(filename: &str) -> PlanningResult<Self> {
        let params = Config::builder()
            .add_source(config::File::with_name(filename))
            .build()?
            .try_deserialize::<PlannerParams>()?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> PlanningResult<()> {
        serde_json::to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = PlannerParams::default();
        assert_eq!(params.iteration_budget, 3333);
        assert_relative_eq!(params.max_step, 0.888);
        assert_relative_eq!(params.noise_mean, 0.777);
        assert_relative_eq!(params.noise_std, 0.4 / 1.35);
        assert_relative_eq!(params.sample_min, -6.0);
        assert_relative_eq!(params.sample_max, 6.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let mut params = PlannerParams {
            max_step: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PlannerParams {
            near_radius: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PlannerParams {
            sample_min: 6.0,
            sample_max: -6.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PlannerParams {
            goal_bias: 1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PlannerParams {
            noise_std: -0.1,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PlannerParams {
            goal_radius: Some(-2.0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_from_json_value() {
        let json = serde_json::json!({
            "iteration_budget": 555,
            "max_step": 1.0,
            "near_radius": 0.5,
        });
        let params = PlannerParams::from_json_value(json).unwrap();
        assert_eq!(params.iteration_budget, 555);
        assert_relative_eq!(params.max_step, 1.0);
        assert_relative_eq!(params.near_radius, 0.5);
        // Unspecified fields fall back to defaults
        assert_relative_eq!(params.noise_mean, 0.777);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join("cspace_rrt_params.json");
        let params = PlannerParams {
            iteration_budget: 42,
            seed: Some(7),
            goal_radius: Some(0.25),
            ..Default::default()
        };
        params.to_file(&path).unwrap();
        let loaded = PlannerParams::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, params);
    }
}
