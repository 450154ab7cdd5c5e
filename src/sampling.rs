//! Configuration-space sampling.
//!
//! Draws i.i.d. uniform samples from an axis-aligned box, with an optional
//! goal bias, and supplies the randomized step-length multiplier used by the
//! steer operation.

use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_distr::{Distribution, Normal};

use crate::error::{PlanningError, PlanningResult};
use crate::params::PlannerParams;
use crate::tree::Configuration;

pub struct SampleSpace<const N: usize> {
    low: f64,
    high: f64,
    goal: Configuration<N>,
    goal_bias: f64,
    noise: Normal<f64>,
}

impl<const N: usize> SampleSpace<N> {
    pub fn new(params: &PlannerParams, goal: Configuration<N>) -> PlanningResult<Self> {
        let noise = Normal::new(params.noise_mean, params.noise_std).map_err(|e| {
            PlanningError::InvalidParams(format!("step noise distribution: {e}"))
        })?;
        Ok(Self {
            low: params.sample_min,
            high: params.sample_max,
            goal,
            goal_bias: params.goal_bias,
            noise,
        })
    }

    /// One configuration per call, independent of history: uniform per axis
    /// in [low, high), or the goal itself with probability `goal_bias`.
    pub fn draw(&self, rng: &mut ChaChaRng) -> Configuration<N> {
        if self.goal_bias > 0.0 && rng.gen::<f64>() < self.goal_bias {
            return self.goal;
        }
        Configuration::from_fn(|_, _| rng.gen_range(self.low..self.high))
    }

    /// Step-length multiplier drawn from the normal noise distribution,
    /// clamped to [0, 1] so a steer can undershoot the nominal bounded step
    /// but never exceed it.
    pub fn step_multiplier(&self, rng: &mut ChaChaRng) -> f64 {
        self.noise.sample(rng).clamp(0.0, 1.0)
    }
}
