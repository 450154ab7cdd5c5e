//! # RRT
//! Plain rapidly-exploring random tree planner: sample, nearest, steer,
//! collision-check, insert, driven over a fixed iteration budget.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::{debug, info};

use crate::error::PlanningResult;
use crate::params::PlannerParams;
use crate::sampling::SampleSpace;
use crate::solution::PlanSolution;
use crate::tree::{Configuration, PlanningTree};

/// Caller-supplied obstacle predicate: `true` means the candidate
/// configuration is admissible. Called exactly once per extension attempt.
pub type FreePredicate<const N: usize> = Box<dyn Fn(&Configuration<N>) -> bool>;

/// Outcome of one planning step. A rejected extension is an expected
/// non-error result; the tree grows by exactly zero or one node per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Extended(usize),
    Rejected,
}

pub struct Rrt<const N: usize> {
    params: PlannerParams,
    tree: PlanningTree<N>,
    space: SampleSpace<N>,
    is_free: FreePredicate<N>,
    rng: ChaChaRng,
}

impl<const N: usize> Rrt<N> {
    pub fn new<F>(
        start: Configuration<N>,
        goal: Configuration<N>,
        params: PlannerParams,
        is_free: F,
    ) -> PlanningResult<Self>
    where
        F: Fn(&Configuration<N>) -> bool + 'static,
    {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => ChaChaRng::seed_from_u64(seed),
            None => ChaChaRng::from_entropy(),
        };
        Ok(Self {
            space: SampleSpace::new(&params, goal)?,
            tree: PlanningTree::new(start, goal),
            params,
            is_free: Box::new(is_free),
            rng,
        })
    }

    pub fn tree(&self) -> &PlanningTree<N> {
        &self.tree
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// One full extension attempt: sample, nearest, steer, collision-check,
    /// insert on acceptance.
    pub fn step(&mut self) -> PlanningResult<StepOutcome> {
        let sample = self.space.draw(&mut self.rng);
        let nearest = self.tree.nearest(&sample);
        let multiplier = self.space.step_multiplier(&mut self.rng);
        let candidate = self
            .tree
            .steer(nearest, &sample, self.params.max_step, multiplier)?;
        if !(self.is_free)(&candidate) {
            return Ok(StepOutcome::Rejected);
        }
        let index = self.tree.insert(candidate, nearest)?;
        Ok(StepOutcome::Extended(index))
    }

    /// Runs steps until the iteration budget is exhausted, or until a node
    /// lands within `goal_radius` of the goal when that option is set.
    /// Returns the extracted path on early termination, `None` otherwise.
    pub fn grow(&mut self) -> PlanningResult<Option<PlanSolution>> {
        for iteration in 0..self.params.iteration_budget {
            match self.step()? {
                StepOutcome::Extended(index) => {
                    debug!(iteration, node = index, size = self.tree.len(), "extended");
                    if let Some(radius) = self.params.goal_radius {
                        if self.tree.within_goal_radius(index, radius)? {
                            info!(iteration, node = index, "goal reached");
                            return Ok(Some(self.solution(index)?));
                        }
                    }
                }
                StepOutcome::Rejected => debug!(iteration, "extension rejected"),
            }
        }
        Ok(None)
    }

    pub fn solution(&self, end: usize) -> PlanningResult<PlanSolution> {
        PlanSolution::from_tree(&self.tree, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn params(budget: u64) -> PlannerParams {
        PlannerParams {
            iteration_budget: budget,
            seed: Some(99),
            ..Default::default()
        }
    }

    fn planner(params: PlannerParams) -> Rrt<2> {
        Rrt::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            params,
            |_| true,
        )
        .unwrap()
    }

    #[test]
    fn test_hundred_accepted_iterations() {
        // Sampling box [-6, 6]^2, all collisions accepted: root + 100 nodes.
        let mut rrt = planner(params(100));
        rrt.grow().unwrap();
        assert_eq!(rrt.tree().len(), 101);

        let view = rrt.tree().view();
        for (i, parent) in view.parents.iter().enumerate() {
            match parent {
                None => assert_eq!(i, 0),
                Some(p) => {
                    assert!(*p < i);
                    let edge = (view.configs[i] - view.configs[*p]).norm();
                    assert_relative_eq!(view.costs[i], view.costs[*p] + edge, epsilon = 1e-9);
                    // step bound holds despite the randomized step length
                    assert!(edge <= rrt.params().max_step + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_rejection_leaves_tree_unchanged() {
        let mut rrt = Rrt::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            params(50),
            |_| false,
        )
        .unwrap();
        for _ in 0..50 {
            assert_eq!(rrt.step().unwrap(), StepOutcome::Rejected);
            assert_eq!(rrt.tree().len(), 1);
        }
    }

    #[test]
    fn test_growth_is_zero_or_one_per_step() {
        // Reject everything in the left half-plane
        let mut rrt = Rrt::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            params(200),
            |c: &Vector2<f64>| c.x >= 0.0,
        )
        .unwrap();
        let mut size = rrt.tree().len();
        for _ in 0..200 {
            let outcome = rrt.step().unwrap();
            let new_size = rrt.tree().len();
            match outcome {
                StepOutcome::Extended(index) => {
                    assert_eq!(new_size, size + 1);
                    assert_eq!(index, new_size - 1);
                    assert!(rrt.tree()[index].x >= 0.0);
                }
                StepOutcome::Rejected => assert_eq!(new_size, size),
            }
            size = new_size;
        }
    }

    #[test]
    fn test_goal_radius_terminates_early() {
        let cfg = PlannerParams {
            goal_radius: Some(6.0),
            ..params(1000)
        };
        let mut rrt = planner(cfg);
        let solution = rrt.grow().unwrap().expect("goal radius covers the box");
        assert!(rrt.tree().len() <= 1001);
        assert_eq!(solution.node_indices[0], 0);
        let end = *solution.node_indices.last().unwrap();
        assert!(rrt.tree().within_goal_radius(end, 6.0).unwrap());
        assert_relative_eq!(solution.cost, rrt.tree().cost(end).unwrap());
    }

    #[test]
    fn test_invalid_params_rejected_at_construction() {
        let cfg = PlannerParams {
            max_step: -1.0,
            ..Default::default()
        };
        let result = Rrt::<2>::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            cfg,
            |_| true,
        );
        assert!(result.is_err());
    }
}
