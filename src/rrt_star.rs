//! # RRT*
//! Plain extension plus fixed-radius neighborhood rewiring: after each
//! insertion, every node within `near_radius` of the new node adopts it as
//! parent when routing through it is strictly cheaper.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::{debug, info, trace};

use crate::error::PlanningResult;
use crate::params::PlannerParams;
use crate::rrt::{FreePredicate, StepOutcome};
use crate::sampling::SampleSpace;
use crate::solution::PlanSolution;
use crate::tree::{Configuration, PlanningTree};

pub struct RrtStar<const N: usize> {
    params: PlannerParams,
    tree: PlanningTree<N>,
    space: SampleSpace<N>,
    is_free: FreePredicate<N>,
    rng: ChaChaRng,
    last_near: Vec<usize>,
}

impl<const N: usize> RrtStar<N> {
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
            last_near: Vec::new(),
        })
    }

    pub fn tree(&self) -> &PlanningTree<N> {
        &self.tree
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// The near-set computed for the most recent accepted extension, kept
    /// only for rendering. Cleared on rejection.
    pub fn last_near(&self) -> &[usize] {
        &self.last_near
    }

    /// One extension attempt followed by the local rewiring pass.
    pub fn step(&mut self) -> PlanningResult<StepOutcome> {
        let sample = self.space.draw(&mut self.rng);
        let nearest = self.tree.nearest(&sample);
        let multiplier = self.space.step_multiplier(&mut self.rng);
        let candidate = self
            .tree
            .steer(nearest, &sample, self.params.max_step, multiplier)?;
        if !(self.is_free)(&candidate) {
            self.last_near.clear();
            return Ok(StepOutcome::Rejected);
        }
        let index = self.tree.insert(candidate, nearest)?;
        let near = self.tree.near_set(index, self.params.near_radius)?;
        let rewired = self.tree.rewire_costs(index, &near)?;
        if self.params.propagate_rewires {
            for &node in &rewired {
                self.tree.propagate_costs(node)?;
            }
        }
        trace!(node = index, near = near.len(), rewired = rewired.len(), "rewired");
        self.last_near = near;
        Ok(StepOutcome::Extended(index))
    }

    /// Budgeted grow loop, optional goal-radius early termination, as in the
    /// plain planner.
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
