//! # Planning tree
//! The core data structure: configuration, parent-index and cost tables that
//! grow in lockstep, one entry per accepted extension. Index 0 is the start
//! configuration (cost 0, no parent); nodes are appended monotonically and
//! never removed.

use std::collections::VecDeque;
use std::ops::Index;

use nalgebra::SVector;

use crate::error::{PlanningError, PlanningResult};

/// A point in an n-dimensional configuration space.
pub type Configuration<const N: usize> = SVector<f64, N>;

#[derive(Debug, Clone)]
pub struct PlanningTree<const N: usize> {
    goal: Configuration<N>,
    configs: Vec<Configuration<N>>,
    parents: Vec<Option<usize>>,
    costs: Vec<f64>,
}

/// Read-only snapshot of the tree tables, handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct TreeView<'a, const N: usize> {
    pub configs: &'a [Configuration<N>],
    pub parents: &'a [Option<usize>],
    pub costs: &'a [f64],
}

impl<const N: usize> PlanningTree<N> {
    pub fn new(start: Configuration<N>, goal: Configuration<N>) -> Self {
        Self {
            goal,
            configs: vec![start],
            parents: vec![None],
            costs: vec![0.0],
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn start(&self) -> &Configuration<N> {
        &self.configs[0]
    }

    /// The goal is stored once at construction and only participates as a
    /// bias/termination target; it is not necessarily a tree member.
    pub fn goal(&self) -> &Configuration<N> {
        &self.goal
    }

    fn check_index(&self, index: usize) -> PlanningResult<()> {
        if index >= self.configs.len() {
            return Err(PlanningError::InvalidIndex {
                index,
                len: self.configs.len(),
            });
        }
        Ok(())
    }

    pub fn config(&self, index: usize) -> PlanningResult<&Configuration<N>> {
        self.check_index(index)?;
        Ok(&self.configs[index])
    }

    pub fn parent(&self, index: usize) -> PlanningResult<Option<usize>> {
        self.check_index(index)?;
        Ok(self.parents[index])
    }

    pub fn cost(&self, index: usize) -> PlanningResult<f64> {
        self.check_index(index)?;
        Ok(self.costs[index])
    }

    /// Index of the stored configuration closest to `sample` in Euclidean
    /// distance. Ties break to the first index in scan order. Linear in the
    /// tree size; this scan is the complexity bottleneck if the tree grows
    /// beyond a few thousand nodes.
    pub fn nearest(&self, sample: &Configuration<N>) -> usize {
        let mut best = 0;
        let mut best_d2 = (&self.configs[0] - sample).norm_squared();
        for (i, config) in self.configs.iter().enumerate().skip(1) {
            let d2 = (config - sample).norm_squared();
            if d2 < best_d2 {
                best = i;
                best_d2 = d2;
            }
        }
        best
    }

    /// New candidate configuration a bounded step from `nearest` towards
    /// `sample`. The step length is `min(max_step, distance) * multiplier`;
    /// the multiplier is drawn by the caller (see
    /// [`SampleSpace::step_multiplier`](crate::sampling::SampleSpace::step_multiplier))
    /// and lies in [0, 1], so the step never exceeds `max_step`. A sample
    /// coinciding with the nearest node yields a zero step rather than a
    /// division error.
    pub fn steer(
        &self,
        nearest: usize,
        sample: &Configuration<N>,
        max_step: f64,
        multiplier: f64,
    ) -> PlanningResult<Configuration<N>> {
        let from = *self.config(nearest)?;
        let direction = sample - from;
        let distance = direction.norm();
        if distance == 0.0 {
            return Ok(from);
        }
        let step = max_step.min(distance) * multiplier;
        Ok(from + direction * (step / distance))
    }

    /// Appends `candidate` as a child of `parent`. The sole mutation path
    /// that grows the tree; all three tables are updated together so readers
    /// between steps never observe a partial node.
    pub fn insert(
        &mut self,
        candidate: Configuration<N>,
        parent: usize,
    ) -> PlanningResult<usize> {
        self.check_index(parent)?;
        let edge = (candidate - self.configs[parent]).norm();
        let cost = self.costs[parent] + edge;
        self.configs.push(candidate);
        self.parents.push(Some(parent));
        self.costs.push(cost);
        Ok(self.configs.len() - 1)
    }

    /// All node indices within `radius` of `center`'s configuration,
    /// including `center` itself. Recomputed per step, never persisted.
    pub fn near_set(&self, center: usize, radius: f64) -> PlanningResult<Vec<usize>> {
        let center_config = *self.config(center)?;
        Ok(self
            .configs
            .iter()
            .enumerate()
            .filter(|(_, config)| (*config - center_config).norm() <= radius)
            .map(|(i, _)| i)
            .collect())
    }

    /// For every node in `near`, adopts `new_index` as parent if routing
    /// through it is strictly cheaper. Updates cost and parent of the rewired
    /// node only; descendant costs go stale until a later rewire or an
    /// explicit [`propagate_costs`](Self::propagate_costs) pass. Returns the
    /// rewired indices.
    ///
    /// The strict inequality also rules out cycles: any ancestor of
    /// `new_index` costs no more than `new_index` itself, so routing an
    /// ancestor through it can never be an improvement.
    pub fn rewire_costs(
        &mut self,
        new_index: usize,
        near: &[usize],
    ) -> PlanningResult<Vec<usize>> {
        let new_cost = self.cost(new_index)?;
        let new_config = self.configs[new_index];
        let mut rewired = Vec::new();
        for &i in near {
            self.check_index(i)?;
            if i == new_index {
                continue;
            }
            let via_new = new_cost + (self.configs[i] - new_config).norm();
            if via_new < self.costs[i] {
                self.costs[i] = via_new;
                self.parents[i] = Some(new_index);
                rewired.push(i);
            }
        }
        Ok(rewired)
    }

    /// Breadth-first refresh of every descendant's cost below `from`,
    /// restoring exact cost consistency after a rewire. Optional; the
    /// baseline rewiring leaves descendants stale.
    pub fn propagate_costs(&mut self, from: usize) -> PlanningResult<()> {
        self.check_index(from)?;
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            for i in 0..self.configs.len() {
                if self.parents[i] == Some(node) {
                    self.costs[i] =
                        self.costs[node] + (self.configs[i] - self.configs[node]).norm();
                    queue.push_back(i);
                }
            }
        }
        Ok(())
    }

    pub fn within_goal_radius(&self, index: usize, radius: f64) -> PlanningResult<bool> {
        let config = self.config(index)?;
        Ok((config - self.goal).norm() <= radius)
    }

    /// Node indices from the root to `end`, following parent links.
    pub fn path_to(&self, end: usize) -> PlanningResult<Vec<usize>> {
        self.check_index(end)?;
        let mut path = vec![end];
        let mut current = end;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }

    pub fn view(&self) -> TreeView<'_, N> {
        TreeView {
            configs: &self.configs,
            parents: &self.parents,
            costs: &self.costs,
        }
    }
}

/// Direct node lookup. Panics on an out-of-bounds index; callers holding an
/// index from `insert` or `nearest` satisfy the precondition by construction.
impl<const N: usize> Index<usize> for PlanningTree<N> {
    type Output = Configuration<N>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.configs[index]
    }
}
