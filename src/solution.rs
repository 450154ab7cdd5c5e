//! Extracted planning solutions.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::PlanningResult;
use crate::tree::PlanningTree;

/// A path through the tree from the root to some end node, with its
/// cost-from-start. Serializable for offline inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSolution {
    pub node_indices: Vec<usize>,
    pub states: Vec<Vec<f64>>,
    pub cost: f64,
}

impl PlanSolution {
    pub fn from_tree<const N: usize>(
        tree: &PlanningTree<N>,
        end: usize,
    ) -> PlanningResult<Self> {
        let node_indices = tree.path_to(end)?;
        let states = node_indices
            .iter()
            .map(|&i| tree[i].iter().copied().collect())
            .collect();
        Ok(Self {
            node_indices,
            states,
            cost: tree.cost(end)?,
        })
    }

    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> PlanningResult<()> {
        serde_json::to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }

    pub fn load_from_json<P: AsRef<Path>>(path: P) -> PlanningResult<Self> {
        let file = File::open(path)?;
        let solution = serde_json::from_reader(file)?;
        Ok(solution)
    }
}
